//! Subcommand implementations.

pub mod compare;
pub mod parse;
pub mod resolve;
pub mod set;
