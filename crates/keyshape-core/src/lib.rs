//! Identifier syntaxes, syntax-bound identifiers and identifier sets.
//!
//! An entity can often be named several interchangeable ways (`id`, or
//! `username` + `domain`). This crate keeps a registry of those shapes
//! ("syntaxes"), binds raw values to them, and answers whether two
//! differently-shaped values name the same entity.
//!
//! Core invariants:
//! - A registry never holds duplicate name sets; the first-registered order wins
//! - The sentinel syntax `["UNDEFINED"]` exists only until the first registration
//! - The separator is write-once per registry
//! - Identifiers carry exactly one value per syntax name, `"UNDEFINED"` when missing
//! - Nothing in the identity path fails; malformed input degrades to ad-hoc shapes
//!
//! ## Quick Start
//!
//! ```rust
//! use keyshape_core::{properties, IdentOptions, IdentifierSet, SyntaxInput, SyntaxRegistry};
//!
//! let registry = SyntaxRegistry::new();
//! registry.register(["type/id", "username/domain"]);
//!
//! let user = properties([("type", "user"), ("id", "123"), ("username", "a"), ("domain", "b.com")]);
//! let set = IdentifierSet::new(&user, &registry, &IdentOptions::default());
//!
//! assert!(set.is_same_with("user/123", &registry, Some(&SyntaxInput::from(["type", "id"]))));
//! assert!(set.is_same(&properties([("username", "a"), ("domain", "b.com")])));
//! assert_eq!(set.to_string(), "user/123 a/b.com");
//! ```
#![deny(missing_docs)]

/// Registry configuration loaded from TOML.
pub mod config;
/// Single syntax-bound identifiers.
pub mod identifier;
/// Raw inputs and property maps.
pub mod input;
/// Construction options.
pub mod options;
/// Process-wide and injectable syntax registries.
pub mod registry;
/// Identifier sets spanning every applicable syntax.
pub mod set;
/// Syntax type, normalization and shared constants.
pub mod syntax;
/// Legality checks for syntaxes.
pub mod validation;

pub use config::{ConfigError, RegistryConfig};
pub use identifier::Identifier;
pub use input::{properties, properties_from_json, IdentifierInput, InputError, Properties};
pub use options::IdentOptions;
pub use registry::SyntaxRegistry;
pub use set::IdentifierSet;
pub use syntax::{Syntax, SyntaxInput, DEFAULT_SEPARATOR, PLACEHOLDER};
pub use validation::{validate_syntax, ValidationError};
