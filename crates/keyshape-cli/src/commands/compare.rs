//! Compare command implementation.

use keyshape_core::{IdentOptions, IdentifierSet, SyntaxInput, SyntaxRegistry};

use crate::input::RawValue;

pub fn run(
    registry: &SyntaxRegistry,
    left: String,
    right: String,
    syntax: Option<String>,
    strict: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if left == "-" && right == "-" {
        return Err("only one of LEFT and RIGHT can read stdin".into());
    }
    let left = RawValue::read(&left)?;
    let right = RawValue::read(&right)?;

    let set = IdentifierSet::new(left.as_input(), registry, &IdentOptions::default());
    let syntax = syntax.map(SyntaxInput::from);
    let same = set.is_same_with(right.as_input(), registry, syntax.as_ref());

    println!("{}", if same { "same" } else { "different" });

    if strict && !same {
        std::process::exit(1);
    }

    Ok(())
}
