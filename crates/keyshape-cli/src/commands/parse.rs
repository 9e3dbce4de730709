//! Parse command implementation.

use keyshape_core::{IdentOptions, Identifier, SyntaxRegistry};

use crate::input::RawValue;
use crate::output::format_json;

pub fn run(
    registry: &SyntaxRegistry,
    value: String,
    syntax: Option<String>,
    register: bool,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw = RawValue::read(&value)?;
    let options = IdentOptions {
        syntax: syntax.map(Into::into),
        register,
        ..IdentOptions::default()
    };
    let identifier = Identifier::new(raw.as_input(), registry, &options);

    if json_output {
        println!("{}", format_json(&identifier));
    } else {
        println!("{}", identifier);
        println!("{}", identifier.to_syntax_string());
    }

    Ok(())
}
