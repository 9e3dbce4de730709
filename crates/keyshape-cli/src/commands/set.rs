//! Set command implementation.

use keyshape_core::{IdentOptions, IdentifierSet, SyntaxRegistry};

use crate::input::RawValue;
use crate::output::{format_json, format_table_row, print_table_header};

pub fn run(
    registry: &SyntaxRegistry,
    value: String,
    register: bool,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw = RawValue::read(&value)?;
    let options = IdentOptions {
        register,
        ..IdentOptions::default()
    };
    let set = IdentifierSet::new(raw.as_input(), registry, &options);

    if json_output {
        println!("{}", format_json(&set));
    } else {
        print_table_header();
        for (key, member) in set.iter() {
            println!("{}", format_table_row(key, member));
        }
    }

    Ok(())
}
