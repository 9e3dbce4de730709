//! Resolve command implementation.

use keyshape_core::SyntaxRegistry;

use crate::output::format_json;

pub fn run(
    registry: &SyntaxRegistry,
    query: Option<String>,
    register: bool,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let syntaxes = registry.resolve(query.unwrap_or_default(), register);

    if json_output {
        println!("{}", format_json(&syntaxes));
    } else {
        for syntax in &syntaxes {
            println!("{}", syntax.to_syntax_string(registry.separator()));
        }
    }

    Ok(())
}
