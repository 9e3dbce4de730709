//! Command-line value parsing.

use keyshape_core::{properties_from_json, IdentifierInput, InputError, Properties};
use std::io::{self, Read};
use thiserror::Error;

/// Errors raised while reading a value argument.
#[derive(Debug, Error)]
pub enum CliInputError {
    /// Reading stdin failed.
    #[error("failed to read stdin: {0}")]
    Stdin(#[from] io::Error),
    /// The value looked like JSON but did not parse.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The JSON was not a flat object of scalars.
    #[error(transparent)]
    Properties(#[from] InputError),
}

/// A value argument: plain text or a JSON object of properties.
pub enum RawValue {
    Text(String),
    Properties(Properties),
}

impl RawValue {
    /// Reads `arg`, taking stdin for `-`. Text starting with `{` is parsed as JSON.
    pub fn read(arg: &str) -> Result<Self, CliInputError> {
        let text = if arg == "-" {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer.trim_end_matches(['\r', '\n']).to_string()
        } else {
            arg.to_string()
        };

        if text.trim_start().starts_with('{') {
            let value: serde_json::Value = serde_json::from_str(&text)?;
            return Ok(RawValue::Properties(properties_from_json(&value)?));
        }
        Ok(RawValue::Text(text))
    }

    pub fn as_input(&self) -> IdentifierInput<'_> {
        match self {
            RawValue::Text(text) => IdentifierInput::Text(text),
            RawValue::Properties(properties) => IdentifierInput::Properties(properties),
        }
    }
}
