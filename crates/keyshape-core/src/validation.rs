use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::syntax::{Syntax, PLACEHOLDER};

/// Legal property names: identifier-like, no whitespace.
const PROPERTY_NAME_PATTERN: &str = r"^[A-Za-z_$][A-Za-z0-9_$.-]*$";

/// Validation errors for syntaxes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// When a value does not match the required pattern.
    #[error("{field} ('{value}') is not allowed")]
    PatternMismatch {
        /// Field name that failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// The syntax has no property names.
    #[error("syntax has no property names")]
    Empty,
    /// The syntax names the placeholder.
    #[error("property name '{0}' is reserved")]
    Reserved(String),
    /// A property name appears more than once.
    #[error("property name '{0}' appears more than once")]
    Duplicate(String),
    /// A property name contains the separator.
    #[error("property name '{name}' contains the separator '{separator}'")]
    ContainsSeparator {
        /// Offending name.
        name: String,
        /// Active separator.
        separator: String,
    },
}

/// Checks that `syntax` is a legal set of property names under `separator`.
pub fn validate_syntax(syntax: &Syntax, separator: &str) -> Result<(), ValidationError> {
    if syntax.is_empty() {
        return Err(ValidationError::Empty);
    }
    for (idx, name) in syntax.names().iter().enumerate() {
        if name == PLACEHOLDER {
            return Err(ValidationError::Reserved(name.clone()));
        }
        if syntax.names()[..idx].contains(name) {
            return Err(ValidationError::Duplicate(name.clone()));
        }
        if !separator.is_empty() && name.contains(separator) {
            return Err(ValidationError::ContainsSeparator {
                name: name.clone(),
                separator: separator.to_string(),
            });
        }
        if !property_name_regex().is_match(name) {
            return Err(ValidationError::PatternMismatch {
                field: "property_name",
                value: name.clone(),
            });
        }
    }
    Ok(())
}

fn property_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PROPERTY_NAME_PATTERN).expect("invalid regex"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syntax(names: &[&str]) -> Syntax {
        Syntax::new(names.iter().map(|n| n.to_string()).collect())
    }

    #[test]
    fn accepts_plain_names() {
        assert_eq!(validate_syntax(&syntax(&["type", "id"]), "/"), Ok(()));
        assert_eq!(validate_syntax(&syntax(&["$ref", "api.version"]), "/"), Ok(()));
    }

    #[test]
    fn rejects_empty_and_reserved() {
        assert_eq!(validate_syntax(&syntax(&[]), "/"), Err(ValidationError::Empty));
        assert_eq!(
            validate_syntax(&syntax(&["UNDEFINED"]), "/"),
            Err(ValidationError::Reserved("UNDEFINED".into()))
        );
    }

    #[test]
    fn rejects_duplicates() {
        assert_eq!(
            validate_syntax(&syntax(&["id", "type", "id"]), "/"),
            Err(ValidationError::Duplicate("id".into()))
        );
    }

    #[test]
    fn separator_inside_a_name_is_rejected() {
        let err = validate_syntax(&syntax(&["a.b"]), ".").unwrap_err();
        assert_eq!(err.to_string(), "property name 'a.b' contains the separator '.'");
        assert!(matches!(
            err,
            ValidationError::ContainsSeparator { ref name, ref separator } if name == "a.b" && separator == "."
        ));
    }

    #[test]
    fn separator_check_runs_before_the_pattern() {
        // "a/b" also fails the pattern; the separator is the more precise report.
        assert!(matches!(
            validate_syntax(&syntax(&["a/b"]), "/"),
            Err(ValidationError::ContainsSeparator { .. })
        ));
        assert!(validate_syntax(&syntax(&["a.b"]), "/").is_ok());
    }

    #[test]
    fn whitespace_fails_the_pattern() {
        assert!(matches!(
            validate_syntax(&syntax(&["user name"]), "/"),
            Err(ValidationError::PatternMismatch { field: "property_name", .. })
        ));
    }
}
