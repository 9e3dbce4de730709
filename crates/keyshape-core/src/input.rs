use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;

use crate::identifier::Identifier;
use crate::set::IdentifierSet;
use crate::syntax::PLACEHOLDER;

/// Insertion-ordered property name → value mapping.
pub type Properties = IndexMap<String, String>;

/// Raw value an identifier can be built from or compared against.
#[derive(Debug, Clone, Copy)]
pub enum IdentifierInput<'a> {
    /// Separator-joined values, interpreted positionally against a syntax.
    Text(&'a str),
    /// Named property values.
    Properties(&'a Properties),
    /// An already-built identifier.
    Identifier(&'a Identifier),
    /// An already-built identifier set.
    Set(&'a IdentifierSet),
}

impl<'a> From<&'a str> for IdentifierInput<'a> {
    fn from(value: &'a str) -> Self {
        IdentifierInput::Text(value)
    }
}

impl<'a> From<&'a String> for IdentifierInput<'a> {
    fn from(value: &'a String) -> Self {
        IdentifierInput::Text(value.as_str())
    }
}

impl<'a> From<&'a Properties> for IdentifierInput<'a> {
    fn from(value: &'a Properties) -> Self {
        IdentifierInput::Properties(value)
    }
}

impl<'a> From<&'a Identifier> for IdentifierInput<'a> {
    fn from(value: &'a Identifier) -> Self {
        IdentifierInput::Identifier(value)
    }
}

impl<'a> From<&'a IdentifierSet> for IdentifierInput<'a> {
    fn from(value: &'a IdentifierSet) -> Self {
        IdentifierInput::Set(value)
    }
}

/// Errors raised while converting untyped JSON into [`Properties`].
#[derive(Debug, Error)]
pub enum InputError {
    /// The JSON root was not an object.
    #[error("expected a JSON object of properties, found {0}")]
    NotAnObject(&'static str),
    /// A property held an array or object.
    #[error("property '{0}' must be a scalar value")]
    NestedValue(String),
}

/// Builds a property map from a flat JSON object.
///
/// Strings are taken verbatim, numbers and booleans use their JSON text and
/// `null` becomes the placeholder.
pub fn properties_from_json(value: &Value) -> Result<Properties, InputError> {
    let object = match value {
        Value::Object(object) => object,
        other => return Err(InputError::NotAnObject(kind(other))),
    };

    let mut properties = Properties::with_capacity(object.len());
    for (key, child) in object {
        let text = match child {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null => PLACEHOLDER.to_string(),
            Value::Array(_) | Value::Object(_) => return Err(InputError::NestedValue(key.clone())),
        };
        properties.insert(key.clone(), text);
    }
    Ok(properties)
}

/// Builds a property map from `(name, value)` pairs.
pub fn properties<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Properties
where
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_are_stringified() {
        let props =
            properties_from_json(&json!({"id": 123, "active": true, "name": "a", "gone": null}))
                .unwrap();
        assert_eq!(props["id"], "123");
        assert_eq!(props["active"], "true");
        assert_eq!(props["name"], "a");
        assert_eq!(props["gone"], PLACEHOLDER);
    }

    #[test]
    fn nested_values_are_rejected() {
        let err = properties_from_json(&json!({"tags": ["a"]})).unwrap_err();
        assert!(matches!(err, InputError::NestedValue(ref key) if key == "tags"));
    }

    #[test]
    fn non_object_root_is_rejected() {
        let err = properties_from_json(&json!("user/123")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "expected a JSON object of properties, found a string"
        );
    }
}
