use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::trace;

use crate::input::{IdentifierInput, Properties};
use crate::options::IdentOptions;
use crate::registry::SyntaxRegistry;
use crate::syntax::{split, Syntax, SyntaxInput, PLACEHOLDER};

/// One entity's property values bound to a single syntax.
///
/// `values` always holds exactly one entry per syntax name, in syntax order;
/// anything the source did not provide is the placeholder `"UNDEFINED"`.
/// Identifiers are immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    syntax: Syntax,
    separator: String,
    values: Properties,
}

impl Identifier {
    /// Builds an identifier from a string, property map, identifier or set.
    ///
    /// - Strings are split on the separator and assigned positionally to the
    ///   explicit syntax, or to the first registered syntax with a matching
    ///   arity.
    /// - Property maps resolve their syntax from their own keys unless one is
    ///   given.
    /// - Identifiers are copied; an explicit syntax reinterprets their values.
    /// - Sets contribute their first member, or their merged values when a
    ///   syntax is given.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyshape_core::{IdentOptions, Identifier, SyntaxRegistry};
    ///
    /// let registry = SyntaxRegistry::new();
    /// let id = Identifier::new("user/123", &registry, &IdentOptions::with_syntax(["type", "id"]));
    /// assert_eq!(id.get("id"), Some("123"));
    /// assert_eq!(id.to_string(), "user/123");
    /// ```
    pub fn new<'a>(
        input: impl Into<IdentifierInput<'a>>,
        registry: &SyntaxRegistry,
        options: &IdentOptions,
    ) -> Self {
        let separator = claim_separator(registry, options);
        match input.into() {
            IdentifierInput::Text(text) => {
                let syntax = match explicit_syntax(registry, options) {
                    Some(syntax) => syntax,
                    None => infer_from_arity(registry, split(text, &separator).len()),
                };
                let values = positional(text, &syntax, &separator);
                Self::bind(syntax, separator, &values)
            }
            IdentifierInput::Properties(properties) => {
                Self::from_properties(properties, registry, options, separator)
            }
            IdentifierInput::Identifier(other) => match explicit_syntax(registry, options) {
                Some(syntax) => Self::bind(syntax, separator, &other.values),
                None => other.clone(),
            },
            IdentifierInput::Set(set) => match (explicit_syntax(registry, options), set.first()) {
                (None, Some(first)) => first.clone(),
                _ => Self::from_properties(&set.to_properties(), registry, options, separator),
            },
        }
    }

    /// Binds `properties` to a known syntax, filling gaps with the placeholder.
    pub(crate) fn bind(syntax: Syntax, separator: String, properties: &Properties) -> Self {
        let values = syntax
            .names()
            .iter()
            .map(|name| {
                let value = properties
                    .get(name)
                    .filter(|value| !value.is_empty())
                    .map(String::as_str)
                    .unwrap_or(PLACEHOLDER);
                (name.clone(), value.to_string())
            })
            .collect();
        Self {
            syntax,
            separator,
            values,
        }
    }

    fn from_properties(
        properties: &Properties,
        registry: &SyntaxRegistry,
        options: &IdentOptions,
        separator: String,
    ) -> Self {
        let syntax = explicit_syntax(registry, options).unwrap_or_else(|| {
            let keys = registry.normalize(properties);
            if keys.is_empty() {
                first_registered(registry)
            } else {
                registry.resolve_syntax(keys, options.register)
            }
        });
        Self::bind(syntax, separator, properties)
    }

    /// The syntax these values are bound to.
    pub fn syntax(&self) -> &Syntax {
        &self.syntax
    }

    /// Separator captured at construction.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Ordered property → value map.
    pub fn values(&self) -> &Properties {
        &self.values
    }

    /// Value of one property.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Canonical key of this identifier's syntax.
    pub fn canonical_key(&self) -> String {
        self.syntax.canonical_key(&self.separator)
    }

    /// Compares `other` against this identifier's properties.
    ///
    /// Only the names in this identifier's syntax are checked, so the result
    /// is directional: `a.is_same(&b)` and `b.is_same(&a)` may differ when the
    /// two carry different property sets. Strings are parsed positionally
    /// under this identifier's own syntax.
    pub fn is_same<'a>(&self, other: impl Into<IdentifierInput<'a>>) -> bool {
        self.compare(other.into(), &self.syntax)
    }

    /// [`is_same`](Self::is_same) with a syntax override for string input.
    ///
    /// A string is reinterpreted under `syntax` instead of failing when shapes
    /// disagree. The override resolves against `registry` the same way an
    /// explicit syntax does at construction, so a registered name set is read
    /// in its registered order; it is never registered here.
    pub fn is_same_with<'a>(
        &self,
        other: impl Into<IdentifierInput<'a>>,
        registry: &SyntaxRegistry,
        syntax: Option<&SyntaxInput>,
    ) -> bool {
        let resolved = syntax
            .map(|input| Syntax::normalize(input, &self.separator))
            .filter(|syntax| !syntax.is_empty())
            .map(|syntax| registry.resolve_syntax(syntax, false));
        self.compare(other.into(), resolved.as_ref().unwrap_or(&self.syntax))
    }

    /// `text_syntax` only applies to string input.
    fn compare(&self, other: IdentifierInput<'_>, text_syntax: &Syntax) -> bool {
        match other {
            IdentifierInput::Identifier(other) => self.matches(&other.values),
            IdentifierInput::Properties(properties) => self.matches(properties),
            IdentifierInput::Set(set) => self.matches(&set.to_properties()),
            IdentifierInput::Text(text) => {
                self.matches(&positional(text, text_syntax, &self.separator))
            }
        }
    }

    fn matches(&self, candidate: &Properties) -> bool {
        self.values
            .iter()
            .all(|(name, value)| candidate.get(name) == Some(value))
    }

    /// Values joined by `separator` in syntax order.
    pub fn to_string_with(&self, separator: &str) -> String {
        let values: Vec<&str> = self.values.values().map(String::as_str).collect();
        values.join(separator)
    }

    /// Syntax names joined by this identifier's separator.
    pub fn to_syntax_string(&self) -> String {
        self.syntax.to_syntax_string(&self.separator)
    }

    /// Syntax names joined by `separator`.
    pub fn to_syntax_string_with(&self, separator: &str) -> String {
        self.syntax.to_syntax_string(separator)
    }

    /// Flat JSON object of property → value.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.values
                .iter()
                .map(|(name, value)| (name.clone(), Value::String(value.clone())))
                .collect(),
        )
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(&self.separator))
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}

/// Applies the caller's separator request and returns the registry's separator.
pub(crate) fn claim_separator(registry: &SyntaxRegistry, options: &IdentOptions) -> String {
    if let Some(separator) = &options.separator {
        registry.set_separator(separator.clone());
    }
    registry.separator().to_string()
}

/// Resolves the explicit syntax option, if it normalizes to anything.
pub(crate) fn explicit_syntax(registry: &SyntaxRegistry, options: &IdentOptions) -> Option<Syntax> {
    let input = options.syntax.as_ref()?;
    let syntax = Syntax::normalize(input, registry.separator());
    if syntax.is_empty() {
        return None;
    }
    Some(registry.resolve_syntax(syntax, options.register))
}

fn first_registered(registry: &SyntaxRegistry) -> Syntax {
    registry
        .syntaxes()
        .into_iter()
        .next()
        .unwrap_or_else(Syntax::sentinel)
}

fn infer_from_arity(registry: &SyntaxRegistry, segments: usize) -> Syntax {
    let syntaxes = registry.syntaxes();
    let inferred = syntaxes
        .iter()
        .find(|syntax| syntax.len() == segments)
        .or_else(|| syntaxes.first())
        .cloned()
        .unwrap_or_else(Syntax::sentinel);
    trace!(segments, syntax = ?inferred.names(), "inferred syntax for string input");
    inferred
}

/// Assigns separator-split segments to syntax names in order.
fn positional(text: &str, syntax: &Syntax, separator: &str) -> Properties {
    let segments = split(text, separator);
    if segments.len() > syntax.len() {
        trace!(
            segments = segments.len(),
            names = syntax.len(),
            "dropping segments beyond the syntax"
        );
    }
    syntax
        .names()
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let value = match segments.get(idx) {
                Some(segment) if !segment.is_empty() => segment,
                _ => PLACEHOLDER,
            };
            (name.clone(), value.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::properties;
    use serde_json::json;

    fn registry() -> SyntaxRegistry {
        let registry = SyntaxRegistry::new();
        registry.register(["type/id", "username/domain"]);
        registry
    }

    #[test]
    fn string_input_binds_positionally() {
        let id = Identifier::new(
            "value1",
            &SyntaxRegistry::new(),
            &IdentOptions::with_syntax(["type1"]),
        );
        assert_eq!(id.to_string(), "value1");
        assert_eq!(id.to_syntax_string(), "type1");
    }

    #[test]
    fn empty_string_yields_placeholder() {
        let id = Identifier::new("", &SyntaxRegistry::new(), &IdentOptions::with_syntax(["type1"]));
        assert_eq!(id.to_json(), json!({"type1": "UNDEFINED"}));
    }

    #[test]
    fn short_string_pads_with_placeholder() {
        let id = Identifier::new("user", &registry(), &IdentOptions::with_syntax("type/id"));
        assert_eq!(id.to_json(), json!({"type": "user", "id": "UNDEFINED"}));
        assert_eq!(id.to_string(), "user/UNDEFINED");
    }

    #[test]
    fn extra_segments_are_dropped() {
        let id = Identifier::new("user/123/extra", &registry(), &IdentOptions::with_syntax("type/id"));
        assert_eq!(id.to_string(), "user/123");
    }

    #[test]
    fn string_without_syntax_uses_matching_arity() {
        let registry = SyntaxRegistry::new();
        registry.register(["email", "type/id"]);
        let id = Identifier::new("user/123", &registry, &IdentOptions::default());
        assert_eq!(id.to_syntax_string(), "type/id");

        let single = Identifier::new("a@b.com", &registry, &IdentOptions::default());
        assert_eq!(single.to_syntax_string(), "email");
    }

    #[test]
    fn string_on_fresh_registry_binds_to_sentinel() {
        let id = Identifier::new("abc", &SyntaxRegistry::new(), &IdentOptions::default());
        assert!(id.syntax().is_sentinel());
        assert_eq!(id.to_json(), json!({"UNDEFINED": "abc"}));
    }

    #[test]
    fn explicit_syntax_resolves_to_registered_order() {
        let id = Identifier::new("user/123", &registry(), &IdentOptions::with_syntax("id/type"));
        assert_eq!(id.to_syntax_string(), "type/id");
        assert_eq!(id.get("type"), Some("user"));
    }

    #[test]
    fn properties_resolve_syntax_from_keys() {
        let props = properties([("id", "123"), ("type", "user")]);
        let id = Identifier::new(&props, &registry(), &IdentOptions::default());
        assert_eq!(id.to_syntax_string(), "type/id");
        assert_eq!(id.to_string(), "user/123");
    }

    #[test]
    fn unregistered_keys_become_a_sorted_ad_hoc_syntax() {
        let registry = registry();
        let props = properties([("zone", "eu"), ("host", "a")]);
        let id = Identifier::new(&props, &registry, &IdentOptions::default());
        assert_eq!(id.to_syntax_string(), "host/zone");
        assert!(!registry.contains("host/zone"));

        Identifier::new(&props, &registry, &IdentOptions::default().registering());
        assert!(registry.contains("host/zone"));
    }

    #[test]
    fn missing_property_is_placeholder() {
        let props = properties([("type", "user")]);
        let id = Identifier::new(&props, &registry(), &IdentOptions::with_syntax("type/id"));
        assert_eq!(id.to_json()["id"], "UNDEFINED");
        assert_eq!(id.values().len(), 2);
    }

    #[test]
    fn copy_preserves_everything() {
        let original = Identifier::new("user/123", &registry(), &IdentOptions::with_syntax("type/id"));
        let copy = Identifier::new(&original, &registry(), &IdentOptions::default());
        assert_eq!(copy, original);
    }

    #[test]
    fn is_same_is_directional() {
        let registry = SyntaxRegistry::new();
        let wide = Identifier::new(
            &properties([("type", "user"), ("id", "123")]),
            &registry,
            &IdentOptions::default(),
        );
        let narrow = Identifier::new(
            &properties([("id", "123")]),
            &registry,
            &IdentOptions::default(),
        );
        assert!(narrow.is_same(&wide));
        assert!(!wide.is_same(&narrow));
    }

    #[test]
    fn is_same_parses_strings_with_own_syntax() {
        let id = Identifier::new(
            &properties([("type", "user"), ("id", "123")]),
            &registry(),
            &IdentOptions::default(),
        );
        assert!(id.is_same("user/123"));
        assert!(!id.is_same("123/user"));
    }

    #[test]
    fn syntax_override_resolves_like_construction() {
        let registry = registry();
        let id = Identifier::new(
            &properties([("type", "user"), ("id", "123")]),
            &registry,
            &IdentOptions::default(),
        );
        let reversed = SyntaxInput::from("id/type");
        let built = Identifier::new("123/user", &registry, &IdentOptions::with_syntax("id/type"));

        // "id/type" names the registered "type/id", so both paths read type=123.
        assert_eq!(built.to_syntax_string(), "type/id");
        assert!(!id.is_same(&built));
        assert!(!id.is_same_with("123/user", &registry, Some(&reversed)));
        assert!(id.is_same_with("user/123", &registry, Some(&reversed)));
    }

    #[test]
    fn unregistered_override_is_used_as_given() {
        let registry = SyntaxRegistry::new();
        let id = Identifier::new(
            &properties([("type", "user"), ("id", "123")]),
            &registry,
            &IdentOptions::default(),
        );
        assert_eq!(id.to_syntax_string(), "id/type");

        let type_id = SyntaxInput::from("type/id");
        assert!(id.is_same_with("user/123", &registry, Some(&type_id)));
        assert!(!registry.contains("type/id"));
    }

    #[test]
    fn is_same_compares_property_maps() {
        let id = Identifier::new("a/b.com", &registry(), &IdentOptions::with_syntax("username/domain"));
        assert!(id.is_same(&properties([("domain", "b.com"), ("username", "a"), ("x", "y")])));
        assert!(!id.is_same(&properties([("username", "a")])));
    }

    #[test]
    fn separator_override_applies_to_projection_only() {
        let id = Identifier::new("user/123", &registry(), &IdentOptions::with_syntax("type/id"));
        assert_eq!(id.to_string_with(":"), "user:123");
        assert_eq!(id.to_syntax_string_with(":"), "type:id");
        assert_eq!(id.separator(), "/");
    }

    #[test]
    fn first_constructor_claims_the_separator() {
        let registry = SyntaxRegistry::new();
        let first = Identifier::new(
            "user:123",
            &registry,
            &IdentOptions::with_syntax("type:id").separated_by(":"),
        );
        let second = Identifier::new(
            "user|123",
            &registry,
            &IdentOptions::with_syntax("type:id").separated_by("|"),
        );
        assert_eq!(first.to_json(), json!({"type": "user", "id": "123"}));
        assert_eq!(second.separator(), ":");
        assert_eq!(second.to_json(), json!({"type": "user|123", "id": "UNDEFINED"}));
    }

    #[test]
    fn serializes_as_flat_ordered_object() {
        let id = Identifier::new("user/123", &registry(), &IdentOptions::with_syntax("type/id"));
        assert_eq!(serde_json::to_string(&id).unwrap(), r#"{"type":"user","id":"123"}"#);
    }
}
