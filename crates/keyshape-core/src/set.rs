use std::fmt;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::debug;

use crate::identifier::{claim_separator, Identifier};
use crate::input::{IdentifierInput, Properties};
use crate::options::IdentOptions;
use crate::registry::SyntaxRegistry;

/// One entity viewed under every syntax that applies to it.
///
/// Members are keyed by canonical syntax key. All members come from the same
/// raw value, so they agree on every property they share.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierSet {
    members: IndexMap<String, Identifier>,
}

impl IdentifierSet {
    /// Builds a set from a string, property map, identifier or another set.
    ///
    /// A property map yields one member per registered syntax whose names are
    /// all present as keys, in registration order. When none applies the map's
    /// own key set is used as an ad-hoc syntax, registered only when
    /// `options.register` is set. An explicit syntax yields a single member.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyshape_core::{properties, IdentOptions, IdentifierSet, SyntaxRegistry};
    ///
    /// let registry = SyntaxRegistry::new();
    /// registry.register(["type/id", "username/domain"]);
    ///
    /// let user = properties([("type", "user"), ("id", "123"), ("username", "a"), ("domain", "b.com")]);
    /// let set = IdentifierSet::new(&user, &registry, &IdentOptions::default());
    /// assert_eq!(set.len(), 2);
    /// assert!(set.is_same(&properties([("username", "a"), ("domain", "b.com")])));
    /// ```
    pub fn new<'a>(
        input: impl Into<IdentifierInput<'a>>,
        registry: &SyntaxRegistry,
        options: &IdentOptions,
    ) -> Self {
        match input.into() {
            IdentifierInput::Properties(properties) if options.syntax.is_none() => {
                Self::from_properties(properties, registry, options)
            }
            IdentifierInput::Set(set) if options.syntax.is_none() => set.clone(),
            other => Self::from(Identifier::new(other, registry, options)),
        }
    }

    fn from_properties(
        properties: &Properties,
        registry: &SyntaxRegistry,
        options: &IdentOptions,
    ) -> Self {
        let separator = claim_separator(registry, options);
        let matching = registry.matching(properties);
        if matching.is_empty() {
            debug!(
                keys = ?properties.keys().collect::<Vec<_>>(),
                register = options.register,
                "no registered syntax applies; using the key set"
            );
            return Self::from(Identifier::new(properties, registry, options));
        }
        matching
            .into_iter()
            .map(|syntax| Identifier::bind(syntax, separator.clone(), properties))
            .collect()
    }

    /// Adopts a prebuilt canonical-key → identifier map as is.
    pub fn from_members(members: IndexMap<String, Identifier>) -> Self {
        Self { members }
    }

    /// True when any member reports equality with `other`.
    pub fn is_same<'a>(&self, other: impl Into<IdentifierInput<'a>>) -> bool {
        let other = other.into();
        self.members.values().any(|member| member.is_same(other))
    }

    /// [`is_same`](Self::is_same) with a syntax override for string input,
    /// resolved against `registry` and forwarded to every member.
    pub fn is_same_with<'a>(
        &self,
        other: impl Into<IdentifierInput<'a>>,
        registry: &SyntaxRegistry,
        syntax: Option<&crate::syntax::SyntaxInput>,
    ) -> bool {
        let other = other.into();
        self.members
            .values()
            .any(|member| member.is_same_with(other, registry, syntax))
    }

    /// Number of member identifiers.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True when the set has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member bound to the syntax with canonical key `key`.
    pub fn get(&self, key: &str) -> Option<&Identifier> {
        self.members.get(key)
    }

    /// First member in iteration order.
    pub fn first(&self) -> Option<&Identifier> {
        self.members.values().next()
    }

    /// Iterates `(canonical key, identifier)` pairs in matching order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Identifier)> {
        self.members.iter().map(|(key, id)| (key.as_str(), id))
    }

    /// Every member's values merged into one map; later members win on collision.
    pub fn to_properties(&self) -> Properties {
        let mut merged = Properties::new();
        for member in self.members.values() {
            for (name, value) in member.values() {
                merged.insert(name.clone(), value.clone());
            }
        }
        merged
    }

    /// Flat JSON object of the merged values.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.to_properties()
                .into_iter()
                .map(|(name, value)| (name, Value::String(value)))
                .collect(),
        )
    }
}

impl From<Identifier> for IdentifierSet {
    fn from(identifier: Identifier) -> Self {
        std::iter::once(identifier).collect()
    }
}

impl FromIterator<Identifier> for IdentifierSet {
    fn from_iter<T: IntoIterator<Item = Identifier>>(iter: T) -> Self {
        let members = iter
            .into_iter()
            .map(|identifier| (identifier.canonical_key(), identifier))
            .collect();
        Self { members }
    }
}

impl fmt::Display for IdentifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.members.values().map(Identifier::to_string).collect();
        f.write_str(&rendered.join(" "))
    }
}

impl Serialize for IdentifierSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_properties().serialize(serializer)
    }
}
