use serde::{Deserialize, Serialize};

use crate::input::Properties;

/// Separator used when no caller has claimed one.
pub const DEFAULT_SEPARATOR: &str = "/";

/// Literal that stands in for any missing property value, and the single
/// name of the sentinel syntax held by an empty registry.
pub const PLACEHOLDER: &str = "UNDEFINED";

/// Ordered list of distinct property names describing one identifier shape.
///
/// Two syntaxes describe the same shape when their name sets are equal; the
/// declared order only matters for display and positional parsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Syntax(Vec<String>);

impl Syntax {
    /// Creates a syntax from already-normalized names; callers are responsible for conformity.
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    /// The sentinel syntax `["UNDEFINED"]`.
    pub fn sentinel() -> Self {
        Self(vec![PLACEHOLDER.to_string()])
    }

    /// Normalizes any syntax input against `separator`.
    ///
    /// Joined strings are split on the separator, key lists are sorted, empty
    /// segments are dropped and repeated names keep their first position. The
    /// result may be empty.
    pub fn normalize(input: &SyntaxInput, separator: &str) -> Self {
        let names: Vec<String> = match input {
            SyntaxInput::Joined(joined) => distinct(split(joined, separator)),
            SyntaxInput::Names(names) => distinct(names.iter().map(String::as_str)),
            SyntaxInput::Keys(keys) => {
                let mut keys: Vec<String> =
                    keys.iter().filter(|k| !k.is_empty()).cloned().collect();
                keys.sort();
                keys
            }
        };
        Self(names)
    }

    /// Property names in declared order.
    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Number of property names.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when normalization left no names.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when `name` is one of this syntax's properties.
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    /// True for the `["UNDEFINED"]` sentinel.
    pub fn is_sentinel(&self) -> bool {
        self.0.len() == 1 && self.0[0] == PLACEHOLDER
    }

    /// Name-set equality: same size, same members, order ignored.
    pub fn same_names(&self, other: &Syntax) -> bool {
        self.len() == other.len() && other.0.iter().all(|name| self.contains(name))
    }

    /// Sorted names joined by `separator`; the registry's deduplication key.
    pub fn canonical_key(&self, separator: &str) -> String {
        let mut sorted: Vec<&str> = self.0.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        sorted.join(separator)
    }

    /// Names in declared order joined by `separator`.
    pub fn to_syntax_string(&self, separator: &str) -> String {
        self.0.join(separator)
    }

    /// True when every name is a key of `properties`.
    pub fn is_satisfied_by(&self, properties: &Properties) -> bool {
        self.0.iter().all(|name| properties.contains_key(name))
    }
}

impl From<Syntax> for Vec<String> {
    fn from(syntax: Syntax) -> Self {
        syntax.0
    }
}

impl AsRef<[String]> for Syntax {
    fn as_ref(&self) -> &[String] {
        &self.0
    }
}

/// Raw syntax description accepted by the registry and constructors.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SyntaxInput {
    /// Separator-joined names, e.g. `"type/id"`.
    Joined(String),
    /// Names in declared order.
    Names(Vec<String>),
    /// Keys of a property map; order is not trusted and gets sorted.
    Keys(Vec<String>),
}

impl SyntaxInput {
    /// Input that normalizes to an empty syntax.
    pub fn empty() -> Self {
        SyntaxInput::Names(Vec::new())
    }
}

impl From<&str> for SyntaxInput {
    fn from(value: &str) -> Self {
        SyntaxInput::Joined(value.to_string())
    }
}

impl From<String> for SyntaxInput {
    fn from(value: String) -> Self {
        SyntaxInput::Joined(value)
    }
}

impl From<Vec<String>> for SyntaxInput {
    fn from(value: Vec<String>) -> Self {
        SyntaxInput::Names(value)
    }
}

impl From<&[&str]> for SyntaxInput {
    fn from(value: &[&str]) -> Self {
        SyntaxInput::Names(value.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for SyntaxInput {
    fn from(value: [&str; N]) -> Self {
        SyntaxInput::Names(value.iter().map(|s| s.to_string()).collect())
    }
}

impl From<&Syntax> for SyntaxInput {
    fn from(value: &Syntax) -> Self {
        SyntaxInput::Names(value.0.clone())
    }
}

impl From<Syntax> for SyntaxInput {
    fn from(value: Syntax) -> Self {
        SyntaxInput::Names(value.0)
    }
}

impl From<&Properties> for SyntaxInput {
    fn from(value: &Properties) -> Self {
        SyntaxInput::Keys(value.keys().cloned().collect())
    }
}

fn distinct<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for name in names {
        if !name.is_empty() && !out.iter().any(|seen| seen == name) {
            out.push(name.to_string());
        }
    }
    out
}

/// Splits on `separator`, treating an empty separator as "no split".
pub(crate) fn split<'a>(value: &'a str, separator: &str) -> Vec<&'a str> {
    if separator.is_empty() {
        vec![value]
    } else {
        value.split(separator).collect()
    }
}
