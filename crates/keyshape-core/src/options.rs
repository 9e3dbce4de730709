use serde::Deserialize;

use crate::syntax::SyntaxInput;

/// Options accepted by every identifier and identifier-set constructor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IdentOptions {
    /// Explicit syntax (names or separator-joined string); inferred when absent.
    pub syntax: Option<SyntaxInput>,
    /// Whether an unknown syntax gets registered (default: false).
    pub register: bool,
    /// Separator to claim; only effective if the registry has none yet.
    pub separator: Option<String>,
}

impl IdentOptions {
    /// Options carrying an explicit syntax.
    pub fn with_syntax(syntax: impl Into<SyntaxInput>) -> Self {
        Self {
            syntax: Some(syntax.into()),
            ..Self::default()
        }
    }

    /// Enables registration of unknown syntaxes.
    pub fn registering(mut self) -> Self {
        self.register = true;
        self
    }

    /// Requests `separator` for the registry.
    pub fn separated_by(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }
}
