//! Registry configuration loaded from TOML.
//!
//! ```toml
//! separator = ":"
//! strict = true
//! syntaxes = ["type:id", ["username", "domain"]]
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::registry::SyntaxRegistry;
use crate::syntax::SyntaxInput;
use crate::validation::{validate_syntax, ValidationError};

/// Errors raised while loading or applying a [`RegistryConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration is not valid TOML or has the wrong shape.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// A syntax failed strict validation.
    #[error("invalid syntax #{index}: {source}")]
    Syntax {
        /// Zero-based position in `syntaxes`.
        index: usize,
        /// Validation failure.
        source: ValidationError,
    },
}

/// Separator and syntaxes to seed a registry with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// Separator to claim (default: `/`).
    pub separator: Option<String>,
    /// Validate every syntax before registering any (default: false).
    pub strict: bool,
    /// Syntaxes to register, as joined strings or name lists.
    pub syntaxes: Vec<SyntaxInput>,
}

impl RegistryConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Applies this configuration to `registry`.
    ///
    /// The separator follows the registry's first-write-wins rule. In strict
    /// mode nothing is registered unless every syntax validates. Returns the
    /// number of newly registered syntaxes.
    pub fn apply(&self, registry: &SyntaxRegistry) -> Result<usize, ConfigError> {
        if let Some(separator) = &self.separator {
            registry.set_separator(separator.clone());
        }
        if self.strict {
            for (index, input) in self.syntaxes.iter().enumerate() {
                let syntax = registry.normalize(input.clone());
                validate_syntax(&syntax, registry.separator())
                    .map_err(|source| ConfigError::Syntax { index, source })?;
            }
        }
        let added = registry.register(self.syntaxes.iter().cloned());
        info!(added, total = registry.len(), "applied registry configuration");
        Ok(added)
    }

    /// Builds a fresh registry with this configuration applied.
    pub fn build(&self) -> Result<SyntaxRegistry, ConfigError> {
        let registry = SyntaxRegistry::new();
        self.apply(&registry)?;
        Ok(registry)
    }
}
