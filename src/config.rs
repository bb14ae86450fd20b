//! docstory configuration (`docstory.toml`).
//!
//! Missing file → all defaults. Unknown keys are rejected so typos surface
//! instead of being silently ignored.
//!
//! ```toml
//! [history]
//! limit = 500
//!
//! [parse]
//! yaml_extensions = ["yml", "yaml", "cfg"]
//! ```

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::compile::CompileOptions;
use crate::parser::{DEFAULT_YAML_EXTENSIONS, DefaultParser};

/// Default file name looked up at the repository root.
pub const CONFIG_FILE_NAME: &str = "docstory.toml";

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level docstory configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoryConfig {
    /// History walking settings.
    #[serde(default)]
    pub history: HistoryConfig,

    /// Document parsing settings.
    #[serde(default)]
    pub parse: ParseConfig,
}

/// History walking settings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HistoryConfig {
    /// Maximum number of commits enumerated for one file.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
        }
    }
}

const fn default_limit() -> usize {
    docstory_git::DEFAULT_HISTORY_LIMIT
}

/// Document parsing settings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParseConfig {
    /// File extensions parsed as YAML; everything else is parsed as JSON.
    #[serde(default = "default_yaml_extensions")]
    pub yaml_extensions: Vec<String>,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            yaml_extensions: default_yaml_extensions(),
        }
    }
}

fn default_yaml_extensions() -> Vec<String> {
    DEFAULT_YAML_EXTENSIONS
        .iter()
        .map(|ext| (*ext).to_owned())
        .collect()
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error loading or parsing `docstory.toml`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigError {
    /// The path that was being loaded (if available).
    pub path: Option<std::path::PathBuf>,
    /// Human-readable message with line-level detail when possible.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(p) = &self.path {
            write!(f, "{}: {}", p.display(), self.message)
        } else {
            write!(f, "config error: {}", self.message)
        }
    }
}

impl std::error::Error for ConfigError {}

impl StoryConfig {
    /// Load configuration from a TOML file.
    ///
    /// If the file does not exist, returns all defaults.
    ///
    /// # Errors
    /// Returns `ConfigError` on I/O errors (other than not-found), invalid
    /// TOML, or unknown fields.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConfigError {
                    path: Some(path.to_owned()),
                    message: format!("could not read file: {e}"),
                });
            }
        };
        Self::parse(&contents).map_err(|mut e| {
            e.path = Some(path.to_owned());
            e
        })
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `ConfigError` on invalid TOML or unknown fields.
    pub fn parse(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| {
            let mut message = e.message().to_owned();
            if let Some(span) = e.span() {
                let line = toml_str[..span.start]
                    .chars()
                    .filter(|&c| c == '\n')
                    .count()
                    + 1;
                message = format!("line {line}: {message}");
            }
            ConfigError {
                path: None,
                message,
            }
        })
    }

    /// Build compile options from this configuration.
    #[must_use]
    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions::default()
            .with_limit(self.history.limit)
            .with_parser(DefaultParser::with_yaml_extensions(
                &self.parse.yaml_extensions,
            ))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
