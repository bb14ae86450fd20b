//! Document parsing: turning one commit's blob into a structured value.
//!
//! [`DefaultParser`] dispatches on the file extension: YAML for `.yml` and
//! `.yaml` (configurable), JSON for everything else. Any closure of the shape
//! `Fn(&str, &[u8]) -> Result<Value, E>` is also a [`DocumentParser`], so
//! callers can substitute their own format without a wrapper type.

use std::error::Error as StdError;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

/// Boxed error returned by custom parsers.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// A document could not be parsed.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ParseError {
    message: String,
    #[source]
    source: BoxError,
}

impl ParseError {
    /// Wrap an underlying parser error with a short description.
    pub fn new(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            message: message.into(),
            source: source.into(),
        }
    }

    /// The underlying error chain rendered as `outer: inner: ...`.
    #[must_use]
    pub fn cause_chain(&self) -> String {
        let mut chain = self.source.to_string();
        let mut next = self.source.source();
        while let Some(err) = next {
            chain.push_str(": ");
            chain.push_str(&err.to_string());
            next = err.source();
        }
        chain
    }
}

/// Parses one version of a document.
pub trait DocumentParser {
    /// Parse `content`, the blob of `path` at some commit.
    ///
    /// # Errors
    /// Returns [`ParseError`] if the content is not a valid document. The
    /// compiler records the failure and moves on to the next commit.
    fn parse(&self, path: &str, content: &[u8]) -> Result<Value, ParseError>;
}

impl<F, E> DocumentParser for F
where
    F: Fn(&str, &[u8]) -> Result<Value, E>,
    E: Into<BoxError>,
{
    fn parse(&self, path: &str, content: &[u8]) -> Result<Value, ParseError> {
        self(path, content).map_err(|e| ParseError::new(format!("custom parser rejected {path}"), e))
    }
}

/// Extensions parsed as YAML by default.
pub const DEFAULT_YAML_EXTENSIONS: &[&str] = &["yml", "yaml"];

/// Extension-dispatching JSON/YAML parser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefaultParser {
    yaml_extensions: Vec<String>,
}

impl Default for DefaultParser {
    fn default() -> Self {
        Self::with_yaml_extensions(DEFAULT_YAML_EXTENSIONS.iter().copied())
    }
}

impl DefaultParser {
    /// A parser treating files with any of `extensions` (without the dot,
    /// compared case-insensitively) as YAML.
    pub fn with_yaml_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            yaml_extensions: extensions
                .into_iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }

    /// `true` if `path` would be parsed as YAML.
    #[must_use]
    pub fn is_yaml(&self, path: &str) -> bool {
        Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.yaml_extensions
                    .iter()
                    .any(|yaml| yaml.eq_ignore_ascii_case(ext))
            })
    }
}

impl DocumentParser for DefaultParser {
    fn parse(&self, path: &str, content: &[u8]) -> Result<Value, ParseError> {
        if self.is_yaml(path) {
            parse_yaml(path, content)
        } else {
            serde_json::from_slice(content)
                .map_err(|e| ParseError::new(format!("invalid JSON in {path}"), e))
        }
    }
}

/// YAML goes through `serde_yaml::Value` so `<<` merge keys are applied
/// before the document is turned into JSON.
fn parse_yaml(path: &str, content: &[u8]) -> Result<Value, ParseError> {
    let mut doc: serde_yaml::Value = serde_yaml::from_slice(content)
        .map_err(|e| ParseError::new(format!("invalid YAML in {path}"), e))?;
    doc.apply_merge()
        .map_err(|e| ParseError::new(format!("invalid YAML merge key in {path}"), e))?;
    serde_json::to_value(doc)
        .map_err(|e| ParseError::new(format!("YAML in {path} has no JSON equivalent"), e))
}
