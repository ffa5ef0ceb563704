//! Error types for the Sveriges Radio client

use std::fmt::Display;

/// Result type alias for Sveriges Radio operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when browsing Sveriges Radio
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request failed or the API answered with an error status
    #[error("Unable to communicate with {url}: {reason}")]
    Transport { url: String, reason: String },

    /// Response body is not the JSON document we expect
    #[error("Unable to parse {what}: {reason}")]
    Parse { what: String, reason: String },

    /// One record of an otherwise valid listing does not have its expected shape
    #[error("Malformed {kind} record at index {index}: {source}")]
    Mapping {
        kind: &'static str,
        index: usize,
        source: serde_json::Error,
    },

    /// A `/Date(...)/` value that cannot be decoded
    #[error("Invalid date value: {0:?}")]
    InvalidDate(String),

    /// A setting value outside of its accepted range
    #[error("Invalid setting value: {0}")]
    InvalidSetting(String),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Path that does not match any menu route
    #[error("Unknown route: {0}")]
    UnknownRoute(String),

    /// Configuration error (from pmoconfig/anyhow)
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),
}

impl Error {
    /// Create a transport error for a request URL
    pub fn transport(url: impl Into<String>, reason: impl Display) -> Self {
        Self::Transport {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a parse error
    pub fn parse(what: impl Into<String>, reason: impl Display) -> Self {
        Self::Parse {
            what: what.into(),
            reason: reason.to_string(),
        }
    }

    /// Failures the user is told about before the listing comes back empty
    pub fn is_reported(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Parse { .. })
    }
}
