use std::path::PathBuf;

use thiserror::Error;

/// Failure to fetch or decode the gallery document.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The configured file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP request failed or returned a non-success status.
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The document is not an array of gallery items.
    #[error("malformed gallery document: {0}")]
    Decode(#[from] serde_json::Error),
}

/// An input line that does not name a known command.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandParseError {
    #[error("unknown command '{0}'")]
    Unknown(String),

    #[error("'{command}' expects {expected}")]
    MissingArgument {
        command: String,
        expected: &'static str,
    },

    #[error("invalid argument '{value}' for '{command}'")]
    InvalidArgument { command: String, value: String },
}
