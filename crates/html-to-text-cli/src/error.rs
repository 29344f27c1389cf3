//! CLI error types.

use std::io;
use std::path::PathBuf;

use html_to_text::ConversionError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("Error reading file '{}': {source}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error reading stdin: {0}")]
    ReadStdin(#[source] io::Error),

    #[error("Error writing output: {0}")]
    Write(#[from] io::Error),

    #[error("Error reading config '{}': {source}", path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config '{}': {source}", path.display())]
    InvalidConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),

    #[error("{0}")]
    Conversion(#[from] ConversionError),
}
