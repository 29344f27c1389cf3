//! Error types for HTML to text conversion.

use thiserror::Error;

use crate::dom::Tag;

/// Error reported by a user-registered [`Handler`](crate::handlers::Handler).
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can abort a conversion.
///
/// Any error discards the partially rendered output; there is no partial-success mode.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// Reading the input failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The HTML parser could not produce a document.
    #[error("HTML parsing error: {0}")]
    Parse(String),

    /// A user-registered handler reported a failure.
    #[error("handler for <{tag}> failed: {source}")]
    Handler {
        /// Tag the failing handler was registered for.
        tag: Tag,
        /// Error returned by the handler.
        #[source]
        source: HandlerError,
    },

    /// An internal precondition was violated.
    #[error("invalid state: {0}")]
    InvalidState(String),
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConversionError>;
