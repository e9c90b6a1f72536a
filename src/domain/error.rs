//! Error types for the shopsearch plugin.
//!
//! [`SearchError`] is the crate-wide error and [`Result`] the matching alias.
//! API failures are a separate type, [`ApiFailure`](crate::api::ApiFailure),
//! carried inside response events and only ever logged.

use thiserror::Error;

/// The message shown to the user whenever any API operation fails.
///
/// The screen does not distinguish between transport, server or
/// decoding problems; the precise cause only goes to the trace log.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// The main error type for shopsearch operations.
///
/// # Examples
///
/// ```
/// use shopsearch::domain::SearchError;
/// use shopsearch::Theme;
///
/// let err = Theme::from_file("/no/such/theme.toml").unwrap_err();
/// assert!(matches!(err, SearchError::Io(_)));
/// ```
#[derive(Debug, Error)]
pub enum SearchError {
    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A request body could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),
}

/// A specialized `Result` type for shopsearch operations.
pub type Result<T> = std::result::Result<T, SearchError>;
