//! Error types for artifact publishing.
//!
//! Every failure of a logical upload surfaces as a [`PublishError`]. The core
//! relays stat, stream and transport failures without retrying or rewording them.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for publishing operations
pub type Result<T> = std::result::Result<T, PublishError>;

/// Main error type for all publishing operations
#[derive(Error, Debug)]
pub enum PublishError {
    /// The artifact could not be stat'ed (missing or inaccessible)
    #[error("Cannot stat artifact {path}: {source}")]
    Stat {
        /// Path of the artifact
        path: PathBuf,
        /// Underlying filesystem error
        #[source]
        source: std::io::Error,
    },

    /// Read stream or sink failure during an attempt
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The shared cancellation token fired while bytes were flowing
    #[error("Upload cancelled")]
    Cancelled,

    /// Caller passed an absent or malformed argument
    #[error("Invalid arguments: {reason}")]
    InvalidArgument {
        /// Reason for the error
        reason: String,
    },

    /// HTTP client errors raised by reqwest based transports
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// Opaque failure reported by a provider transport
    #[error("Upload to {provider} failed: {reason}")]
    Transport {
        /// Provider name
        provider: String,
        /// Reason for the error
        reason: String,
    },
}

/// Marker carried inside [`std::io::Error`] items when a progress stream
/// observes cancellation.
///
/// Stream consumers that only see `io::Error` (for example an HTTP body)
/// still get a readable message; [`PublishError::from_stream_error`] turns it
/// back into [`PublishError::Cancelled`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("upload cancelled")]
pub struct UploadCancelled;

impl UploadCancelled {
    /// Wrap the marker into an `io::Error` suitable for a byte stream item
    pub fn into_io_error(self) -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::Interrupted, self)
    }
}

impl PublishError {
    /// Classify an error item produced by an upload pipeline
    pub fn from_stream_error(error: std::io::Error) -> Self {
        let cancelled = error
            .get_ref()
            .is_some_and(|inner| inner.is::<UploadCancelled>());

        if cancelled {
            PublishError::Cancelled
        } else {
            PublishError::Io(error)
        }
    }

    /// Build an invalid-argument error
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        PublishError::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            PublishError::Stat { path, .. } => vec![
                format!("Check that {} exists and is readable", path.display()),
                "Rebuild the artifact before publishing".to_string(),
            ],
            PublishError::Cancelled => {
                vec!["The publish run was cancelled; start it again to upload".to_string()]
            }
            PublishError::InvalidArgument { .. } => {
                vec!["Pass both the payload and a file name".to_string()]
            }
            PublishError::Http(err) if err.is_timeout() => vec![
                "The provider did not answer in time; retry the upload".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }

    /// Check if another attempt could succeed
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            PublishError::Stat { .. }
                | PublishError::Cancelled
                | PublishError::InvalidArgument { .. }
        )
    }
}

/// Request body failures keep their stream classification.
///
/// A body built by [`crate::RequestProcessor::body`] reports cancellation and
/// read errors as `io::Error` items, which reqwest buries in its source chain.
/// Those come back as [`PublishError::Cancelled`] or [`PublishError::Io`];
/// every other client error stays [`PublishError::Http`].
impl From<reqwest::Error> for PublishError {
    fn from(err: reqwest::Error) -> Self {
        let mut body_failure = err.is_body();
        let mut stream_io = None;

        let mut cause = std::error::Error::source(&err);
        while let Some(current) = cause {
            if current.is::<UploadCancelled>() {
                return PublishError::Cancelled;
            }
            if let Some(io) = current.downcast_ref::<std::io::Error>() {
                if io
                    .get_ref()
                    .is_some_and(|inner| inner.is::<UploadCancelled>())
                {
                    return PublishError::Cancelled;
                }
                stream_io.get_or_insert_with(|| (io.kind(), io.to_string()));
            }
            if let Some(nested) = current.downcast_ref::<reqwest::Error>() {
                body_failure |= nested.is_body();
            }
            cause = current.source();
        }

        match stream_io {
            Some((kind, message)) if body_failure => {
                PublishError::Io(std::io::Error::new(kind, message))
            }
            _ => PublishError::Http(err),
        }
    }
}
