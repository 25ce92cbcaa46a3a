//! Error types for the TorBox client.

use reqwest::StatusCode;

use crate::magnet::MagnetError;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything a TorBox call can fail with.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request could not be assembled (wrong body for the declared encoding, bad URL).
    #[error("Failed to build request: {0}")]
    Build(String),

    /// The connection layer failed before a response was received.
    #[error("Transport error: {source}")]
    Transport {
        retryable: bool,
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx status, or an envelope that reported `success: false`.
    #[error("{message}")]
    Api {
        status: Option<StatusCode>,
        message: String,
    },

    /// The response body was not valid JSON for the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The envelope was successful but carried no `data` for a call that needs it.
    #[error("Response for {0} carried no data")]
    MissingData(&'static str),

    #[error(transparent)]
    Magnet(#[from] MagnetError),

    /// A control operation that does not apply to the resolved download category.
    #[error("Operation '{operation}' is not supported for {category} torrents")]
    UnsupportedOperation {
        operation: String,
        category: &'static str,
    },

    #[error("Torrent with ID {0} is neither active nor queued")]
    NotFound(i64),

    /// Any of the above, tagged with the endpoint operation that produced it.
    #[error("Failed to {operation}: {source}")]
    Operation {
        operation: &'static str,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Builds the message for a failed API response from the envelope's
    /// `error` / `detail` strings, falling back to the status code.
    pub fn api(status: Option<StatusCode>, error: &str, detail: &str) -> Self {
        let message = match (error.is_empty(), detail.is_empty()) {
            (false, false) => format!("{} - {}", error, detail),
            (false, true) => error.to_string(),
            (true, false) => detail.to_string(),
            (true, true) => match status {
                Some(status) => format!("server error (status: {})", status.as_u16()),
                None => "unknown error".to_string(),
            },
        };
        Error::Api { status, message }
    }

    /// Wraps this error with the name of the operation that failed.
    pub fn during(self, operation: &'static str) -> Self {
        Error::Operation {
            operation,
            source: Box::new(self),
        }
    }

    /// Whether the underlying failure is a transient network condition.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Transport { retryable, .. } => *retryable,
            Error::Operation { source, .. } => source.is_retryable(),
            _ => false,
        }
    }

    /// HTTP status attached to an API failure, looking through operation wrappers.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } => *status,
            Error::Operation { source, .. } => source.status(),
            _ => None,
        }
    }

    /// The innermost error, with operation wrappers removed.
    pub fn root(&self) -> &Error {
        match self {
            Error::Operation { source, .. } => source.root(),
            other => other,
        }
    }
}
