//! Application error types.
//!
//! All errors use `thiserror` for automatic Error trait derivation and provide
//! clear error messages with context.

use thiserror::Error;

/// Application result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for envelope building and the Process Manager API glue.
#[derive(Error, Debug)]
pub enum Error {
    /// Rejected caller input. The only kind the envelope builder raises.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration could not be assembled.
    #[error("configuration error: {0}")]
    Config(String),

    /// Login page did not carry an anti-forgery token.
    #[error("could not find __RequestVerificationToken in login response")]
    TokenNotFound,

    /// Non-2xx response from the Process Manager API.
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Transport-level HTTP failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization/deserialization errors.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for caller input rejected before any work was done.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

// Convenience constructors
impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}
