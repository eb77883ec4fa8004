//! Error types for the report client

use thiserror::Error;

/// Report client error
#[derive(Debug, Error)]
pub enum Error {
    /// Request failed before a response was obtained
    #[error("transport error: {0}")]
    Transport(String),

    /// Server returned a non-2xx response
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Response parsed but did not match the expected shape
    #[error("decode error: {0}")]
    Decode(String),

    /// Report detail failed the completeness check
    #[error("report sections empty")]
    IncompleteReport,

    /// Client was constructed with unusable configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Human-readable message for display to the user.
    ///
    /// For HTTP errors this is the server's `detail` text when one was
    /// present, otherwise "<status> - <status text>".
    pub fn message(&self) -> String {
        match self {
            Error::Transport(msg) => msg.clone(),
            Error::Http { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Error::Decode(e.to_string())
        } else {
            Error::Transport(e.to_string())
        }
    }
}

/// Result type for report client operations
pub type Result<T> = std::result::Result<T, Error>;
