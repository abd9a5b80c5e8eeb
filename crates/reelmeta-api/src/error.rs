//! Error types shared by the client, the value model and the accessors.

use std::sync::Arc;

use crate::value::{AccessError, DecodeError};

/// Errors returned by remote calls and by decoding their payloads.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The HTTP call itself failed (connection, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The remote service answered with a status other than 200.
    #[error("unexpected HTTP status {code}{}", status_suffix(.message.as_deref()))]
    UnexpectedStatus {
        /// HTTP status code.
        code: u16,
        /// `status_message` from the TMDB error envelope, when present.
        message: Option<String>,
    },

    /// The response was not JSON.
    #[error("unexpected content type: {got:?}")]
    UnexpectedContentType {
        /// Received `Content-Type` header value (empty when missing).
        got: String,
    },

    /// The response body could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A lazy field access failed.
    #[error(transparent)]
    Access(#[from] AccessError),

    /// The shared configuration fetch failed. Every caller waiting on the
    /// same fetch receives the same underlying error.
    #[error("configuration unavailable: {0}")]
    ConfigurationUnavailable(#[source] Arc<Error>),

    /// The request could not be built.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl Error {
    /// Wraps a transport-level failure.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Box::new(err))
    }

    /// Returns the HTTP status code for [`Error::UnexpectedStatus`].
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Formats the optional server message appended to a status error.
fn status_suffix(message: Option<&str>) -> String {
    message.map(|m| format!(": {m}")).unwrap_or_default()
}

/// Result alias with [`Error`] as the default error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;
