//! API Errors

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised by backend calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    ///
    /// Displays exactly the message extracted from the response body.
    #[error("{message}")]
    Status {
        /// HTTP status code.
        status: u16,

        /// Message reported by the backend.
        message: String,
    },

    /// The request was rejected before it was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The response body did not have the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The backend returned no payload where one was required.
    #[error("response had no body")]
    EmptyBody,

    /// The configured base URL or a request path is not a valid URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// HTTP status of a backend rejection, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the backend reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
