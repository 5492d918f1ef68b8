//! Errors raised while calling a remote model.

use photo_graph_core::CoreError;
use thiserror::Error;

/// Failure of one prediction request.
#[derive(Debug, Error)]
pub enum ModelCallError {
    /// The request never produced an HTTP response.
    #[error("transport error: {message}")]
    Transport { message: String, transient: bool },

    /// The endpoint answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response could not be read as a prediction.
    #[error("malformed response: {0}")]
    Protocol(String),
}

impl ModelCallError {
    /// Timeouts, connection failures, 429 and 5xx may succeed on retry.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport { transient, .. } => *transient,
            Self::Status { status, .. } => *status == 429 || (500..600).contains(status),
            Self::Protocol(_) => false,
        }
    }
}

impl From<reqwest::Error> for ModelCallError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::Status {
                status: status.as_u16(),
                body: err.to_string(),
            };
        }
        if err.is_decode() {
            return Self::Protocol(err.to_string());
        }
        Self::Transport {
            transient: err.is_timeout() || err.is_connect() || err.is_request(),
            message: err.to_string(),
        }
    }
}

impl From<ModelCallError> for CoreError {
    fn from(err: ModelCallError) -> Self {
        let transient = err.is_transient();
        CoreError::model(err.to_string(), transient)
    }
}
