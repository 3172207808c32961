//! API Error Types
//!
//! Errors produced while talking to the DupeTube REST API. The controller
//! only distinguishes two outcomes: the server answered with a rejection, or
//! no usable answer arrived at all.

use thiserror::Error;

/// Errors returned by [`DupeTubeApi`](super::DupeTubeApi) calls
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The server responded with a non-2xx status
    #[error("{message}")]
    ServerRejected { status: u16, message: String },

    /// No usable response: connection failure, timeout, malformed body
    #[error("API unreachable: {0}")]
    Unreachable(String),

    /// The HTTP client could not be constructed
    #[error("HTTP client setup failed: {0}")]
    Setup(String),
}

impl ApiError {
    /// Text shown to the user for this failure.
    ///
    /// Server rejections are shown verbatim; everything else falls back to
    /// the action's generic retry message.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::ServerRejected { message, .. } => message.clone(),
            ApiError::Unreachable(_) | ApiError::Setup(_) => fallback.to_string(),
        }
    }

    /// HTTP status of a server rejection
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::ServerRejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unreachable(&self) -> bool {
        matches!(self, ApiError::Unreachable(_) | ApiError::Setup(_))
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Unreachable("request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Unreachable(format!("connection failed: {}", err))
        } else if err.is_decode() {
            ApiError::Unreachable(format!("malformed response: {}", err))
        } else {
            ApiError::Unreachable(err.to_string())
        }
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
