// SPDX-License-Identifier: MPL-2.0

use thiserror::Error;

/// Errors produced while reading option lists from the LMS API.
///
/// Cloneable so a failed fetch can travel back through an application
/// message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, refused, timeout).
    #[error("connection failed: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("server returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not JSON, or held no entity array.
    #[error("invalid response: {0}")]
    MalformedPayload(String),

    /// The configured base URL or endpoint could not be turned into a URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Returns true for failures caused by the network rather than the payload.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_) | ApiError::Status { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::MalformedPayload(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}
