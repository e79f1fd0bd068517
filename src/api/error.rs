//! Errors raised by the remote clients

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// No token in local storage; the request is never sent
    #[error("not authenticated: no token stored")]
    MissingToken,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a non-success status; `body` is kept for the log
    #[error("server responded {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("invalid base url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}
