//! Errors surfaced by the explorer gateway

use thiserror::Error;

/// Why a single request failed.
#[derive(Debug, Error)]
pub enum RequestCause {
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("http status {0}")]
    Status(u16),
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A failed gateway call, tagged with the remote resource it was addressed to.
#[derive(Debug, Error)]
#[error("request to {resource} failed: {cause}")]
pub struct RequestError {
    pub resource: &'static str,
    #[source]
    pub cause: RequestCause,
}

impl RequestError {
    pub fn new(resource: &'static str, cause: impl Into<RequestCause>) -> Self {
        Self {
            resource,
            cause: cause.into(),
        }
    }

    pub fn status(resource: &'static str, code: u16) -> Self {
        Self {
            resource,
            cause: RequestCause::Status(code),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.cause, RequestCause::Status(404))
    }
}

pub type RequestResult<T> = std::result::Result<T, RequestError>;
