use thiserror::Error;

use crate::request::domain::request_params::EncodedRequest;

/// Raw HTTP answer. Non-2xx statuses are not errors at this layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to read response from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// For custom [`Transport`] implementations that fail without a
    /// `reqwest::Error`, e.g. a closed connection pool or a proxy refusal.
    #[error("transport unavailable: {0}")]
    Unavailable(String),
}

/// Performs one HTTP round-trip for an encoded request.
///
/// Implementations must be safe to share between threads; the client
/// holds one for its whole lifetime.
pub trait Transport: Send + Sync {
    fn send(&self, request: &EncodedRequest<'_>) -> Result<TransportResponse, TransportError>;
}
