use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::request::domain::operation::Operation;
use crate::shared::credentials::ConfigError;
use crate::transport::domain::transport::TransportError;

/// Every failure the client can surface to its caller.
#[derive(Error, Debug)]
pub enum FaceApiError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid usage: {0}")]
    Usage(String),
    #[error("failed to read image file {path}: {source}")]
    ImageFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error("unexpected response from {operation}: {reason}")]
    ResponseShape { operation: Operation, reason: String },
    #[error("no face detected in the submitted image")]
    NoFaceDetected,
    #[error("group {group} has no current trained model: {detail}")]
    StaleModel { group: String, detail: String },
    #[error("training session {session_id} did not reach a terminal status within {elapsed:?}")]
    TrainTimeout { session_id: String, elapsed: Duration },
    #[error("operation cancelled")]
    Cancelled,
}

impl FaceApiError {
    pub(crate) fn usage(message: impl Into<String>) -> Self {
        FaceApiError::Usage(message.into())
    }

    pub(crate) fn shape(operation: Operation, reason: impl Into<String>) -> Self {
        FaceApiError::ResponseShape {
            operation,
            reason: reason.into(),
        }
    }

    /// The remote error kind, if this is a remote failure.
    pub fn remote_kind(&self) -> Option<RemoteErrorKind> {
        match self {
            FaceApiError::Remote(e) => Some(e.kind),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorKind {
    RateLimited,
    Unauthorized,
    NotFound,
    InvalidParameter,
    Other,
}

impl RemoteErrorKind {
    /// HTTP status decides first; the remote's error text refines
    /// statuses that don't map to a kind on their own.
    pub fn classify(http_status: u16, message: &str) -> Self {
        match http_status {
            401 | 403 => return RemoteErrorKind::Unauthorized,
            404 => return RemoteErrorKind::NotFound,
            429 => return RemoteErrorKind::RateLimited,
            _ => {}
        }

        let upper = message.to_ascii_uppercase();
        if upper.contains("NOT_FOUND") || upper.contains("NOT_EXIST") {
            RemoteErrorKind::NotFound
        } else if upper.contains("TOO_BUSY") || upper.contains("CONCURRENCY") {
            RemoteErrorKind::RateLimited
        } else if upper.contains("AUTHORIZATION") || upper.contains("PERMISSION") {
            RemoteErrorKind::Unauthorized
        } else if upper.contains("INVALID")
            || upper.contains("MISSING")
            || upper.contains("BAD_")
            || matches!(http_status, 400 | 413)
        {
            RemoteErrorKind::InvalidParameter
        } else {
            RemoteErrorKind::Other
        }
    }
}

/// A non-success answer from the remote that carried a parseable error.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{operation} rejected by remote (HTTP {http_status}, {kind:?}): {message}")]
pub struct RemoteError {
    pub operation: Operation,
    pub http_status: u16,
    pub error_code: Option<i64>,
    pub message: String,
    pub kind: RemoteErrorKind,
}

impl RemoteError {
    pub fn new(
        operation: Operation,
        http_status: u16,
        error_code: Option<i64>,
        message: impl Into<String>,
    ) -> Self {
        let message = message.into();
        Self {
            operation,
            http_status,
            error_code,
            kind: RemoteErrorKind::classify(http_status, &message),
            message,
        }
    }
}
