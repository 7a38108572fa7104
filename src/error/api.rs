//! Failures of a request/response call to the rules service.

use thiserror::Error;

use super::category::ErrorCategory;
use super::network::NetworkError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed.
    #[error("{operation}: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: NetworkError,
    },

    /// The service answered with a non-success status. No server-side effect.
    #[error("{operation}: rejected with HTTP {status}: {message}")]
    Rejected {
        operation: &'static str,
        status: u16,
        message: String,
    },

    /// A success status with a body that is not the expected shape.
    #[error("{operation}: malformed response body: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{operation}: failed to encode request: {source}")]
    Encode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub fn operation(&self) -> &'static str {
        match self {
            ApiError::Transport { operation, .. }
            | ApiError::Rejected { operation, .. }
            | ApiError::Decode { operation, .. }
            | ApiError::Encode { operation, .. } => operation,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ApiError::Transport { .. } => ErrorCategory::Network,
            ApiError::Rejected { .. } => ErrorCategory::Server,
            ApiError::Decode { .. } | ApiError::Encode { .. } => ErrorCategory::Client,
        }
    }

    /// A transport failure that may clear up on its own.
    pub fn is_transient(&self) -> bool {
        matches!(self, ApiError::Transport { source, .. } if source.is_transient())
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Transport { source, .. } => source.error_code(),
            ApiError::Rejected { .. } => "E_API_REJECTED",
            ApiError::Decode { .. } => "E_API_DECODE",
            ApiError::Encode { .. } => "E_API_ENCODE",
        }
    }
}
