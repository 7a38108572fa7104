//! Unified error type for the client.

use thiserror::Error;

use super::api::ApiError;
use super::category::ErrorCategory;
use super::dispatch::DispatchError;

#[derive(Debug, Error)]
pub enum FrontlineError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FrontlineError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FrontlineError::Api(err) => err.category(),
            FrontlineError::Dispatch(_) => ErrorCategory::User,
            FrontlineError::Config(_) => ErrorCategory::Configuration,
            FrontlineError::Io(_) => ErrorCategory::Client,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }
}

/// Result alias for fallible client operations.
pub type FrontlineResult<T> = Result<T, FrontlineError>;
