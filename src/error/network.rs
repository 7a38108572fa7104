//! The request never produced a response.

use thiserror::Error;

use crate::traits::HttpError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    #[error("{url} unreachable: {message}")]
    ConnectionFailed { url: String, message: String },
    #[error("{url} did not answer in time")]
    Timeout { url: String },
    #[error("{url} is not a valid service address")]
    InvalidUrl { url: String },
    #[error("{message}")]
    Other { message: String },
}

impl NetworkError {
    /// Attach the requested URL to a transport failure.
    pub fn from_http(err: HttpError, url: &str) -> Self {
        let url = url.to_string();
        match err {
            HttpError::ConnectionFailed(message) => NetworkError::ConnectionFailed { url, message },
            HttpError::Timeout(_) => NetworkError::Timeout { url },
            HttpError::InvalidUrl(_) => NetworkError::InvalidUrl { url },
            HttpError::Body(message) | HttpError::Other(message) => NetworkError::Other { message },
        }
    }

    /// A bad address stays bad; everything else may succeed next time.
    pub fn is_transient(&self) -> bool {
        !matches!(self, NetworkError::InvalidUrl { .. })
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed { .. } => "E_NET_UNREACHABLE",
            NetworkError::Timeout { .. } => "E_NET_TIMEOUT",
            NetworkError::InvalidUrl { .. } => "E_NET_URL",
            NetworkError::Other { .. } => "E_NET_OTHER",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_failure_names_the_url() {
        let err = NetworkError::from_http(
            HttpError::ConnectionFailed("refused".to_string()),
            "http://svc/api/games/g1",
        );
        assert_eq!(err.to_string(), "http://svc/api/games/g1 unreachable: refused");
        assert!(err.is_transient());
        assert_eq!(err.error_code(), "E_NET_UNREACHABLE");
    }

    #[test]
    fn test_bad_address_is_permanent() {
        let err = NetworkError::from_http(HttpError::InvalidUrl("relative".to_string()), "svc");
        assert!(!err.is_transient());
        assert_eq!(err, NetworkError::InvalidUrl { url: "svc".to_string() });
    }
}
