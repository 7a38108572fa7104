//! High-level error classification.

use std::fmt;

/// Category used to decide how an error is handled and surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The request never completed. Transient.
    Network,
    /// The service answered with a non-success status; nothing changed server-side.
    Server,
    /// Local bug or malformed data (undecodable body, bad URL).
    Client,
    /// Rejected locally because of what the user did (busy, illegal move).
    User,
    /// Missing or invalid settings.
    Configuration,
}

impl ErrorCategory {
    /// Whether retrying the same operation later can succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ErrorCategory::Network | ErrorCategory::Server | ErrorCategory::User
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::User => "user",
            ErrorCategory::Configuration => "configuration",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
