//! Transport seam between the game API client and the network.
//!
//! The rules service speaks JSON over two verbs, so the seam is exactly that
//! wide. Tests swap in [`crate::adapters::MockHttpClient`].

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Status and raw body of a completed exchange.
///
/// Non-2xx statuses are still `Ok` at this layer; the API client decides
/// what a rejection means.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: Bytes,
}

impl Response {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn json_body<T: serde::Serialize>(status: u16, value: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::new(status, serde_json::to_vec(value)?))
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text. The service sends plain-text rejection reasons.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// The exchange did not complete, so there is no status to look at.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HttpError {
    #[error("could not connect: {0}")]
    ConnectionFailed(String),
    #[error("timed out: {0}")]
    Timeout(String),
    #[error("bad request url: {0}")]
    InvalidUrl(String),
    #[error("response body lost: {0}")]
    Body(String),
    #[error("{0}")]
    Other(String),
}

#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Fetch a JSON resource.
    async fn get_json(&self, url: &str) -> Result<Response, HttpError>;

    /// POST a JSON document. `None` posts with no body at all, which is what
    /// the advance endpoints expect.
    async fn post_json(&self, url: &str, body: Option<&str>) -> Result<Response, HttpError>;
}
