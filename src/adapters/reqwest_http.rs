//! [`HttpClient`] over reqwest.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::time::Duration;

use crate::traits::{HttpClient, HttpError, Response};

const JSON: &str = "application/json";

#[derive(Debug, Clone, Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request gives up after `timeout`. A builder failure falls back
    /// to reqwest's defaults rather than refusing to start.
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = match reqwest::Client::builder().timeout(timeout).build() {
            Ok(client) => client,
            Err(err) => {
                tracing::warn!(error = %err, ?timeout, "http client builder failed, using defaults");
                reqwest::Client::new()
            }
        };
        Self { client }
    }

    fn classify(err: reqwest::Error) -> HttpError {
        let message = err.to_string();
        if err.is_timeout() {
            HttpError::Timeout(message)
        } else if err.is_connect() {
            HttpError::ConnectionFailed(message)
        } else if err.is_builder() {
            HttpError::InvalidUrl(message)
        } else if err.is_body() || err.is_decode() {
            HttpError::Body(message)
        } else {
            HttpError::Other(message)
        }
    }

    async fn exchange(request: reqwest::RequestBuilder) -> Result<Response, HttpError> {
        let response = request
            .header(ACCEPT, JSON)
            .send()
            .await
            .map_err(Self::classify)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(Self::classify)?;
        Ok(Response::new(status, body))
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get_json(&self, url: &str) -> Result<Response, HttpError> {
        Self::exchange(self.client.get(url)).await
    }

    async fn post_json(&self, url: &str, body: Option<&str>) -> Result<Response, HttpError> {
        let mut request = self.client.post(url);
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, JSON).body(body.to_owned());
        }
        Self::exchange(request).await
    }
}
