//! Scripted transport for tests.
//!
//! Each URL answers from its one-shot queue first, then its fixed response,
//! then the client-wide fallback. Every request is recorded.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::traits::{HttpClient, HttpError, Response};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    /// `None` for GETs and bodiless POSTs.
    pub body: Option<String>,
}

impl RecordedRequest {
    pub fn json_body(&self) -> Option<serde_json::Value> {
        serde_json::from_str(self.body.as_deref()?).ok()
    }
}

#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(Response),
    Error(HttpError),
}

impl MockResponse {
    /// 200 carrying `value` as JSON.
    pub fn json<T: serde::Serialize>(value: &T) -> Self {
        Response::json_body(200, value)
            .map(MockResponse::Success)
            .unwrap_or_else(|e| MockResponse::Error(HttpError::Other(e.to_string())))
    }

    /// Any status with a plain-text body.
    pub fn status(status: u16, body: &str) -> Self {
        MockResponse::Success(Response::new(status, body.to_owned()))
    }
}

#[derive(Debug, Default)]
struct Script {
    queued: HashMap<String, VecDeque<MockResponse>>,
    fixed: HashMap<String, MockResponse>,
    fallback: Option<MockResponse>,
    requests: Vec<RecordedRequest>,
}

/// Clones share one script, so a test can keep a handle after giving the
/// client away.
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    script: Arc<Mutex<Script>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn set_response(&self, url: &str, response: MockResponse) {
        self.script().fixed.insert(url.to_owned(), response);
    }

    /// Served once, ahead of the fixed response.
    pub fn push_response(&self, url: &str, response: MockResponse) {
        self.script()
            .queued
            .entry(url.to_owned())
            .or_default()
            .push_back(response);
    }

    pub fn set_default_response(&self, response: MockResponse) {
        self.script().fallback = Some(response);
    }

    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.script().requests.clone()
    }

    pub fn requests_ending_with(&self, suffix: &str) -> Vec<RecordedRequest> {
        self.script()
            .requests
            .iter()
            .filter(|r| r.url.ends_with(suffix))
            .cloned()
            .collect()
    }

    pub fn clear_requests(&self) {
        self.script().requests.clear();
    }

    fn answer(&self, method: &'static str, url: &str, body: Option<&str>) -> Result<Response, HttpError> {
        let mut guard = self.script();
        let script = &mut *guard;
        script.requests.push(RecordedRequest {
            method,
            url: url.to_owned(),
            body: body.map(str::to_owned),
        });
        let next = script
            .queued
            .get_mut(url)
            .and_then(VecDeque::pop_front)
            .or_else(|| script.fixed.get(url).cloned())
            .or_else(|| script.fallback.clone());
        match next {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!("no mock response for {}", url))),
        }
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get_json(&self, url: &str) -> Result<Response, HttpError> {
        self.answer("GET", url, None)
    }

    async fn post_json(&self, url: &str, body: Option<&str>) -> Result<Response, HttpError> {
        self.answer("POST", url, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_queued_responses_precede_fixed_response() {
        let client = MockHttpClient::new();
        let url = "http://svc/api/games/g1/next-battle";
        client.set_response(url, MockResponse::status(200, "{}"));
        client.push_response(url, MockResponse::status(500, "boom"));

        let first = client.post_json(url, None).await.unwrap();
        let second = client.post_json(url, None).await.unwrap();
        let third = client.post_json(url, None).await.unwrap();

        assert_eq!(
            [first.status, second.status, third.status],
            [500, 200, 200]
        );
        assert_eq!(client.requests_ending_with("/next-battle").len(), 3);
    }

    #[tokio::test]
    async fn test_unscripted_url_errors() {
        let client = MockHttpClient::new();
        let result = client.get_json("http://svc/missing").await;
        assert!(matches!(result, Err(HttpError::Other(_))));
        assert_eq!(client.get_requests()[0].method, "GET");
    }

    #[tokio::test]
    async fn test_clones_share_the_script() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::status(204, ""));
        let cloned = client.clone();

        cloned
            .post_json("http://svc/x", Some(r#"{"playerId":"a"}"#))
            .await
            .unwrap();

        let requests = client.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].json_body().unwrap()["playerId"], "a");
    }
}
