//! Mock transport wiring.
//!
//! Re-exports the mocks from `frontline::adapters::mock` and builds API
//! clients on top of them.

pub use frontline::adapters::mock::{MockHttpClient, MockResponse, RecordedRequest};
pub use frontline::traits::{HttpClient, HttpError, Response};

use std::sync::Arc;

use frontline::api::GameApiClient;

use super::GAME_ID;

pub const BASE_URL: &str = "http://rules.test";

/// URL of a game command endpoint for the default game.
pub fn game_url(endpoint: &str) -> String {
    format!("{}/api/games/{}/{}", BASE_URL, GAME_ID, endpoint)
}

/// URL the default game is polled from.
pub fn game_state_url() -> String {
    format!("{}/api/games/{}", BASE_URL, GAME_ID)
}

/// A mock transport and an API client sharing it.
pub fn mock_api() -> (MockHttpClient, Arc<GameApiClient<MockHttpClient>>) {
    let mock = MockHttpClient::new();
    let api = Arc::new(GameApiClient::with_http(BASE_URL, mock.clone()));
    (mock, api)
}

/// A transport failure, as if the service were unreachable.
pub fn connection_refused() -> MockResponse {
    MockResponse::Error(HttpError::ConnectionFailed("connection refused".into()))
}
