//! Test doubles for the trait seams.
//!
//! - [`MockHttpClient`] - HTTP transport with configurable responses

pub mod http;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
