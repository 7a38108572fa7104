//! Seams where a test double replaces real I/O.

pub mod http;

pub use http::{HttpClient, HttpError, Response};
