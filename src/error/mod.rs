//! Error handling for the client.
//!
//! | Kind | Type | Surfaced as |
//! |------|------|-------------|
//! | Transport failure | [`ApiError::Transport`] | fixed per-action message |
//! | Rejected command | [`ApiError::Rejected`] | fixed per-action message |
//! | Refused locally | [`DispatchError`] | nothing reaches the network |
//!
//! Illegal drops never become errors at all; they end the drag silently.

mod api;
mod category;
mod dispatch;
mod frontline_error;
mod network;

pub use api::ApiError;
pub use category::ErrorCategory;
pub use dispatch::DispatchError;
pub use frontline_error::{FrontlineError, FrontlineResult};
pub use network::NetworkError;
