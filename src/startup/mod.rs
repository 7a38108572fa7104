//! Startup: configuration and room bootstrap.
//!
//! - [`config`] - [`ClientConfig`] and its environment overrides
//! - [`bootstrap`] - create/join a room and wait for the game

pub mod bootstrap;
pub mod config;

pub use bootstrap::{bootstrap, BootstrapMode, Bootstrapped};
pub use config::ClientConfig;
