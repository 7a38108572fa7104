//! Frontline - terminal client for a two-player theater card game.
//!
//! The library holds the interaction core: gesture recognition, drag and
//! drop legality and resolution, and synchronization of local state with the
//! polled game snapshot. The binary hosts it in a terminal.

pub mod adapters;
pub mod api;
pub mod app;
pub mod board;
pub mod drag;
pub mod error;
pub mod gesture;
pub mod models;
pub mod startup;
pub mod sync;
pub mod terminal;
pub mod traits;
pub mod ui;
