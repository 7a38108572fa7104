//! Rules service API: endpoints, request bodies and the command vocabulary.

mod client;
mod command;
mod requests;

pub use client::{GameApi, GameApiClient, DEFAULT_BASE_URL};
pub use command::{Command, CommandKind, ManipulateAction};
