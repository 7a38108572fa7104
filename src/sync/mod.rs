//! State synchronization: the command gate, the polled snapshot and the
//! local-only view state reconciled against it.
//!
//! - [`ActionDispatcher`] - one server-mutating command in flight at a time
//! - [`StateSyncCoordinator`] - snapshot replacement, polling, auto-advance
//! - [`LocalFaceState`] - private face choice for hand cards
//! - [`tasks`] - poll timer, poll and command tasks

mod coordinator;
mod dispatcher;
mod face_state;
pub mod tasks;

pub use crate::api::{Command, CommandKind};
pub use coordinator::{AutoAdvancePolicy, PollTicket, StateSyncCoordinator};
pub use dispatcher::{ActionDispatcher, CommandTicket};
pub use face_state::LocalFaceState;
pub use tasks::{spawn_command, spawn_poll, spawn_poll_timer, SyncMessage, POLL_INTERVAL};
