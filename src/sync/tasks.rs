//! Background tasks feeding the coordinator through the message channel.
//!
//! Tasks never touch the coordinator directly. They report back as
//! [`SyncMessage`]s and the event loop applies them in order.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::coordinator::PollTicket;
use super::dispatcher::CommandTicket;
use crate::api::GameApi;
use crate::error::ApiError;
use crate::models::{GameSnapshot, SessionIds};

/// Default poll cadence.
pub const POLL_INTERVAL: Duration = Duration::from_millis(2000);

#[derive(Debug)]
pub enum SyncMessage {
    /// The poll interval elapsed.
    PollDue,
    PollCompleted {
        ticket: PollTicket,
        result: Result<GameSnapshot, ApiError>,
    },
    CommandCompleted {
        ticket: CommandTicket,
        result: Result<GameSnapshot, ApiError>,
    },
}

/// Emit [`SyncMessage::PollDue`] every `interval` until the receiver is gone.
///
/// Ticks that fall behind are skipped rather than bunched.
pub fn spawn_poll_timer(
    interval: Duration,
    message_tx: mpsc::UnboundedSender<SyncMessage>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tracing::info!(interval_ms = interval.as_millis() as u64, "poll timer started");
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            if message_tx.send(SyncMessage::PollDue).is_err() {
                tracing::debug!("Message channel closed, stopping poll timer");
                break;
            }
        }
    })
}

/// Fetch the game snapshot for an admitted poll.
pub fn spawn_poll<A>(
    api: Arc<A>,
    ids: SessionIds,
    ticket: PollTicket,
    message_tx: mpsc::UnboundedSender<SyncMessage>,
) -> JoinHandle<()>
where
    A: GameApi + ?Sized + 'static,
{
    tokio::spawn(async move {
        let result = api.get_game(&ids.game_id).await;
        let _ = message_tx.send(SyncMessage::PollCompleted { ticket, result });
    })
}

/// Execute an admitted command.
pub fn spawn_command<A>(
    api: Arc<A>,
    ids: SessionIds,
    ticket: CommandTicket,
    message_tx: mpsc::UnboundedSender<SyncMessage>,
) -> JoinHandle<()>
where
    A: GameApi + ?Sized + 'static,
{
    tokio::spawn(async move {
        let result = api.execute(&ids, ticket.command()).await;
        if message_tx
            .send(SyncMessage::CommandCompleted { ticket, result })
            .is_err()
        {
            tracing::debug!("Message channel closed, command result dropped");
        }
    })
}
