//! Room bootstrap: create or join a room, then wait for the game to start.
//!
//! The result is the fixed (game, player, room) id triple every later call
//! uses.

use std::time::Duration;

use crate::api::GameApi;
use crate::error::ApiError;
use crate::models::{GameSnapshot, Room, SessionIds};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapMode {
    Create { player_name: String },
    Join { room_id: String, player_name: String },
}

#[derive(Debug, Clone)]
pub struct Bootstrapped {
    pub ids: SessionIds,
    pub room: Room,
    /// Snapshot handed back by the join call, if any.
    pub initial: Option<GameSnapshot>,
}

/// Create or join a room and wait until it has a game.
///
/// `on_waiting` is called with the room after each lookup that still has no
/// game. Transient transport failures while waiting are retried. Anything
/// else ends the bootstrap.
pub async fn bootstrap<A, F>(
    api: &A,
    mode: &BootstrapMode,
    room_poll: Duration,
    mut on_waiting: F,
) -> Result<Bootstrapped, ApiError>
where
    A: GameApi + ?Sized,
    F: FnMut(&Room),
{
    let (mut room, player_id, initial) = match mode {
        BootstrapMode::Create { player_name } => {
            let created = api.create_room(player_name).await?;
            tracing::info!(room = %created.room.id, player = %created.player_id, "room created");
            (created.room, created.player_id, None)
        }
        BootstrapMode::Join {
            room_id,
            player_name,
        } => {
            let joined = api.join_room(room_id, player_name).await?;
            tracing::info!(room = %joined.room.id, player = %joined.player_id, "room joined");
            (joined.room, joined.player_id, joined.game)
        }
    };

    loop {
        if let Some(game_id) = room.game_id.clone() {
            tracing::info!(game = %game_id, "game started");
            let ids = SessionIds::new(game_id, player_id, room.id.clone());
            return Ok(Bootstrapped { ids, room, initial });
        }
        on_waiting(&room);
        tokio::time::sleep(room_poll).await;

        match api.get_room(&room.id).await {
            Ok(next) => room = next,
            Err(err) if err.is_transient() => {
                tracing::warn!(room = %room.id, error = %err, "room lookup failed, retrying");
            }
            Err(err) => {
                tracing::error!(room = %room.id, error = %err, "room lookup rejected");
                return Err(err);
            }
        }
    }
}
