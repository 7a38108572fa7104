use serde::{Deserialize, Serialize};

use super::game::{GameSnapshot, Player};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Waiting,
    Full,
    Playing,
}

/// A matchmaking room. `game_id` appears once both seats are taken.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    #[serde(default)]
    pub player1: Option<Player>,
    #[serde(default)]
    pub player2: Option<Player>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_id: Option<String>,
    pub status: RoomStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomResponse {
    pub room: Room,
    pub player_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JoinRoomResponse {
    pub room: Room,
    #[serde(default)]
    pub game: Option<GameSnapshot>,
    pub player_id: String,
}

/// The fixed identifiers the core works with once bootstrap is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIds {
    pub game_id: String,
    pub player_id: String,
    pub room_id: String,
}

impl SessionIds {
    pub fn new(
        game_id: impl Into<String>,
        player_id: impl Into<String>,
        room_id: impl Into<String>,
    ) -> Self {
        Self {
            game_id: game_id.into(),
            player_id: player_id.into(),
            room_id: room_id.into(),
        }
    }
}
