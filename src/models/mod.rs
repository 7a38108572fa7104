//! Wire types shared with the rules/room service.
//!
//! Field names follow the service's camelCase JSON. Snapshots are treated as
//! immutable values: the client replaces them, it never patches them.

mod card;
mod game;
mod room;

pub use card::{Card, CardId, PlayedCard, TheaterType};
pub use game::{GamePhase, GameSnapshot, Player, Theater, TheaterScore};
pub use room::{CreateRoomResponse, JoinRoomResponse, Room, RoomStatus, SessionIds};
