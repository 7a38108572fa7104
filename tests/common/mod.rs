//! Shared fixtures for the integration tests.
//!
//! ```ignore
//! let snapshot = SnapshotBuilder::new()
//!     .phase(GamePhase::Scoring)
//!     .withdrew(PLAYER_B)
//!     .build();
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use std::collections::BTreeMap;

use frontline::models::{
    Card, GamePhase, GameSnapshot, PlayedCard, Player, SessionIds, Theater, TheaterScore,
    TheaterType,
};

pub const GAME_ID: &str = "g1";
pub const ROOM_ID: &str = "r1";
pub const PLAYER_A: &str = "a";
pub const PLAYER_B: &str = "b";

/// Ids of player A in the default game.
pub fn ids() -> SessionIds {
    SessionIds::new(GAME_ID, PLAYER_A, ROOM_ID)
}

pub fn card(id: i64, theater: TheaterType, strength: u8) -> Card {
    let name = match theater {
        TheaterType::Air => "Air Drop",
        TheaterType::Land => "Reinforce",
        TheaterType::Sea => "Transport",
    };
    Card::new(id, theater, strength, name)
}

/// Builds snapshots for player A ("Ann") against player B ("Bo").
///
/// Defaults: playing, battle 1, A to move, A holding cards 7 (air) and 8
/// (land), empty lanes in air/land/sea order.
#[derive(Debug, Clone)]
pub struct SnapshotBuilder {
    snapshot: GameSnapshot,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        let theaters = TheaterType::DEFAULT_ORDER
            .iter()
            .map(|t| (*t, Theater::new(*t)))
            .collect();
        Self {
            snapshot: GameSnapshot {
                id: GAME_ID.into(),
                room_id: ROOM_ID.into(),
                player1: Player {
                    id: PLAYER_A.into(),
                    name: "Ann".into(),
                    hand: vec![card(7, TheaterType::Air, 4), card(8, TheaterType::Land, 2)],
                    score: 0,
                },
                player2: Player {
                    id: PLAYER_B.into(),
                    name: "Bo".into(),
                    hand: vec![card(20, TheaterType::Sea, 1)],
                    score: 0,
                },
                deck: vec![card(30, TheaterType::Sea, 6)],
                trash: vec![],
                theater_order: TheaterType::DEFAULT_ORDER.to_vec(),
                theaters,
                current_player_id: PLAYER_A.into(),
                phase: GamePhase::Playing,
                battle_number: 1,
                first_player_id: PLAYER_A.into(),
                withdrew_player_id: None,
                theater_scores: None,
            },
        }
    }

    pub fn phase(mut self, phase: GamePhase) -> Self {
        self.snapshot.phase = phase;
        self
    }

    pub fn battle(mut self, battle: u32) -> Self {
        self.snapshot.battle_number = battle;
        self
    }

    pub fn turn(mut self, player_id: &str) -> Self {
        self.snapshot.current_player_id = player_id.into();
        self
    }

    pub fn order(mut self, order: &[TheaterType]) -> Self {
        self.snapshot.theater_order = order.to_vec();
        self
    }

    pub fn hand(mut self, player_id: &str, cards: Vec<Card>) -> Self {
        if player_id == PLAYER_A {
            self.snapshot.player1.hand = cards;
        } else {
            self.snapshot.player2.hand = cards;
        }
        self
    }

    pub fn played(mut self, theater: TheaterType, card: Card, face_up: bool, owner: &str) -> Self {
        self.snapshot
            .theaters
            .entry(theater)
            .or_insert_with(|| Theater::new(theater))
            .cards
            .push(PlayedCard::new(card, face_up, owner));
        self
    }

    pub fn withdrew(mut self, player_id: &str) -> Self {
        self.snapshot.phase = GamePhase::Scoring;
        self.snapshot.withdrew_player_id = Some(player_id.into());
        self
    }

    pub fn score(mut self, theater: TheaterType, player1_total: u32, player2_total: u32) -> Self {
        self.snapshot
            .theater_scores
            .get_or_insert_with(BTreeMap::new)
            .insert(
                theater,
                TheaterScore {
                    player1_total,
                    player2_total,
                },
            );
        self
    }

    pub fn build(self) -> GameSnapshot {
        self.snapshot
    }
}

impl Default for SnapshotBuilder {
    fn default() -> Self {
        Self::new()
    }
}
