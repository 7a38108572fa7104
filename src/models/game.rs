use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::card::{Card, CardId, PlayedCard, TheaterType};

/// Server-determined game phase. The client only observes it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    #[default]
    Waiting,
    Playing,
    Scoring,
    GameOver,
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GamePhase::Waiting => "waiting",
            GamePhase::Playing => "playing",
            GamePhase::Scoring => "scoring",
            GamePhase::GameOver => "game_over",
        };
        f.write_str(name)
    }
}

/// A theater lane and every card placed into it, both players interleaved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Theater {
    #[serde(rename = "type")]
    pub kind: TheaterType,
    #[serde(default)]
    pub cards: Vec<PlayedCard>,
}

impl Theater {
    pub fn new(kind: TheaterType) -> Self {
        Self {
            kind,
            cards: Vec::new(),
        }
    }

    /// Cards in this theater owned by `owner`, bottom first.
    pub fn stack_of<'a>(&'a self, owner: &'a str) -> impl Iterator<Item = &'a PlayedCard> + 'a {
        self.cards.iter().filter(move |pc| pc.owner_id == owner)
    }

    /// The top of `owner`'s stack, if they have any card here.
    pub fn top_of(&self, owner: &str) -> Option<&PlayedCard> {
        self.cards.iter().rev().find(|pc| pc.owner_id == owner)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub hand: Vec<Card>,
    /// Victory points.
    #[serde(default)]
    pub score: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TheaterScore {
    pub player1_total: u32,
    pub player2_total: u32,
}

/// The complete authoritative game state.
///
/// Every poll or command response replaces the previous snapshot wholesale.
/// Anything the client keeps across snapshots is keyed by card id or player id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub id: String,
    pub room_id: String,
    pub player1: Player,
    pub player2: Player,
    #[serde(default)]
    pub deck: Vec<Card>,
    #[serde(default)]
    pub trash: Vec<Card>,
    #[serde(default)]
    pub theater_order: Vec<TheaterType>,
    #[serde(default)]
    pub theaters: BTreeMap<TheaterType, Theater>,
    pub current_player_id: String,
    pub phase: GamePhase,
    pub battle_number: u32,
    #[serde(default)]
    pub first_player_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub withdrew_player_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theater_scores: Option<BTreeMap<TheaterType, TheaterScore>>,
}

impl GameSnapshot {
    pub fn player(&self, player_id: &str) -> Option<&Player> {
        if self.player1.id == player_id {
            Some(&self.player1)
        } else if self.player2.id == player_id {
            Some(&self.player2)
        } else {
            None
        }
    }

    pub fn opponent_of(&self, player_id: &str) -> Option<&Player> {
        if self.player1.id == player_id {
            Some(&self.player2)
        } else if self.player2.id == player_id {
            Some(&self.player1)
        } else {
            None
        }
    }

    pub fn is_player1(&self, player_id: &str) -> bool {
        self.player1.id == player_id
    }

    pub fn is_turn_of(&self, player_id: &str) -> bool {
        self.current_player_id == player_id
    }

    /// Hand of `player_id`; empty for an unknown player.
    pub fn hand_of(&self, player_id: &str) -> &[Card] {
        self.player(player_id).map(|p| p.hand.as_slice()).unwrap_or(&[])
    }

    pub fn hand_contains(&self, player_id: &str, card_id: CardId) -> bool {
        self.hand_of(player_id).iter().any(|c| c.id == card_id)
    }

    pub fn theater(&self, kind: TheaterType) -> Option<&Theater> {
        self.theaters.get(&kind)
    }

    /// Theater order for this battle, falling back to air, land, sea.
    pub fn theater_order(&self) -> Vec<TheaterType> {
        if self.theater_order.is_empty() {
            TheaterType::DEFAULT_ORDER.to_vec()
        } else {
            self.theater_order.clone()
        }
    }

    /// Top of `owner`'s stack in `theater`.
    pub fn top_card_of(&self, theater: TheaterType, owner: &str) -> Option<&PlayedCard> {
        self.theater(theater).and_then(|t| t.top_of(owner))
    }

    /// Score recorded in the scoring phase for `theater`, from the point of
    /// view of `player_id` (`own = true`) or their opponent.
    pub fn recorded_score(&self, theater: TheaterType, player_id: &str, own: bool) -> u32 {
        let Some(record) = self.theater_scores.as_ref().and_then(|s| s.get(&theater)) else {
            return 0;
        };
        if self.is_player1(player_id) == own {
            record.player1_total
        } else {
            record.player2_total
        }
    }

    /// Scoring phase that was reached through a withdrawal.
    pub fn is_withdrawal_scoring(&self) -> bool {
        self.phase == GamePhase::Scoring && self.withdrew_player_id.is_some()
    }
}
