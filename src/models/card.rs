use serde::{Deserialize, Serialize};
use std::fmt;

/// Card identifier as issued by the rules service.
pub type CardId = i64;

/// One of the lanes cards are played into.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum TheaterType {
    Air,
    Land,
    Sea,
}

impl TheaterType {
    /// Default board order, used when a snapshot carries no explicit order.
    pub const DEFAULT_ORDER: [TheaterType; 3] = [TheaterType::Air, TheaterType::Land, TheaterType::Sea];

    /// Wire name of the theater.
    pub fn as_str(&self) -> &'static str {
        match self {
            TheaterType::Air => "air",
            TheaterType::Land => "land",
            TheaterType::Sea => "sea",
        }
    }

    /// Capitalized label for display.
    pub fn label(&self) -> &'static str {
        match self {
            TheaterType::Air => "Air",
            TheaterType::Land => "Land",
            TheaterType::Sea => "Sea",
        }
    }
}

impl fmt::Display for TheaterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable card value. Identity is the `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Card {
    pub id: CardId,
    pub theater: TheaterType,
    pub strength: u8,
    pub name: String,
}

impl Card {
    pub fn new(id: CardId, theater: TheaterType, strength: u8, name: impl Into<String>) -> Self {
        Self {
            id,
            theater,
            strength,
            name: name.into(),
        }
    }
}

/// A card placed into a theater stack.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayedCard {
    pub card: Card,
    pub face_up: bool,
    /// Owner of the placement (`playerId` on the wire).
    #[serde(rename = "playerId")]
    pub owner_id: String,
}

impl PlayedCard {
    pub fn new(card: Card, face_up: bool, owner_id: impl Into<String>) -> Self {
        Self {
            card,
            face_up,
            owner_id: owner_id.into(),
        }
    }
}
