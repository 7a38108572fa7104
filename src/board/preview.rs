use crate::models::{Card, CardId, PlayedCard};
use crate::sync::LocalFaceState;

/// Enlarged view of one card, opened by long-press or by double-tapping a
/// hand card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardPreview {
    pub card: Card,
    pub face_up: bool,
}

impl CardPreview {
    /// Hand cards show the player's private face choice.
    pub fn for_hand(card: &Card, faces: &LocalFaceState) -> Self {
        Self {
            card: card.clone(),
            face_up: faces.face_up(card.id),
        }
    }

    pub fn for_played(played: &PlayedCard) -> Self {
        Self {
            card: played.card.clone(),
            face_up: played.face_up,
        }
    }

    pub fn card_id(&self) -> CardId {
        self.card.id
    }
}
