use std::collections::HashMap;

use crate::models::{Card, CardId};

/// Private face-up/face-down choice for the player's own hand cards.
///
/// Never sent to the server except as the `faceUp` flag of a play. Cards
/// default to face-up; entries go away as soon as the card leaves the hand.
#[derive(Debug, Clone, Default)]
pub struct LocalFaceState {
    faces: HashMap<CardId, bool>,
}

impl LocalFaceState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn face_up(&self, card_id: CardId) -> bool {
        self.faces.get(&card_id).copied().unwrap_or(true)
    }

    /// Flip the card and return its new face.
    pub fn toggle(&mut self, card_id: CardId) -> bool {
        let face_up = !self.face_up(card_id);
        self.faces.insert(card_id, face_up);
        face_up
    }

    /// Keep only entries for cards still in `hand`.
    pub fn prune(&mut self, hand: &[Card]) {
        self.faces
            .retain(|id, _| hand.iter().any(|card| card.id == *id));
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TheaterType;

    #[test]
    fn test_default_toggle_and_prune() {
        let mut faces = LocalFaceState::new();
        assert!(faces.face_up(7));
        assert!(!faces.toggle(7));
        assert!(!faces.face_up(7));
        faces.toggle(9);
        faces.toggle(9);
        assert_eq!(faces.len(), 2);

        faces.prune(&[Card::new(9, TheaterType::Sea, 1, "Transport")]);
        assert_eq!(faces.len(), 1);
        assert!(faces.face_up(7));
        assert!(faces.face_up(9));
    }
}
