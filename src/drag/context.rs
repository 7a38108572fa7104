use std::fmt;

use crate::models::{Card, CardId, GamePhase, GameSnapshot, PlayedCard, TheaterType};

/// A discrete zone a dragged card may be released onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DropTarget {
    Theater(TheaterType),
    Hand,
    Deck,
    Trash,
}

impl DropTarget {
    /// Resolution precedence when zones overlap: theaters in board order,
    /// then trash, deck and hand. Lower wins.
    pub fn precedence(&self, order: &[TheaterType]) -> usize {
        let theaters = order.len();
        match self {
            DropTarget::Theater(kind) => order.iter().position(|t| t == kind).unwrap_or(theaters),
            DropTarget::Trash => theaters + 1,
            DropTarget::Deck => theaters + 2,
            DropTarget::Hand => theaters + 3,
        }
    }
}

impl fmt::Display for DropTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropTarget::Theater(kind) => write!(f, "theater:{}", kind),
            DropTarget::Hand => f.write_str("hand"),
            DropTarget::Deck => f.write_str("deck"),
            DropTarget::Trash => f.write_str("trash"),
        }
    }
}

/// The set of targets a drop is currently allowed on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropTargetSet {
    targets: Vec<DropTarget>,
}

impl DropTargetSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn contains(&self, target: DropTarget) -> bool {
        self.targets.contains(&target)
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DropTarget> {
        self.targets.iter()
    }

    fn insert(&mut self, target: DropTarget) {
        if !self.targets.contains(&target) {
            self.targets.push(target);
        }
    }
}

impl FromIterator<DropTarget> for DropTargetSet {
    fn from_iter<I: IntoIterator<Item = DropTarget>>(iter: I) -> Self {
        let mut set = DropTargetSet::empty();
        for target in iter {
            set.insert(target);
        }
        set
    }
}

/// What is being dragged and where it came from.
///
/// Holds copies keyed by card id, never references into a snapshot, so it
/// survives snapshot replacement mid-drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragContext {
    Hand { card: Card, face_up: bool },
    Theater {
        theater: TheaterType,
        played: PlayedCard,
    },
}

impl DragContext {
    pub fn card(&self) -> &Card {
        match self {
            DragContext::Hand { card, .. } => card,
            DragContext::Theater { played, .. } => &played.card,
        }
    }

    pub fn card_id(&self) -> CardId {
        self.card().id
    }

    pub fn face_up(&self) -> bool {
        match self {
            DragContext::Hand { face_up, .. } => *face_up,
            DragContext::Theater { played, .. } => played.face_up,
        }
    }

    /// Theater a face-up hand card would naturally go to. Styling hint only.
    pub fn preferred_target(&self) -> Option<DropTarget> {
        match self {
            DragContext::Hand {
                card,
                face_up: true,
            } => Some(DropTarget::Theater(card.theater)),
            _ => None,
        }
    }
}

/// A released drag with a legal destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropDecision {
    pub context: DragContext,
    pub target: DropTarget,
}

/// The acting player's view of the current snapshot, used for legality.
#[derive(Debug, Clone, Copy)]
pub struct TurnView<'a> {
    pub snapshot: &'a GameSnapshot,
    pub player_id: &'a str,
    /// A command is in flight.
    pub busy: bool,
}

impl<'a> TurnView<'a> {
    pub fn new(snapshot: &'a GameSnapshot, player_id: &'a str) -> Self {
        Self {
            snapshot,
            player_id,
            busy: false,
        }
    }

    pub fn busy(mut self, busy: bool) -> Self {
        self.busy = busy;
        self
    }

    pub fn is_my_turn(&self) -> bool {
        self.snapshot.is_turn_of(self.player_id)
    }

    pub fn is_playing(&self) -> bool {
        self.snapshot.phase == GamePhase::Playing
    }

    /// Turn ownership, playing phase and no command pending.
    pub fn can_act(&self) -> bool {
        !self.busy && self.is_playing() && self.is_my_turn()
    }

    /// `context` still refers to a card the acting player controls in this
    /// snapshot: in hand, or on top of their own stack in that theater.
    pub fn controls(&self, context: &DragContext) -> bool {
        match context {
            DragContext::Hand { card, .. } => self.snapshot.hand_contains(self.player_id, card.id),
            DragContext::Theater { theater, played } => {
                played.owner_id == self.player_id
                    && self
                        .snapshot
                        .top_card_of(*theater, self.player_id)
                        .is_some_and(|top| top.card.id == played.card.id)
            }
        }
    }

    pub fn theater_order(&self) -> Vec<TheaterType> {
        self.snapshot.theater_order()
    }
}
