//! The vocabulary of server-mutating commands.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::models::{CardId, TheaterType};

/// What to do with the top card of one of the player's own theater stacks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ManipulateAction {
    /// Turn the card over (dropped on the deck).
    Flip,
    /// Discard the card (dropped on the trash).
    Destroy,
    /// Take the card back into the hand.
    Return,
}

impl ManipulateAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ManipulateAction::Flip => "flip",
            ManipulateAction::Destroy => "destroy",
            ManipulateAction::Return => "return",
        }
    }
}

/// A player-initiated, server-mutating command.
///
/// Commands carry only stable ids, never references into a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    PlayCard {
        card_id: CardId,
        theater: TheaterType,
        face_up: bool,
    },
    DrawCard,
    EndTurn,
    Withdraw,
    SubmitScores {
        scores: BTreeMap<TheaterType, u32>,
    },
    Manipulate {
        theater: TheaterType,
        card_id: CardId,
        action: ManipulateAction,
    },
    DestroyCard {
        card_id: CardId,
    },
    /// `automatic` marks the background advance issued after a withdrawal.
    AdvanceBattle {
        automatic: bool,
    },
    AdvanceGame,
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::PlayCard { .. } => CommandKind::PlayCard,
            Command::DrawCard => CommandKind::DrawCard,
            Command::EndTurn => CommandKind::EndTurn,
            Command::Withdraw => CommandKind::Withdraw,
            Command::SubmitScores { .. } => CommandKind::SubmitScores,
            Command::Manipulate { action, .. } => CommandKind::Manipulate(*action),
            Command::DestroyCard { .. } => CommandKind::DestroyCard,
            Command::AdvanceBattle { .. } => CommandKind::AdvanceBattle,
            Command::AdvanceGame => CommandKind::AdvanceGame,
        }
    }

    pub fn is_automatic(&self) -> bool {
        matches!(self, Command::AdvanceBattle { automatic: true })
    }
}

/// Command discriminant, used for gating, logging and error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    PlayCard,
    DrawCard,
    EndTurn,
    Withdraw,
    SubmitScores,
    Manipulate(ManipulateAction),
    DestroyCard,
    AdvanceBattle,
    AdvanceGame,
}

impl CommandKind {
    /// The fixed message shown when this command fails, whatever the cause.
    pub fn failure_message(&self) -> &'static str {
        match self {
            CommandKind::PlayCard => "Failed to play card",
            CommandKind::DrawCard => "Failed to draw card",
            CommandKind::EndTurn => "Failed to end turn",
            CommandKind::Withdraw => "Failed to withdraw",
            CommandKind::SubmitScores => "Failed to submit scores",
            CommandKind::Manipulate(ManipulateAction::Flip) => "Failed to flip card",
            CommandKind::Manipulate(ManipulateAction::Destroy) => "Failed to destroy card",
            CommandKind::Manipulate(ManipulateAction::Return) => "Failed to return card",
            CommandKind::DestroyCard => "Failed to destroy card",
            CommandKind::AdvanceBattle => "Failed to start next battle",
            CommandKind::AdvanceGame => "Failed to start next game",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandKind::PlayCard => f.write_str("play card"),
            CommandKind::DrawCard => f.write_str("draw card"),
            CommandKind::EndTurn => f.write_str("end turn"),
            CommandKind::Withdraw => f.write_str("withdraw"),
            CommandKind::SubmitScores => f.write_str("submit scores"),
            CommandKind::Manipulate(action) => write!(f, "{} card", action.as_str()),
            CommandKind::DestroyCard => f.write_str("destroy card"),
            CommandKind::AdvanceBattle => f.write_str("advance battle"),
            CommandKind::AdvanceGame => f.write_str("advance game"),
        }
    }
}
