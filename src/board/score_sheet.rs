//! Score entry for the scoring phase.

use std::collections::BTreeMap;

use crate::api::Command;
use crate::models::{GamePhase, GameSnapshot, TheaterType};

pub const MISSING_SCORES_MESSAGE: &str = "Enter a score for each theater before submitting.";

/// Per-theater score inputs, digits only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreSheet {
    inputs: BTreeMap<TheaterType, String>,
}

impl ScoreSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self, theater: TheaterType) -> &str {
        self.inputs.get(&theater).map(String::as_str).unwrap_or("")
    }

    /// Replace an input, dropping anything that is not a digit.
    pub fn set_input(&mut self, theater: TheaterType, raw: &str) {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        self.inputs.insert(theater, digits);
    }

    /// Append one typed character. Non-digits are ignored.
    pub fn push_char(&mut self, theater: TheaterType, c: char) {
        if c.is_ascii_digit() {
            self.inputs.entry(theater).or_default().push(c);
        }
    }

    pub fn backspace(&mut self, theater: TheaterType) {
        if let Some(value) = self.inputs.get_mut(&theater) {
            value.pop();
        }
    }

    pub fn reset(&mut self) {
        self.inputs.clear();
    }

    /// Follow a new snapshot: cleared outside an ordinary scoring phase,
    /// otherwise pre-filled with scores this player already recorded.
    pub fn sync_with(&mut self, snapshot: &GameSnapshot, player_id: &str) {
        if snapshot.phase != GamePhase::Scoring || snapshot.withdrew_player_id.is_some() {
            self.reset();
            return;
        }
        for theater in TheaterType::DEFAULT_ORDER {
            let recorded = snapshot.recorded_score(theater, player_id, true);
            if recorded > 0 {
                self.inputs.insert(theater, recorded.to_string());
            }
        }
    }

    /// Build the submission, or the message to show when an input is empty.
    pub fn submission(&self, order: &[TheaterType]) -> Result<Command, &'static str> {
        if order.iter().any(|t| self.input(*t).trim().is_empty()) {
            return Err(MISSING_SCORES_MESSAGE);
        }
        let scores = TheaterType::DEFAULT_ORDER
            .iter()
            .map(|t| (*t, self.input(*t).parse::<u32>().unwrap_or(0)))
            .collect();
        Ok(Command::SubmitScores { scores })
    }
}

/// Every theater in the battle has a recorded score for this side.
pub fn has_submitted(snapshot: &GameSnapshot, player_id: &str, own: bool) -> bool {
    snapshot.phase == GamePhase::Scoring
        && snapshot
            .theater_order()
            .iter()
            .all(|t| snapshot.recorded_score(*t, player_id, own) > 0)
}
