//! View state derived from the snapshot: card previews and score entry.

mod preview;
mod score_sheet;

pub use preview::CardPreview;
pub use score_sheet::{has_submitted, ScoreSheet, MISSING_SCORES_MESSAGE};
