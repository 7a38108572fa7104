//! Color theme for the board.

use ratatui::style::Color;

/// Zone borders at rest.
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Titles and the player's own cards.
pub const COLOR_HEADER: Color = Color::White;

/// Secondary text: counts, hints, opponent labels.
pub const COLOR_DIM: Color = Color::DarkGray;

/// The drop target under the pointer.
pub const COLOR_ACTIVE: Color = Color::LightGreen;

/// Legal drop targets while a drag is open.
pub const COLOR_LEGAL: Color = Color::Gray;

/// Natural theater of the dragged card.
pub const COLOR_PREFERRED: Color = Color::Yellow;

/// Face-down cards.
pub const COLOR_FACE_DOWN: Color = Color::Rgb(90, 90, 110);

/// Command failure banner.
pub const COLOR_ERROR: Color = Color::Red;

/// Focused score input and enabled buttons.
pub const COLOR_FOCUS: Color = Color::Rgb(0, 122, 204);

/// Theater accent, used in card labels and lane titles.
pub fn theater_color(theater: crate::models::TheaterType) -> Color {
    use crate::models::TheaterType;
    match theater {
        TheaterType::Air => Color::LightCyan,
        TheaterType::Land => Color::LightYellow,
        TheaterType::Sea => Color::LightBlue,
    }
}
