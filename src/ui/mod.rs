//! Board rendering.
//!
//! Every frame rebuilds the [`ZoneTree`] from what was actually drawn: lanes,
//! deck, trash and hand become drop zones, cards and controls become keyed
//! children. The tree replaces `app.zones` once the frame is complete, and
//! gesture recognizers for elements that were not drawn are torn down.
//!
//! Layout, top to bottom:
//! - header: battle, phase, turn and victory points
//! - error banner (only while a command failure is shown)
//! - opponent summary
//! - lanes in theater order, with deck and trash on the right
//! - score sheet (scoring phase)
//! - hand
//! - controls and key hints

mod board;
mod controls;
mod helpers;
mod popups;
mod theme;

pub use theme::{COLOR_ACTIVE, COLOR_BORDER, COLOR_ERROR, COLOR_LEGAL, COLOR_PREFERRED};

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, ElementKey};
use crate::drag::{DropTarget, DropTargetSet, ZoneTree};
use crate::models::{CardId, GamePhase};

use theme::COLOR_DIM;

/// Minimum height of the lane area.
const MIN_LANE_HEIGHT: u16 = 8;

/// Hand height: a bordered row of three-line cards.
const HAND_HEIGHT: u16 = 5;

/// Drop-zone styling for the drag in progress.
#[derive(Debug, Clone, Default)]
pub struct DragHighlight {
    legal: DropTargetSet,
    active: Option<DropTarget>,
    preferred: Option<DropTarget>,
    dragged: Option<CardId>,
}

impl DragHighlight {
    pub fn from_app(app: &App) -> Self {
        let Some(context) = app.session.context() else {
            return Self::default();
        };
        let legal = app
            .turn_view()
            .map(|view| app.session.legal_targets(&view))
            .unwrap_or_default();
        Self {
            legal,
            active: app.active_target(),
            preferred: context.preferred_target(),
            dragged: Some(context.card_id()),
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragged.is_some()
    }

    pub fn is_dragged(&self, card_id: CardId) -> bool {
        self.dragged == Some(card_id)
    }

    /// Border style of a drop zone.
    pub fn border_style(&self, target: DropTarget) -> Style {
        if self.active == Some(target) {
            Style::default()
                .fg(theme::COLOR_ACTIVE)
                .add_modifier(Modifier::BOLD)
        } else if self.preferred == Some(target) && self.legal.contains(target) {
            Style::default().fg(theme::COLOR_PREFERRED)
        } else if self.legal.contains(target) {
            Style::default().fg(theme::COLOR_LEGAL)
        } else {
            Style::default().fg(theme::COLOR_BORDER)
        }
    }
}

/// Draw the board and rebuild the hit-testing tree.
pub fn render(frame: &mut Frame, app: &mut App) {
    let mut zones = ZoneTree::new();
    draw(frame, app, &mut zones);
    app.zones = zones;
    app.needs_redraw = false;
    // A drag cancelled here asks for another frame to clear its proxy.
    app.prune_gestures();
}

fn draw(frame: &mut Frame, app: &App, zones: &mut ZoneTree<ElementKey>) {
    let area = frame.area();
    let Some(snapshot) = app.snapshot() else {
        let waiting = Paragraph::new(Line::from(Span::styled(
            "Waiting for game state...",
            Style::default().fg(COLOR_DIM),
        )));
        frame.render_widget(waiting, area);
        return;
    };

    let highlight = DragHighlight::from_app(app);
    let show_error = app.sync.error().is_some();
    let show_scores = snapshot.phase == GamePhase::Scoring && !snapshot.is_withdrawal_scoring();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                              // header
            Constraint::Length(if show_error { 1 } else { 0 }), // error
            Constraint::Length(1),                              // opponent
            Constraint::Min(MIN_LANE_HEIGHT),                   // lanes
            Constraint::Length(if show_scores { 3 } else { 0 }), // scores
            Constraint::Length(HAND_HEIGHT),                    // hand
            Constraint::Length(1),                              // controls
            Constraint::Length(1),                              // hints
        ])
        .split(area);

    controls::render_header(frame, chunks[0], app, snapshot);
    if show_error {
        controls::render_error(frame, chunks[1], app, zones);
    }
    controls::render_opponent(frame, chunks[2], app, snapshot);
    board::render_lanes(frame, chunks[3], app, snapshot, &highlight, zones);
    if show_scores {
        controls::render_score_sheet(frame, chunks[4], app, snapshot, zones);
    }
    board::render_hand(frame, chunks[5], app, snapshot, &highlight, zones);
    controls::render_actions(frame, chunks[6], app, zones);
    render_hints(frame, chunks[7], &highlight);

    popups::render_withdraw_confirm(frame, app, zones);
    popups::render_preview(frame, app);
    popups::render_drag_proxy(frame, app);
}

fn render_hints(frame: &mut Frame, area: ratatui::layout::Rect, highlight: &DragHighlight) {
    let text = if highlight.is_dragging() {
        "release over a highlighted zone to drop - release elsewhere to cancel"
    } else {
        "drag cards to play - tap a hand card to flip it - hold to preview - q quit"
    };
    let hints = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(COLOR_DIM),
    )));
    frame.render_widget(hints, area);
}
