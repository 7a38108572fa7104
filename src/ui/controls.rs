//! Header, error banner, score sheet and control buttons.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{Action, App, ElementKey};
use crate::board::has_submitted;
use crate::drag::{Element, ZoneTree};
use crate::models::{GamePhase, GameSnapshot};

use super::helpers::truncate_to_width;
use super::theme::{theater_color, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_FOCUS, COLOR_HEADER};

/// Width of one score input, borders included.
const SCORE_INPUT_WIDTH: u16 = 16;

pub(super) fn push_button(zones: &mut ZoneTree<ElementKey>, rect: Rect, action: Action) {
    zones.push(Element {
        rect,
        parent: None,
        drop_target: None,
        key: Some(ElementKey::Button(action)),
    });
}

pub fn render_header(frame: &mut Frame, area: Rect, app: &App, snapshot: &GameSnapshot) {
    let me = app.player_id();
    let turn = match snapshot.phase {
        GamePhase::Playing if snapshot.is_turn_of(me) => "your turn",
        GamePhase::Playing => "opponent's turn",
        GamePhase::Scoring if snapshot.is_withdrawal_scoring() => "battle withdrawn",
        GamePhase::Scoring => "scoring",
        GamePhase::GameOver => "game over",
        GamePhase::Waiting => "waiting",
    };
    let mine = snapshot.player(me).map(|p| p.score).unwrap_or(0);
    let theirs = snapshot.opponent_of(me).map(|p| p.score).unwrap_or(0);

    let mut spans = vec![
        Span::styled(
            "FRONTLINE ",
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("battle {} | {} ", snapshot.battle_number, turn),
            Style::default().fg(COLOR_HEADER),
        ),
        Span::styled(
            format!("| VP you {} opp {}", mine, theirs),
            Style::default().fg(COLOR_DIM),
        ),
    ];
    if app.sync.is_busy() {
        spans.push(Span::styled(" ...", Style::default().fg(COLOR_DIM)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

pub fn render_error(frame: &mut Frame, area: Rect, app: &App, zones: &mut ZoneTree<ElementKey>) {
    let Some(message) = app.sync.error() else {
        return;
    };
    let dismiss = format!(" [{}]", Action::DismissError.label());
    let dismiss_width = dismiss.width() as u16;
    let text_width = area.width.saturating_sub(dismiss_width) as usize;
    let line = Line::from(vec![
        Span::styled(
            truncate_to_width(message, text_width),
            Style::default().fg(COLOR_ERROR).add_modifier(Modifier::BOLD),
        ),
        Span::styled(dismiss.clone(), Style::default().fg(COLOR_DIM)),
    ]);
    frame.render_widget(Paragraph::new(line), area);

    let used = message.width().min(text_width) as u16;
    let rect = Rect {
        x: area.x + used,
        y: area.y,
        width: dismiss_width.min(area.width.saturating_sub(used)),
        height: 1,
    };
    push_button(zones, rect, Action::DismissError);
}

pub fn render_opponent(frame: &mut Frame, area: Rect, app: &App, snapshot: &GameSnapshot) {
    let me = app.player_id();
    let Some(opponent) = snapshot.opponent_of(me) else {
        return;
    };
    let mut text = format!("{}: {} cards in hand", opponent.name, opponent.hand.len());
    if let Some(withdrew) = snapshot.withdrew_player_id.as_deref() {
        let who = if withdrew == me { "You" } else { opponent.name.as_str() };
        text.push_str(&format!(" | {} withdrew", who));
    }
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(text, Style::default().fg(COLOR_DIM)))),
        area,
    );
}

pub fn render_score_sheet(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    snapshot: &GameSnapshot,
    zones: &mut ZoneTree<ElementKey>,
) {
    let me = app.player_id();
    if has_submitted(snapshot, me, true) {
        let text = if has_submitted(snapshot, me, false) {
            "Both players submitted."
        } else {
            "Scores submitted, waiting for opponent."
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(text, Style::default().fg(COLOR_DIM)))),
            area,
        );
        return;
    }

    for (i, theater) in snapshot.theater_order().into_iter().enumerate() {
        let x = area.x + i as u16 * SCORE_INPUT_WIDTH;
        if x + SCORE_INPUT_WIDTH > area.x + area.width {
            break;
        }
        let rect = Rect {
            x,
            y: area.y,
            width: SCORE_INPUT_WIDTH,
            height: area.height,
        };
        let focused = app.score_focus == Some(theater);
        let value = app.scores.input(theater);
        let cursor = if focused { "_" } else { "" };
        let widget = Paragraph::new(Line::from(format!("{}{}", value, cursor))).block(
            Block::default()
                .title(Span::styled(
                    format!(" {} ", theater.label()),
                    Style::default().fg(theater_color(theater)),
                ))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(if focused { COLOR_FOCUS } else { COLOR_BORDER })),
        );
        frame.render_widget(widget, rect);
        zones.push(Element {
            rect,
            parent: None,
            drop_target: None,
            key: Some(ElementKey::ScoreInput(theater)),
        });
    }
}

/// Buttons for the actions that apply right now, left to right.
pub fn render_actions(frame: &mut Frame, area: Rect, app: &App, zones: &mut ZoneTree<ElementKey>) {
    let mut x = area.x;
    let enabled = !app.sync.is_busy();
    for action in app.available_actions() {
        let label = format!("[ {} ]", action.label());
        let width = label.width() as u16;
        if x + width > area.x + area.width {
            break;
        }
        let rect = Rect {
            x,
            y: area.y,
            width,
            height: 1,
        };
        let style = if enabled {
            Style::default().fg(COLOR_FOCUS).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(COLOR_DIM)
        };
        frame.render_widget(Paragraph::new(Line::from(Span::styled(label, style))), rect);
        push_button(zones, rect, action);
        x += width + 1;
    }
}
