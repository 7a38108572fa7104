//! Lanes, deck, trash and hand.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::app::{App, ElementKey};
use crate::drag::{DropTarget, ElementId, ZoneTree};
use crate::models::{GamePhase, GameSnapshot, PlayedCard, TheaterType};

use super::helpers::{card_label, inner_rect, truncate_to_width};
use super::theme::{theater_color, COLOR_DIM, COLOR_FACE_DOWN, COLOR_HEADER};
use super::DragHighlight;

/// Width of the deck/trash column.
const PILE_WIDTH: u16 = 18;

/// Preferred width of one hand card.
const HAND_CARD_WIDTH: u16 = 18;

pub fn render_lanes(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    snapshot: &GameSnapshot,
    highlight: &DragHighlight,
    zones: &mut ZoneTree<ElementKey>,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(PILE_WIDTH)])
        .split(area);

    let order = snapshot.theater_order();
    let lanes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            order
                .iter()
                .map(|_| Constraint::Ratio(1, order.len().max(1) as u32))
                .collect::<Vec<_>>(),
        )
        .split(columns[0]);

    for (theater, lane) in order.iter().zip(lanes.iter()) {
        render_lane(frame, *lane, app, snapshot, *theater, highlight, zones);
    }

    render_piles(frame, columns[1], snapshot, highlight, zones);
}

fn render_lane(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    snapshot: &GameSnapshot,
    theater: TheaterType,
    highlight: &DragHighlight,
    zones: &mut ZoneTree<ElementKey>,
) {
    let me = app.player_id();
    let target = DropTarget::Theater(theater);
    let zone = zones.add_zone(area, target);

    let mut title = vec![Span::styled(
        format!(" {} ", theater.label()),
        Style::default()
            .fg(theater_color(theater))
            .add_modifier(Modifier::BOLD),
    )];
    if snapshot.phase == GamePhase::Scoring && snapshot.theater_scores.is_some() {
        title.push(Span::styled(
            format!(
                "you {} / opp {} ",
                snapshot.recorded_score(theater, me, true),
                snapshot.recorded_score(theater, me, false)
            ),
            Style::default().fg(COLOR_DIM),
        ));
    }
    let block = Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(highlight.border_style(target));
    frame.render_widget(block, area);

    let inner = inner_rect(area, 1);
    let halves = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let Some(lane) = snapshot.theater(theater) else {
        return;
    };
    let opponent: Vec<&PlayedCard> = lane.cards.iter().filter(|p| p.owner_id != me).collect();
    let mine: Vec<&PlayedCard> = lane.stack_of(me).collect();

    render_stack(frame, halves[0], theater, &opponent, false, highlight, zone, zones);
    render_stack(frame, halves[1], theater, &mine, true, highlight, zone, zones);
}

/// One stack, one line per card, top card last. When the stack is taller
/// than the area the bottom of the stack is cut.
#[allow(clippy::too_many_arguments)]
fn render_stack(
    frame: &mut Frame,
    area: Rect,
    theater: TheaterType,
    stack: &[&PlayedCard],
    own: bool,
    highlight: &DragHighlight,
    parent: ElementId,
    zones: &mut ZoneTree<ElementKey>,
) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    let visible = stack.len().min(area.height as usize);
    let skip = stack.len() - visible;
    for (row, played) in stack.iter().skip(skip).enumerate() {
        let is_top = skip + row + 1 == stack.len();
        let rect = Rect {
            x: area.x,
            y: area.y + row as u16,
            width: area.width,
            height: 1,
        };
        let marker = if is_top { "> " } else { "  " };
        let label = card_label(&played.card, played.face_up);
        let text = truncate_to_width(
            &format!("{}{}", marker, label),
            area.width as usize,
        );
        let mut style = if !played.face_up {
            Style::default().fg(COLOR_FACE_DOWN)
        } else if own {
            Style::default().fg(COLOR_HEADER)
        } else {
            Style::default().fg(theater_color(played.card.theater))
        };
        if highlight.is_dragged(played.card.id) {
            style = style.add_modifier(Modifier::DIM);
        }
        frame.render_widget(Paragraph::new(Line::from(Span::styled(text, style))), rect);
        zones.add_child(parent, rect, ElementKey::TheaterCard(theater, played.card.id));
    }
}

fn render_piles(
    frame: &mut Frame,
    area: Rect,
    snapshot: &GameSnapshot,
    highlight: &DragHighlight,
    zones: &mut ZoneTree<ElementKey>,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    zones.add_zone(rows[0], DropTarget::Deck);
    let deck = Paragraph::new(Line::from(Span::styled(
        format!("{} cards", snapshot.deck.len()),
        Style::default().fg(COLOR_DIM),
    )))
    .block(
        Block::default()
            .title(" Deck ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(highlight.border_style(DropTarget::Deck)),
    );
    frame.render_widget(deck, rows[0]);

    zones.add_zone(rows[1], DropTarget::Trash);
    let mut lines = vec![Line::from(Span::styled(
        format!("{} cards", snapshot.trash.len()),
        Style::default().fg(COLOR_DIM),
    ))];
    if let Some(top) = snapshot.trash.last() {
        let width = rows[1].width.saturating_sub(2) as usize;
        lines.push(Line::from(Span::styled(
            truncate_to_width(&card_label(top, true), width),
            Style::default().fg(theater_color(top.theater)),
        )));
    }
    let trash = Paragraph::new(lines).block(
        Block::default()
            .title(" Trash ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(highlight.border_style(DropTarget::Trash)),
    );
    frame.render_widget(trash, rows[1]);
}

pub fn render_hand(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    snapshot: &GameSnapshot,
    highlight: &DragHighlight,
    zones: &mut ZoneTree<ElementKey>,
) {
    let zone = zones.add_zone(area, DropTarget::Hand);
    let hand = snapshot.hand_of(app.player_id());
    let block = Block::default()
        .title(format!(" Your hand ({}) ", hand.len()))
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(highlight.border_style(DropTarget::Hand));
    frame.render_widget(block, area);

    let inner = inner_rect(area, 1);
    if hand.is_empty() || inner.width == 0 {
        return;
    }
    let card_width = HAND_CARD_WIDTH
        .min(inner.width / hand.len() as u16)
        .max(4);

    for (i, card) in hand.iter().enumerate() {
        let x = inner.x + i as u16 * card_width;
        if x + card_width > inner.x + inner.width {
            break;
        }
        let rect = Rect {
            x,
            y: inner.y,
            width: card_width,
            height: inner.height,
        };
        let face_up = app.sync.face_up(card.id);
        let mut border = Style::default().fg(if face_up {
            theater_color(card.theater)
        } else {
            COLOR_FACE_DOWN
        });
        if highlight.is_dragged(card.id) {
            border = border.add_modifier(Modifier::DIM);
        }
        let body_width = card_width.saturating_sub(2) as usize;
        let lines = if face_up {
            vec![Line::from(Span::styled(
                truncate_to_width(&card.name, body_width),
                Style::default().fg(COLOR_HEADER),
            ))]
        } else {
            vec![Line::from(Span::styled(
                truncate_to_width(&format!("down: {}", card.name), body_width),
                Style::default().fg(COLOR_FACE_DOWN),
            ))]
        };
        let title = format!("{} {}", card.theater.label(), card.strength);
        let widget = Paragraph::new(lines).block(
            Block::default()
                .title(truncate_to_width(&title, body_width))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(border),
        );
        frame.render_widget(widget, rect);
        zones.add_child(zone, rect, ElementKey::HandCard(card.id));
    }
}
