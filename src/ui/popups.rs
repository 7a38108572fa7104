//! Floating layers: the card preview, the withdraw confirmation and the
//! touch drag proxy.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{Action, App, ElementKey};
use crate::drag::{Element, ZoneTree};

use super::controls::push_button;
use super::helpers::{card_label, centered_rect, truncate_to_width};
use super::theme::{
    theater_color, COLOR_ACTIVE, COLOR_DIM, COLOR_ERROR, COLOR_FACE_DOWN, COLOR_FOCUS,
    COLOR_HEADER,
};

const PREVIEW_WIDTH: u16 = 32;
const PREVIEW_HEIGHT: u16 = 7;

const CONFIRM_WIDTH: u16 = 56;
const CONFIRM_HEIGHT: u16 = 6;
const CONFIRM_QUESTION: &str = "Are you sure you want to withdraw from this battle?";

/// Longest proxy label, in columns.
const PROXY_MAX_WIDTH: usize = 20;

pub fn render_preview(frame: &mut Frame, app: &App) {
    let Some(preview) = &app.preview else {
        return;
    };
    let area = centered_rect(frame.area(), PREVIEW_WIDTH, PREVIEW_HEIGHT);
    frame.render_widget(Clear, area);

    let card = &preview.card;
    let color = theater_color(card.theater);
    let face = if preview.face_up {
        Span::styled("face up", Style::default().fg(COLOR_HEADER))
    } else {
        Span::styled("face down", Style::default().fg(COLOR_FACE_DOWN))
    };
    let lines = vec![
        Line::from(Span::styled(
            card.name.clone(),
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(card.theater.label(), Style::default().fg(color)),
            Span::raw(format!("  strength {}", card.strength)),
        ]),
        Line::from(face),
        Line::from(Span::styled(
            "press anywhere or Esc to close",
            Style::default().fg(COLOR_DIM),
        )),
    ];
    let widget = Paragraph::new(lines).block(
        Block::default()
            .title(" Card ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color)),
    );
    frame.render_widget(widget, area);
}

/// Yes/no box in front of a withdraw. Blocks the board beneath it.
pub fn render_withdraw_confirm(frame: &mut Frame, app: &App, zones: &mut ZoneTree<ElementKey>) {
    if !app.confirm_withdraw {
        return;
    }
    let area = centered_rect(frame.area(), CONFIRM_WIDTH, CONFIRM_HEIGHT);
    frame.render_widget(Clear, area);
    zones.push(Element {
        rect: area,
        parent: None,
        drop_target: None,
        key: None,
    });

    let block = Block::default()
        .title(" Withdraw ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_ERROR));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let question = truncate_to_width(CONFIRM_QUESTION, inner.width as usize);
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(question, Style::default().fg(COLOR_HEADER))),
            Line::from(Span::styled(
                "the opponent scores this battle",
                Style::default().fg(COLOR_DIM),
            )),
        ]),
        inner,
    );

    if inner.height == 0 {
        return;
    }
    let row = inner.bottom() - 1;
    let mut x = inner.x;
    for (action, color) in [
        (Action::ConfirmWithdraw, COLOR_ERROR),
        (Action::CancelWithdraw, COLOR_FOCUS),
    ] {
        let label = format!("[ {} ]", action.label());
        let width = (label.width() as u16).min(inner.right().saturating_sub(x));
        if width == 0 {
            break;
        }
        let rect = Rect {
            x,
            y: row,
            width,
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                label,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))),
            rect,
        );
        push_button(zones, rect, action);
        x += width + 2;
    }
}

/// The proxy label follows the pointer while a touch drag is open.
pub fn render_drag_proxy(frame: &mut Frame, app: &App) {
    let (Some(at), Some(context)) = (app.proxy_position(), app.session.context()) else {
        return;
    };
    let frame_area = frame.area();
    if !frame_area.contains(at) {
        return;
    }
    let label = truncate_to_width(
        &format!("[{}]", card_label(context.card(), context.face_up())),
        PROXY_MAX_WIDTH,
    );
    let width = (label.width() as u16).min(frame_area.right() - at.x);
    let rect = Rect {
        x: at.x,
        y: at.y,
        width,
        height: 1,
    };
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            label,
            Style::default()
                .fg(COLOR_ACTIVE)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        ))),
        rect,
    );
}
