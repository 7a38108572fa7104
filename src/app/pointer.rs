//! Pointer input: cells in, gestures out, drops dispatched.
//!
//! A terminal has no native drag events, so drags from the board go through
//! the coordinate overlay. Mouse-kind drags resolve by hovered element.

use ratatui::layout::Position;
use std::time::Instant;

use super::{Action, App, ElementKey};
use crate::drag::{DropDecision, DropTarget, TurnView};
use crate::gesture::{GestureEvent, Point, PointerInput, PointerKind};
use crate::sync::ActionDispatcher;

/// Pointer units per terminal column, so thresholds keep roughly their
/// on-screen meaning.
pub const CELL_WIDTH_UNITS: f32 = 8.0;
/// Pointer units per terminal row.
pub const CELL_HEIGHT_UNITS: f32 = 16.0;

fn to_point(col: u16, row: u16) -> Point {
    Point::new(col as f32 * CELL_WIDTH_UNITS, row as f32 * CELL_HEIGHT_UNITS)
}

impl App {
    pub fn pointer_down(&mut self, col: u16, row: u16, kind: PointerKind, now: Instant) {
        self.pointer_cell = (col, row);
        if self.close_preview() {
            return;
        }
        let key = self.zones.key_at(col, row);
        let answers_confirm = matches!(
            key,
            Some(ElementKey::Button(Action::ConfirmWithdraw | Action::CancelWithdraw))
        );
        if self.confirm_withdraw && !answers_confirm {
            self.perform(Action::CancelWithdraw);
            return;
        }
        let element = key
            .as_ref()
            .map(|k| self.element_gestures(k))
            .unwrap_or_default();
        let input = PointerInput::Down {
            position: to_point(col, row),
            kind,
        };
        let events = self.gestures.press(key, element, input, now);
        self.apply_gestures(events);
    }

    pub fn pointer_move(&mut self, col: u16, row: u16, now: Instant) {
        self.pointer_cell = (col, row);
        let events = self.gestures.route(
            PointerInput::Move {
                position: to_point(col, row),
            },
            now,
        );
        self.apply_gestures(events);
    }

    pub fn pointer_up(&mut self, col: u16, row: u16, now: Instant) {
        self.pointer_cell = (col, row);
        let events = self.gestures.route(
            PointerInput::Up {
                position: to_point(col, row),
            },
            now,
        );
        self.apply_gestures(events);
    }

    pub fn pointer_cancel(&mut self, now: Instant) {
        let events = self.gestures.route(PointerInput::Cancel, now);
        self.apply_gestures(events);
    }

    /// Fire gesture timers (long-press, deferred click).
    pub fn tick(&mut self, now: Instant) {
        let events = self.gestures.tick(now);
        self.apply_gestures(events);
    }

    fn apply_gestures(&mut self, events: Vec<(ElementKey, GestureEvent)>) {
        for (key, event) in events {
            self.apply_gesture(key, event);
        }
    }

    pub(super) fn apply_gesture(&mut self, key: ElementKey, event: GestureEvent) {
        tracing::debug!(key = ?key, event = ?event, "gesture");
        match event {
            GestureEvent::Click => self.click(key),
            GestureEvent::DoubleTap => {
                if matches!(key, ElementKey::HandCard(_)) {
                    self.preview = self.preview_for(&key);
                }
            }
            GestureEvent::LongPress { .. } => {
                self.preview = self.preview_for(&key);
            }
            GestureEvent::DragStart { kind, .. } => self.drag_start(key, kind),
            GestureEvent::DragMove { .. } => self.drag_move(),
            GestureEvent::DragEnd { .. } => self.drag_end(),
            GestureEvent::DragCancel => {
                self.overlay.on_cancel(&mut self.session, &mut self.resolver);
            }
        }
        self.mark_dirty();
    }

    fn click(&mut self, key: ElementKey) {
        match key {
            ElementKey::HandCard(id) => {
                self.sync.toggle_face(id);
            }
            ElementKey::ScoreInput(theater) => self.score_focus = Some(theater),
            ElementKey::Button(action) => self.perform(action),
            ElementKey::TheaterCard(..) => {}
        }
    }

    fn drag_start(&mut self, key: ElementKey, kind: PointerKind) {
        let Some(context) = self.drag_context_for(&key) else {
            return;
        };
        let (col, row) = self.pointer_cell;
        let Some(snapshot) = self.sync.snapshot() else {
            return;
        };
        let view = TurnView::new(snapshot, self.sync.player_id())
            .busy(self.sync.is_busy());
        if self.session.begin_drag(context, kind, &view) {
            self.overlay.begin(&self.session, Position::new(col, row));
            self.drag_move();
        }
    }

    fn drag_move(&mut self) {
        if !self.session.is_open() {
            return;
        }
        let (col, row) = self.pointer_cell;
        let Some(snapshot) = self.sync.snapshot() else {
            return;
        };
        let view = TurnView::new(snapshot, self.sync.player_id())
            .busy(self.sync.is_busy());
        if self.overlay.is_active() {
            self.overlay.on_move(
                &self.session,
                &mut self.resolver,
                &self.zones,
                &view,
                Position::new(col, row),
            );
            return;
        }
        let legal = self.session.legal_targets(&view);
        let order = view.theater_order();
        match self.zones.element_at(col, row) {
            Some(element) => {
                self.resolver.drag_over(&self.zones, element, &legal, &order);
            }
            None => {
                self.resolver.clear();
            }
        }
    }

    fn drag_end(&mut self) {
        let (col, row) = self.pointer_cell;
        let Some(snapshot) = self.sync.snapshot() else {
            self.session.end_drag();
            return;
        };
        let view = TurnView::new(snapshot, self.sync.player_id())
            .busy(self.sync.is_busy());

        let decision = if self.overlay.is_active() {
            self.overlay.on_release(
                &mut self.session,
                &mut self.resolver,
                &self.zones,
                &view,
                Position::new(col, row),
            )
        } else {
            let legal = self.session.legal_targets(&view);
            let order = view.theater_order();
            let element = self.zones.element_at(col, row);
            let target = self.resolver.drop(&self.zones, element, &legal, &order);
            let context = self.session.end_drag();
            context.zip(target).map(|(context, target)| DropDecision { context, target })
        };

        if let Some(command) = decision.as_ref().and_then(ActionDispatcher::command_for_drop) {
            self.dispatch(command);
        }
    }

    /// Active drop target, for highlighting.
    pub fn active_target(&self) -> Option<DropTarget> {
        if self.session.is_open() {
            self.resolver.active()
        } else {
            None
        }
    }

    /// Proxy position of a touch drag, in cells.
    pub fn proxy_position(&self) -> Option<Position> {
        self.overlay.proxy()
    }
}
