//! Application state for the terminal board.
//!
//! The `App` owns the interaction core and is driven synchronously by the
//! event loop: pointer and key input, timer ticks and [`SyncMessage`]s go in,
//! network work to start comes out through [`App::drain_outgoing`].

mod keys;
mod pointer;

use std::time::Instant;

use crate::board::{has_submitted, CardPreview, ScoreSheet};
use crate::drag::{DragContext, DragSession, DropTargetResolver, TouchDragOverlay, TurnView, ZoneTree};
use crate::gesture::{ElementGestures, GestureRouter};
use crate::models::{CardId, GamePhase, GameSnapshot, SessionIds, TheaterType};
use crate::startup::ClientConfig;
use crate::sync::{Command, CommandTicket, PollTicket, StateSyncCoordinator, SyncMessage};

pub use pointer::{CELL_HEIGHT_UNITS, CELL_WIDTH_UNITS};

/// Stable identity of an interactive element on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKey {
    HandCard(CardId),
    TheaterCard(TheaterType, CardId),
    ScoreInput(TheaterType),
    Button(Action),
}

/// Non-drag commands and board controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    DrawCard,
    EndTurn,
    Withdraw,
    /// Answers to the withdraw confirmation.
    ConfirmWithdraw,
    CancelWithdraw,
    SubmitScores,
    NextBattle,
    NextGame,
    DismissError,
}

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Action::DrawCard => "Draw [d]",
            Action::EndTurn => "End turn [e]",
            Action::Withdraw => "Withdraw [w]",
            Action::ConfirmWithdraw => "Withdraw [y]",
            Action::CancelWithdraw => "Keep fighting [n]",
            Action::SubmitScores => "Submit scores [s]",
            Action::NextBattle => "Next battle [n]",
            Action::NextGame => "Next game [g]",
            Action::DismissError => "x",
        }
    }
}

/// Network work the event loop should start.
#[derive(Debug)]
pub enum Outgoing {
    Poll(PollTicket),
    Command(CommandTicket),
}

pub struct App {
    pub config: ClientConfig,
    pub sync: StateSyncCoordinator,
    pub gestures: GestureRouter<ElementKey>,
    pub zones: ZoneTree<ElementKey>,
    pub session: DragSession,
    pub resolver: DropTargetResolver,
    pub overlay: TouchDragOverlay,
    pub preview: Option<CardPreview>,
    pub scores: ScoreSheet,
    pub score_focus: Option<TheaterType>,
    /// Withdraw was asked for and awaits a yes or no.
    pub confirm_withdraw: bool,
    pub should_quit: bool,
    pub needs_redraw: bool,
    /// Last pointer position, in cells.
    pointer_cell: (u16, u16),
    outgoing: Vec<Outgoing>,
}

impl App {
    pub fn new(config: ClientConfig, ids: SessionIds) -> Self {
        let sync = StateSyncCoordinator::new(ids, config.auto_advance);
        let gestures = GestureRouter::new(config.gesture);
        Self {
            config,
            sync,
            gestures,
            zones: ZoneTree::new(),
            session: DragSession::new(),
            resolver: DropTargetResolver::new(),
            overlay: TouchDragOverlay::new(),
            preview: None,
            scores: ScoreSheet::new(),
            score_focus: None,
            confirm_withdraw: false,
            should_quit: false,
            needs_redraw: true,
            pointer_cell: (0, 0),
            outgoing: Vec::new(),
        }
    }

    pub fn snapshot(&self) -> Option<&GameSnapshot> {
        self.sync.snapshot()
    }

    pub fn player_id(&self) -> &str {
        self.sync.player_id()
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    /// Legality view of the current snapshot.
    pub fn turn_view(&self) -> Option<TurnView<'_>> {
        self.sync
            .snapshot()
            .map(|s| TurnView::new(s, self.sync.player_id()).busy(self.sync.is_busy()))
    }

    /// Work queued since the last call.
    pub fn drain_outgoing(&mut self) -> Vec<Outgoing> {
        std::mem::take(&mut self.outgoing)
    }

    /// Install the first snapshot, or request one if bootstrap had none.
    pub fn start(&mut self, initial: Option<GameSnapshot>) {
        match initial {
            Some(snapshot) => {
                if let Some(ticket) = self.sync.install(snapshot) {
                    self.outgoing.push(Outgoing::Command(ticket));
                }
                self.after_snapshot();
            }
            None => self.handle_sync(SyncMessage::PollDue),
        }
    }

    pub fn handle_sync(&mut self, message: SyncMessage) {
        let follow_up = match message {
            SyncMessage::PollDue => {
                if let Some(ticket) = self.sync.begin_poll() {
                    self.outgoing.push(Outgoing::Poll(ticket));
                }
                return;
            }
            SyncMessage::PollCompleted { ticket, result } => self.sync.complete_poll(ticket, result),
            SyncMessage::CommandCompleted { ticket, result } => {
                self.sync.complete_command(ticket, result)
            }
        };
        if let Some(ticket) = follow_up {
            self.outgoing.push(Outgoing::Command(ticket));
        }
        self.after_snapshot();
    }

    /// Admit a command through the gate and queue it.
    pub fn dispatch(&mut self, command: Command) {
        match self.sync.begin_command(command) {
            Ok(ticket) => self.outgoing.push(Outgoing::Command(ticket)),
            Err(err) => tracing::debug!(error = %err, "command not dispatched"),
        }
        self.mark_dirty();
    }

    pub fn perform(&mut self, action: Action) {
        match action {
            Action::DrawCard => self.dispatch(Command::DrawCard),
            Action::EndTurn => self.dispatch(Command::EndTurn),
            Action::Withdraw => {
                self.confirm_withdraw = true;
                self.mark_dirty();
            }
            Action::ConfirmWithdraw => {
                if std::mem::take(&mut self.confirm_withdraw) {
                    self.dispatch(Command::Withdraw);
                }
            }
            Action::CancelWithdraw => {
                self.confirm_withdraw = false;
                self.mark_dirty();
            }
            Action::NextBattle => self.dispatch(Command::AdvanceBattle { automatic: false }),
            Action::NextGame => self.dispatch(Command::AdvanceGame),
            Action::SubmitScores => self.submit_scores(),
            Action::DismissError => {
                self.sync.dismiss_error();
                self.mark_dirty();
            }
        }
    }

    fn submit_scores(&mut self) {
        let Some(snapshot) = self.sync.snapshot() else {
            return;
        };
        if snapshot.phase != GamePhase::Scoring
            || has_submitted(snapshot, self.sync.player_id(), true)
        {
            return;
        }
        match self.scores.submission(&snapshot.theater_order()) {
            Ok(command) => self.dispatch(command),
            Err(message) => {
                self.sync.set_error(message);
                self.mark_dirty();
            }
        }
    }

    /// Controls that apply to the current snapshot, in display order.
    pub fn available_actions(&self) -> Vec<Action> {
        let Some(view) = self.turn_view() else {
            return Vec::new();
        };
        let me = self.sync.player_id();
        match view.snapshot.phase {
            GamePhase::Playing if view.is_my_turn() => {
                vec![Action::DrawCard, Action::EndTurn, Action::Withdraw]
            }
            GamePhase::Scoring if view.snapshot.withdrew_player_id.is_some() => {
                vec![Action::NextBattle]
            }
            GamePhase::Scoring => {
                if !has_submitted(view.snapshot, me, true) {
                    vec![Action::SubmitScores]
                } else if has_submitted(view.snapshot, me, false) {
                    vec![Action::NextBattle]
                } else {
                    Vec::new()
                }
            }
            GamePhase::GameOver => vec![Action::NextGame],
            _ => Vec::new(),
        }
    }

    /// Which gestures `key` takes part in right now.
    pub fn element_gestures(&self, key: &ElementKey) -> ElementGestures {
        let can_act = self.turn_view().is_some_and(|v| v.can_act());
        match key {
            ElementKey::HandCard(_) => ElementGestures::default()
                .draggable(can_act)
                .double_tap(true),
            ElementKey::TheaterCard(theater, id) => {
                let is_my_top = self
                    .snapshot()
                    .and_then(|s| s.top_card_of(*theater, self.sync.player_id()))
                    .is_some_and(|top| top.card.id == *id);
                ElementGestures::default().draggable(can_act && is_my_top)
            }
            ElementKey::ScoreInput(_) | ElementKey::Button(_) => ElementGestures::CLICK_ONLY,
        }
    }

    /// Drag context for the element, built from the current snapshot.
    fn drag_context_for(&self, key: &ElementKey) -> Option<DragContext> {
        let snapshot = self.snapshot()?;
        match key {
            ElementKey::HandCard(id) => snapshot
                .hand_of(self.sync.player_id())
                .iter()
                .find(|c| c.id == *id)
                .map(|card| DragContext::Hand {
                    card: card.clone(),
                    face_up: self.sync.face_up(card.id),
                }),
            ElementKey::TheaterCard(theater, id) => snapshot
                .theater(*theater)?
                .cards
                .iter()
                .find(|p| p.card.id == *id)
                .map(|played| DragContext::Theater {
                    theater: *theater,
                    played: played.clone(),
                }),
            _ => None,
        }
    }

    fn preview_for(&self, key: &ElementKey) -> Option<CardPreview> {
        let snapshot = self.snapshot()?;
        match key {
            ElementKey::HandCard(id) => snapshot
                .hand_of(self.sync.player_id())
                .iter()
                .find(|c| c.id == *id)
                .map(|card| CardPreview::for_hand(card, self.sync.faces())),
            ElementKey::TheaterCard(theater, id) => snapshot
                .theater(*theater)?
                .cards
                .iter()
                .find(|p| p.card.id == *id)
                // The opponent's face-down cards stay hidden.
                .filter(|p| p.face_up || p.owner_id == self.sync.player_id())
                .map(CardPreview::for_played),
            _ => None,
        }
    }

    pub fn close_preview(&mut self) -> bool {
        let was_open = self.preview.take().is_some();
        if was_open {
            self.mark_dirty();
        }
        was_open
    }

    /// Keep view state consistent with the current snapshot.
    fn after_snapshot(&mut self) {
        if let Some(snapshot) = self.sync.snapshot() {
            self.scores.sync_with(snapshot, self.sync.player_id());
            if snapshot.phase != GamePhase::Scoring {
                self.score_focus = None;
            }
        }
        if self.confirm_withdraw && !self.available_actions().contains(&Action::Withdraw) {
            tracing::debug!("withdraw no longer possible, confirmation dropped");
            self.confirm_withdraw = false;
        }
        self.mark_dirty();
    }

    /// Tear down recognizers for elements the last render did not draw.
    pub fn prune_gestures(&mut self) {
        let zones = &self.zones;
        let before = self.gestures.len();
        let cancelled = self.gestures.retain(|key| zones.contains_key(key));
        let removed = before - self.gestures.len();
        if removed > 0 {
            tracing::trace!(count = removed, "gesture recognizers torn down");
        }
        for (key, event) in cancelled {
            tracing::debug!(key = ?key, "dragged element no longer drawn");
            self.apply_gesture(key, event);
        }
    }

    /// Earliest gesture timer, for sizing the event loop's wait.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.gestures.next_deadline()
    }
}

#[cfg(test)]
mod tests;
