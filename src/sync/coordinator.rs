//! Owns the authoritative snapshot and everything reconciled against it.
//!
//! Network calls happen elsewhere; the coordinator only decides when they may
//! start and what to do with their results. Completion handlers may hand back
//! an already-admitted automatic advance for the caller to issue.

use crate::api::Command;
use crate::error::{ApiError, DispatchError};
use crate::models::{CardId, GamePhase, GameSnapshot, SessionIds};

use super::dispatcher::{ActionDispatcher, CommandTicket};
use super::face_state::LocalFaceState;

/// Which clients issue the automatic advance after a withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoAdvancePolicy {
    /// Every client watching the game.
    #[default]
    AnyClient,
    /// Only the client of the player who withdrew.
    WithdrawingPlayerOnly,
}

/// A poll that was allowed to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollTicket {
    epoch: u64,
    seq: u64,
}

#[derive(Debug)]
pub struct StateSyncCoordinator {
    ids: SessionIds,
    snapshot: Option<GameSnapshot>,
    /// Bumped whenever a command completes; polls started earlier are stale.
    epoch: u64,
    /// Polls issued so far, and the newest one whose snapshot was applied.
    polls_issued: u64,
    poll_applied: u64,
    dispatcher: ActionDispatcher,
    faces: LocalFaceState,
    error: Option<String>,
    policy: AutoAdvancePolicy,
    /// Battle number the last automatic advance was issued for.
    advanced_battle: Option<u32>,
}

impl StateSyncCoordinator {
    pub fn new(ids: SessionIds, policy: AutoAdvancePolicy) -> Self {
        Self {
            ids,
            snapshot: None,
            epoch: 0,
            polls_issued: 0,
            poll_applied: 0,
            dispatcher: ActionDispatcher::new(),
            faces: LocalFaceState::new(),
            error: None,
            policy,
            advanced_battle: None,
        }
    }

    pub fn ids(&self) -> &SessionIds {
        &self.ids
    }

    pub fn player_id(&self) -> &str {
        &self.ids.player_id
    }

    pub fn snapshot(&self) -> Option<&GameSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.dispatcher.is_busy()
    }

    pub fn dispatcher(&self) -> &ActionDispatcher {
        &self.dispatcher
    }

    /// Transient message for the last failed command.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Show a message that did not come from a command (e.g. local validation).
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn faces(&self) -> &LocalFaceState {
        &self.faces
    }

    pub fn face_up(&self, card_id: CardId) -> bool {
        self.faces.face_up(card_id)
    }

    /// Toggle a hand card's face. Ignored for cards not in the player's hand.
    pub fn toggle_face(&mut self, card_id: CardId) -> Option<bool> {
        let in_hand = self
            .snapshot
            .as_ref()
            .is_some_and(|s| s.hand_contains(&self.ids.player_id, card_id));
        in_hand.then(|| self.faces.toggle(card_id))
    }

    pub fn last_advanced_battle(&self) -> Option<u32> {
        self.advanced_battle
    }

    /// Install the first snapshot (from bootstrap or the first poll).
    pub fn install(&mut self, snapshot: GameSnapshot) -> Option<CommandTicket> {
        self.apply_snapshot(snapshot);
        self.evaluate_auto_advance()
    }

    /// Admit a user command through the single in-flight gate.
    ///
    /// Starting a command clears the previous error message.
    pub fn begin_command(&mut self, command: Command) -> Result<CommandTicket, DispatchError> {
        if self.snapshot.is_none() {
            return Err(DispatchError::NoSnapshot {
                requested: command.kind(),
            });
        }
        let ticket = self.dispatcher.try_begin(command)?;
        if !ticket.command().is_automatic() {
            self.error = None;
        }
        tracing::info!(command = %ticket.kind(), ticket = ticket.id(), "command issued");
        Ok(ticket)
    }

    /// Reconcile a command response.
    ///
    /// Success replaces the snapshot wholesale; failure keeps it and surfaces
    /// the command's fixed message, except for the automatic advance, which
    /// fails silently and is retried on the next qualifying snapshot.
    pub fn complete_command(
        &mut self,
        ticket: CommandTicket,
        result: Result<GameSnapshot, ApiError>,
    ) -> Option<CommandTicket> {
        if !self.dispatcher.finish(&ticket) {
            tracing::warn!(command = %ticket.kind(), ticket = ticket.id(), "completion for unknown ticket ignored");
            return None;
        }
        self.epoch += 1;
        match result {
            Ok(snapshot) => {
                tracing::info!(command = %ticket.kind(), "command succeeded");
                self.apply_snapshot(snapshot);
                self.evaluate_auto_advance()
            }
            Err(err) if ticket.command().is_automatic() => {
                tracing::warn!(
                    command = %ticket.kind(),
                    battle = ?self.advanced_battle,
                    error = %err,
                    "automatic advance failed, will retry on next snapshot"
                );
                self.advanced_battle = None;
                None
            }
            Err(err) => {
                tracing::warn!(command = %ticket.kind(), error = %err, code = err.error_code(), "command failed");
                self.error = Some(ticket.kind().failure_message().to_string());
                self.evaluate_auto_advance()
            }
        }
    }

    /// Start a poll, unless a command is in flight.
    pub fn begin_poll(&mut self) -> Option<PollTicket> {
        if self.dispatcher.is_busy() {
            tracing::trace!("poll skipped: command in flight");
            return None;
        }
        self.polls_issued += 1;
        Some(PollTicket {
            epoch: self.epoch,
            seq: self.polls_issued,
        })
    }

    /// Reconcile a poll response.
    ///
    /// Failures are logged and leave the snapshot untouched. Responses from a
    /// poll that started before the latest command completed are dropped, and
    /// so are responses older than a poll already applied.
    pub fn complete_poll(
        &mut self,
        ticket: PollTicket,
        result: Result<GameSnapshot, ApiError>,
    ) -> Option<CommandTicket> {
        if self.dispatcher.is_busy() || ticket.epoch != self.epoch {
            tracing::debug!(
                poll_epoch = ticket.epoch,
                epoch = self.epoch,
                "stale poll response discarded"
            );
            return None;
        }
        if ticket.seq <= self.poll_applied {
            tracing::debug!(
                poll = ticket.seq,
                applied = self.poll_applied,
                "out-of-order poll response discarded"
            );
            return None;
        }
        match result {
            Ok(snapshot) => {
                self.poll_applied = ticket.seq;
                self.apply_snapshot(snapshot);
                self.evaluate_auto_advance()
            }
            Err(err) => {
                tracing::warn!(error = %err, code = err.error_code(), "poll failed");
                None
            }
        }
    }

    fn apply_snapshot(&mut self, snapshot: GameSnapshot) {
        let previous = self.snapshot.as_ref().map(|s| (s.phase, s.battle_number));
        if previous != Some((snapshot.phase, snapshot.battle_number)) {
            tracing::info!(
                phase = %snapshot.phase,
                battle = snapshot.battle_number,
                "game state changed"
            );
        }
        if matches!(snapshot.phase, GamePhase::Playing | GamePhase::GameOver) {
            self.advanced_battle = None;
        }
        self.faces.prune(snapshot.hand_of(&self.ids.player_id));
        self.snapshot = Some(snapshot);
    }

    /// Admit the automatic advance if the snapshot calls for one.
    fn evaluate_auto_advance(&mut self) -> Option<CommandTicket> {
        if self.dispatcher.is_busy() {
            return None;
        }
        let snapshot = self.snapshot.as_ref()?;
        if !snapshot.is_withdrawal_scoring() {
            return None;
        }
        if self.policy == AutoAdvancePolicy::WithdrawingPlayerOnly
            && snapshot.withdrew_player_id.as_deref() != Some(self.ids.player_id.as_str())
        {
            return None;
        }
        let battle = snapshot.battle_number;
        if self.advanced_battle == Some(battle) {
            return None;
        }
        self.advanced_battle = Some(battle);
        match self
            .dispatcher
            .try_begin(Command::AdvanceBattle { automatic: true })
        {
            Ok(ticket) => {
                tracing::info!(battle, "automatic advance after withdrawal");
                Some(ticket)
            }
            Err(err) => {
                self.advanced_battle = None;
                tracing::debug!(error = %err, "automatic advance not admitted");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetworkError;
    use crate::models::{Card, Player, TheaterType};

    fn snapshot(phase: GamePhase, battle: u32) -> GameSnapshot {
        GameSnapshot {
            id: "g1".into(),
            room_id: "r1".into(),
            player1: Player {
                id: "a".into(),
                name: "Ann".into(),
                hand: vec![
                    Card::new(7, TheaterType::Air, 4, "Aerodrome"),
                    Card::new(8, TheaterType::Land, 2, "Reinforce"),
                ],
                score: 0,
            },
            player2: Player {
                id: "b".into(),
                name: "Bo".into(),
                hand: vec![],
                score: 0,
            },
            deck: vec![],
            trash: vec![],
            theater_order: vec![],
            theaters: Default::default(),
            current_player_id: "a".into(),
            phase,
            battle_number: battle,
            first_player_id: "a".into(),
            withdrew_player_id: None,
            theater_scores: None,
        }
    }

    fn withdrawn(battle: u32, by: &str) -> GameSnapshot {
        let mut s = snapshot(GamePhase::Scoring, battle);
        s.withdrew_player_id = Some(by.to_string());
        s
    }

    fn failure() -> ApiError {
        ApiError::Transport {
            operation: "test",
            source: NetworkError::Other {
                message: "down".into(),
            },
        }
    }

    fn coordinator(policy: AutoAdvancePolicy) -> StateSyncCoordinator {
        StateSyncCoordinator::new(SessionIds::new("g1", "a", "r1"), policy)
    }

    #[test]
    fn test_command_refused_without_snapshot() {
        let mut sync = coordinator(AutoAdvancePolicy::AnyClient);
        assert!(matches!(
            sync.begin_command(Command::DrawCard),
            Err(DispatchError::NoSnapshot { .. })
        ));
    }

    #[test]
    fn test_failure_keeps_snapshot_and_sets_message() {
        let mut sync = coordinator(AutoAdvancePolicy::AnyClient);
        sync.install(snapshot(GamePhase::Playing, 1));
        let before = sync.snapshot().cloned();

        let ticket = sync.begin_command(Command::EndTurn).unwrap();
        assert!(sync.begin_poll().is_none());
        assert!(sync.complete_command(ticket, Err(failure())).is_none());

        assert_eq!(sync.snapshot().cloned(), before);
        assert_eq!(sync.error(), Some("Failed to end turn"));
        assert!(!sync.is_busy());

        // The next command clears the message.
        let ticket = sync.begin_command(Command::DrawCard).unwrap();
        assert_eq!(sync.error(), None);
        sync.complete_command(ticket, Ok(snapshot(GamePhase::Playing, 1)));
    }

    #[test]
    fn test_failed_poll_leaves_snapshot_unchanged() {
        let mut sync = coordinator(AutoAdvancePolicy::AnyClient);
        sync.install(snapshot(GamePhase::Playing, 2));
        let before = serde_json::to_vec(sync.snapshot().unwrap()).unwrap();

        let poll = sync.begin_poll().unwrap();
        assert!(sync.complete_poll(poll, Err(failure())).is_none());

        let after = serde_json::to_vec(sync.snapshot().unwrap()).unwrap();
        assert_eq!(before, after);
        assert_eq!(sync.error(), None);
    }

    #[test]
    fn test_poll_started_before_command_is_discarded() {
        let mut sync = coordinator(AutoAdvancePolicy::AnyClient);
        sync.install(snapshot(GamePhase::Playing, 1));
        let poll = sync.begin_poll().unwrap();

        let ticket = sync.begin_command(Command::DrawCard).unwrap();
        let mut drawn = snapshot(GamePhase::Playing, 1);
        drawn.deck.push(Card::new(20, TheaterType::Sea, 3, "Maneuver"));
        sync.complete_command(ticket, Ok(drawn.clone()));

        sync.complete_poll(poll, Ok(snapshot(GamePhase::Playing, 1)));
        assert_eq!(sync.snapshot(), Some(&drawn));
    }

    #[test]
    fn test_slow_poll_cannot_overwrite_newer_poll() {
        let mut sync = coordinator(AutoAdvancePolicy::AnyClient);
        sync.install(snapshot(GamePhase::Playing, 1));
        let slow = sync.begin_poll().unwrap();
        let fast = sync.begin_poll().unwrap();

        let mut newer = snapshot(GamePhase::Playing, 1);
        newer.current_player_id = "b".into();
        sync.complete_poll(fast, Ok(newer.clone()));
        sync.complete_poll(slow, Ok(snapshot(GamePhase::Playing, 1)));
        assert_eq!(sync.snapshot(), Some(&newer));

        // Later polls still apply.
        let next = sync.begin_poll().unwrap();
        sync.complete_poll(next, Ok(snapshot(GamePhase::Playing, 2)));
        assert_eq!(sync.snapshot().map(|s| s.battle_number), Some(2));
    }

    #[test]
    fn test_auto_advance_once_per_battle_and_retry_after_failure() {
        let mut sync = coordinator(AutoAdvancePolicy::AnyClient);
        let ticket = sync.install(withdrawn(3, "b")).unwrap();
        assert_eq!(ticket.command(), &Command::AdvanceBattle { automatic: true });
        assert_eq!(sync.last_advanced_battle(), Some(3));

        // Failure is silent and does not retry on the same snapshot.
        assert!(sync.complete_command(ticket, Err(failure())).is_none());
        assert_eq!(sync.error(), None);
        assert_eq!(sync.last_advanced_battle(), None);

        // The next poll for battle 3 retries.
        let poll = sync.begin_poll().unwrap();
        let retry = sync.complete_poll(poll, Ok(withdrawn(3, "b"))).unwrap();

        // Success moves on; a repeated scoring snapshot for battle 3 would not reissue.
        assert!(sync
            .complete_command(retry, Ok(withdrawn(3, "b")))
            .is_none());
        let poll = sync.begin_poll().unwrap();
        assert!(sync.complete_poll(poll, Ok(withdrawn(3, "b"))).is_none());

        // Next battle resets the guard.
        let poll = sync.begin_poll().unwrap();
        sync.complete_poll(poll, Ok(snapshot(GamePhase::Playing, 4)));
        assert_eq!(sync.last_advanced_battle(), None);
    }

    #[test]
    fn test_manual_advance_failure_is_surfaced() {
        let mut sync = coordinator(AutoAdvancePolicy::AnyClient);
        sync.install(snapshot(GamePhase::Scoring, 2));
        let ticket = sync
            .begin_command(Command::AdvanceBattle { automatic: false })
            .unwrap();
        sync.complete_command(ticket, Err(failure()));
        assert_eq!(sync.error(), Some("Failed to start next battle"));
    }

    #[test]
    fn test_withdrawing_player_only_policy() {
        let mut sync = coordinator(AutoAdvancePolicy::WithdrawingPlayerOnly);
        assert!(sync.install(withdrawn(1, "b")).is_none());
        let poll = sync.begin_poll().unwrap();
        assert!(sync.complete_poll(poll, Ok(withdrawn(1, "a"))).is_some());
    }

    #[test]
    fn test_faces_pruned_on_replacement() {
        let mut sync = coordinator(AutoAdvancePolicy::AnyClient);
        sync.install(snapshot(GamePhase::Playing, 1));
        assert_eq!(sync.toggle_face(7), Some(false));
        assert_eq!(sync.toggle_face(99), None);

        let ticket = sync
            .begin_command(Command::PlayCard {
                card_id: 7,
                theater: TheaterType::Air,
                face_up: false,
            })
            .unwrap();
        let mut played = snapshot(GamePhase::Playing, 1);
        played.player1.hand.retain(|c| c.id != 7);
        sync.complete_command(ticket, Ok(played));
        assert!(sync.faces().is_empty());
        assert!(sync.face_up(7));
    }
}
