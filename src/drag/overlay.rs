//! Coordinate-driven drag for hosts without native drag events.
//!
//! While a touch-originated drag is open the overlay draws a proxy at the last
//! pointer position and resolves the target under it on every move.

use ratatui::layout::Position;

use super::context::{DropDecision, TurnView};
use super::resolver::DropTargetResolver;
use super::session::DragSession;
use super::zones::ZoneTree;

#[derive(Debug, Default)]
pub struct TouchDragOverlay {
    proxy: Option<Position>,
}

impl TouchDragOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start following the pointer. Only touch-originated drags use the overlay.
    pub fn begin(&mut self, session: &DragSession, at: Position) -> bool {
        if !session.is_touch() {
            return false;
        }
        self.proxy = Some(at);
        true
    }

    pub fn is_active(&self) -> bool {
        self.proxy.is_some()
    }

    /// Where the floating proxy is drawn.
    pub fn proxy(&self) -> Option<Position> {
        self.proxy
    }

    /// Track a move. Returns true when the active target changed.
    pub fn on_move<K: Clone + PartialEq>(
        &mut self,
        session: &DragSession,
        resolver: &mut DropTargetResolver,
        zones: &ZoneTree<K>,
        view: &TurnView,
        at: Position,
    ) -> bool {
        if self.proxy.is_none() || !session.is_open() {
            return false;
        }
        self.proxy = Some(at);
        let legal = session.legal_targets(view);
        let target =
            DropTargetResolver::resolve_point(zones, at.x, at.y, &legal, &view.theater_order());
        resolver.set_active(target)
    }

    /// Finish the drag at the release coordinate.
    ///
    /// Resolves once more at `at`, since the last move may be stale. Returns
    /// the decision to dispatch when the target is legal; otherwise the drag
    /// just ends. Either way the session is closed, so a second release is a
    /// no-op.
    pub fn on_release<K: Clone + PartialEq>(
        &mut self,
        session: &mut DragSession,
        resolver: &mut DropTargetResolver,
        zones: &ZoneTree<K>,
        view: &TurnView,
        at: Position,
    ) -> Option<DropDecision> {
        if self.proxy.take().is_none() {
            return None;
        }
        let legal = session.legal_targets(view);
        let target =
            DropTargetResolver::resolve_point(zones, at.x, at.y, &legal, &view.theater_order());
        resolver.clear();
        let context = session.end_drag()?;
        match target {
            Some(target) => {
                tracing::debug!(card = context.card_id(), target = %target, "drop");
                Some(DropDecision { context, target })
            }
            None => {
                tracing::debug!(card = context.card_id(), "drop off target, nothing dispatched");
                None
            }
        }
    }

    pub fn on_cancel(&mut self, session: &mut DragSession, resolver: &mut DropTargetResolver) {
        self.proxy = None;
        resolver.clear();
        session.end_drag();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drag::{DragContext, DropTarget};
    use crate::gesture::PointerKind;
    use crate::models::{Card, GamePhase, GameSnapshot, Player, TheaterType};
    use ratatui::layout::Rect;

    fn snapshot() -> GameSnapshot {
        GameSnapshot {
            id: "g1".into(),
            room_id: "r1".into(),
            player1: Player {
                id: "a".into(),
                name: "Ann".into(),
                hand: vec![Card::new(7, TheaterType::Air, 4, "Aerodrome")],
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
            phase: GamePhase::Playing,
            battle_number: 1,
            first_player_id: "a".into(),
            withdrew_player_id: None,
            theater_scores: None,
        }
    }

    fn zones() -> ZoneTree<u32> {
        let mut tree = ZoneTree::new();
        tree.add_zone(Rect::new(0, 0, 20, 10), DropTarget::Theater(TheaterType::Air));
        tree.add_zone(Rect::new(0, 10, 20, 5), DropTarget::Hand);
        tree
    }

    fn open(session: &mut DragSession, view: &TurnView, kind: PointerKind) {
        let context = DragContext::Hand {
            card: Card::new(7, TheaterType::Air, 4, "Aerodrome"),
            face_up: true,
        };
        assert!(session.begin_drag(context, kind, view));
    }

    #[test]
    fn test_release_uses_release_coordinate() {
        let snap = snapshot();
        let view = TurnView::new(&snap, "a");
        let tree = zones();
        let mut session = DragSession::new();
        let mut resolver = DropTargetResolver::new();
        let mut overlay = TouchDragOverlay::new();
        open(&mut session, &view, PointerKind::Touch);
        assert!(overlay.begin(&session, Position::new(5, 12)));

        // Last move is over the (illegal) hand zone.
        assert!(!overlay.on_move(&session, &mut resolver, &tree, &view, Position::new(5, 12)));
        assert_eq!(resolver.active(), None);

        let decision = overlay
            .on_release(&mut session, &mut resolver, &tree, &view, Position::new(5, 4))
            .unwrap();
        assert_eq!(decision.target, DropTarget::Theater(TheaterType::Air));
        assert!(!session.is_open());
        assert!(overlay
            .on_release(&mut session, &mut resolver, &tree, &view, Position::new(5, 4))
            .is_none());
    }

    #[test]
    fn test_off_target_release_dispatches_nothing() {
        let snap = snapshot();
        let view = TurnView::new(&snap, "a");
        let tree = zones();
        let mut session = DragSession::new();
        let mut resolver = DropTargetResolver::new();
        let mut overlay = TouchDragOverlay::new();
        open(&mut session, &view, PointerKind::Touch);
        overlay.begin(&session, Position::new(1, 1));
        assert!(overlay.on_move(&session, &mut resolver, &tree, &view, Position::new(2, 2)));
        assert!(!overlay.on_move(&session, &mut resolver, &tree, &view, Position::new(3, 2)));

        let decision =
            overlay.on_release(&mut session, &mut resolver, &tree, &view, Position::new(50, 50));
        assert!(decision.is_none());
        assert!(!session.is_open());
        assert_eq!(resolver.active(), None);
    }

    #[test]
    fn test_mouse_drag_does_not_use_overlay() {
        let snap = snapshot();
        let view = TurnView::new(&snap, "a");
        let mut session = DragSession::new();
        open(&mut session, &view, PointerKind::Mouse);
        let mut overlay = TouchDragOverlay::new();
        assert!(!overlay.begin(&session, Position::new(0, 0)));
        assert!(!overlay.is_active());
    }
}
