//! The single active drag.

use super::context::{DragContext, DropTarget, DropTargetSet, TurnView};
use crate::gesture::PointerKind;

/// Holds at most one [`DragContext`] at a time.
#[derive(Debug, Default)]
pub struct DragSession {
    open: Option<OpenDrag>,
}

#[derive(Debug)]
struct OpenDrag {
    context: DragContext,
    kind: PointerKind,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a drag. Returns false, leaving the session untouched, when a drag
    /// is already open or the acting player may not move this card now.
    pub fn begin_drag(&mut self, context: DragContext, kind: PointerKind, view: &TurnView) -> bool {
        if self.open.is_some() {
            tracing::debug!(card = context.card_id(), "drag rejected: another drag is open");
            return false;
        }
        if !view.can_act() {
            tracing::debug!(
                card = context.card_id(),
                my_turn = view.is_my_turn(),
                phase = %view.snapshot.phase,
                busy = view.busy,
                "drag rejected: player cannot act"
            );
            return false;
        }
        if !view.controls(&context) {
            tracing::debug!(card = context.card_id(), "drag rejected: card not controlled");
            return false;
        }
        tracing::debug!(card = context.card_id(), kind = ?kind, "drag opened");
        self.open = Some(OpenDrag { context, kind });
        true
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn context(&self) -> Option<&DragContext> {
        self.open.as_ref().map(|d| &d.context)
    }

    pub fn pointer_kind(&self) -> Option<PointerKind> {
        self.open.as_ref().map(|d| d.kind)
    }

    pub fn is_touch(&self) -> bool {
        self.pointer_kind() == Some(PointerKind::Touch)
    }

    /// Targets the open drag may be released on, against the current
    /// snapshot. Empty when nothing is open or the player can no longer act.
    pub fn legal_targets(&self, view: &TurnView) -> DropTargetSet {
        let Some(context) = self.context() else {
            return DropTargetSet::empty();
        };
        if !view.can_act() || !view.controls(context) {
            return DropTargetSet::empty();
        }
        match context {
            DragContext::Hand { .. } => view
                .theater_order()
                .into_iter()
                .map(DropTarget::Theater)
                .chain(std::iter::once(DropTarget::Trash))
                .collect(),
            // Theater to theater is never a legal move.
            DragContext::Theater { .. } => [DropTarget::Hand, DropTarget::Deck, DropTarget::Trash]
                .into_iter()
                .collect(),
        }
    }

    pub fn is_legal(&self, target: DropTarget, view: &TurnView) -> bool {
        self.legal_targets(view).contains(target)
    }

    /// Close the session. Idempotent.
    pub fn end_drag(&mut self) -> Option<DragContext> {
        let closed = self.open.take().map(|d| d.context);
        if let Some(context) = &closed {
            tracing::debug!(card = context.card_id(), "drag closed");
        }
        closed
    }
}
