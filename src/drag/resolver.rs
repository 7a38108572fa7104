//! Maps a point or hovered element to a legal drop target.

use super::context::{DropTarget, DropTargetSet};
use super::zones::{ElementId, ZoneTree};
use crate::models::TheaterType;

/// Tracks the active (highlighted) target of the open drag.
///
/// Only legal targets ever become active, so illegal zones never get any
/// visual affordance.
#[derive(Debug, Default)]
pub struct DropTargetResolver {
    active: Option<DropTarget>,
}

impl DropTargetResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<DropTarget> {
        self.active
    }

    /// Best legal target on the topmost element under the point.
    pub fn resolve_point<K: Clone + PartialEq>(
        zones: &ZoneTree<K>,
        x: u16,
        y: u16,
        legal: &DropTargetSet,
        order: &[TheaterType],
    ) -> Option<DropTarget> {
        pick(zones.targets_at(x, y), legal, order)
    }

    /// Best legal target tagged on `element` or its ancestors.
    pub fn resolve_element<K: Clone + PartialEq>(
        zones: &ZoneTree<K>,
        element: ElementId,
        legal: &DropTargetSet,
        order: &[TheaterType],
    ) -> Option<DropTarget> {
        pick(zones.targets_in_ancestry(element), legal, order)
    }

    /// Record the newly resolved target. Returns true only on change.
    pub fn set_active(&mut self, target: Option<DropTarget>) -> bool {
        if self.active == target {
            return false;
        }
        tracing::debug!(from = ?self.active, to = ?target, "active drop target");
        self.active = target;
        true
    }

    pub fn clear(&mut self) -> bool {
        self.set_active(None)
    }

    /// Hover over `element` during a native pointer drag.
    pub fn drag_over<K: Clone + PartialEq>(
        &mut self,
        zones: &ZoneTree<K>,
        element: ElementId,
        legal: &DropTargetSet,
        order: &[TheaterType],
    ) -> bool {
        let target = Self::resolve_element(zones, element, legal, order);
        self.set_active(target)
    }

    /// The pointer left `target`'s zone. Moving onto a child of the same zone
    /// (`still_inside`) keeps it active.
    pub fn drag_leave(&mut self, target: DropTarget, still_inside: bool) -> bool {
        if still_inside || self.active != Some(target) {
            return false;
        }
        self.set_active(None)
    }

    /// Release over `element`. Clears the active target and returns the
    /// legal destination, if any.
    pub fn drop<K: Clone + PartialEq>(
        &mut self,
        zones: &ZoneTree<K>,
        element: Option<ElementId>,
        legal: &DropTargetSet,
        order: &[TheaterType],
    ) -> Option<DropTarget> {
        let target = element.and_then(|e| Self::resolve_element(zones, e, legal, order));
        self.clear();
        target
    }
}

fn pick(
    candidates: Vec<DropTarget>,
    legal: &DropTargetSet,
    order: &[TheaterType],
) -> Option<DropTarget> {
    candidates
        .into_iter()
        .filter(|t| legal.contains(*t))
        .min_by_key(|t| t.precedence(order))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;

    fn board() -> ZoneTree<u32> {
        let mut tree = ZoneTree::new();
        tree.add_zone(Rect::new(0, 0, 30, 10), DropTarget::Theater(TheaterType::Air));
        tree.add_zone(Rect::new(30, 0, 30, 10), DropTarget::Theater(TheaterType::Land));
        // Trash panel drawn over the lower part of the land theater.
        tree.add_zone(Rect::new(30, 8, 30, 4), DropTarget::Trash);
        tree.add_zone(Rect::new(0, 12, 60, 5), DropTarget::Hand);
        tree
    }

    fn hand_legal() -> DropTargetSet {
        [
            DropTarget::Theater(TheaterType::Air),
            DropTarget::Theater(TheaterType::Land),
            DropTarget::Theater(TheaterType::Sea),
            DropTarget::Trash,
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_topmost_zone_decides_where_zones_overlap() {
        let tree = board();
        let order = TheaterType::DEFAULT_ORDER;
        assert_eq!(
            DropTargetResolver::resolve_point(&tree, 35, 7, &hand_legal(), &order),
            Some(DropTarget::Theater(TheaterType::Land))
        );
        assert_eq!(
            DropTargetResolver::resolve_point(&tree, 35, 9, &hand_legal(), &order),
            Some(DropTarget::Trash)
        );
        // Nothing from the land lane leaks through the trash panel.
        assert_eq!(
            DropTargetResolver::resolve_point(
                &tree,
                35,
                9,
                &[DropTarget::Theater(TheaterType::Land)].into_iter().collect(),
                &order
            ),
            None
        );
    }

    #[test]
    fn test_illegal_zone_resolves_to_nothing() {
        let tree = board();
        let order = TheaterType::DEFAULT_ORDER;
        assert_eq!(
            DropTargetResolver::resolve_point(&tree, 5, 14, &hand_legal(), &order),
            None
        );
    }

    #[test]
    fn test_repeated_resolution_reports_no_change() {
        let mut resolver = DropTargetResolver::new();
        let air = Some(DropTarget::Theater(TheaterType::Air));
        assert!(resolver.set_active(air));
        assert!(!resolver.set_active(air));
        assert!(resolver.set_active(None));
        assert!(!resolver.clear());
    }

    #[test]
    fn test_hover_path() {
        let mut tree = board();
        let air_zone = 0;
        let card = tree.add_child(air_zone, Rect::new(2, 2, 5, 3), 11);
        let order = TheaterType::DEFAULT_ORDER;
        let legal = hand_legal();
        let mut resolver = DropTargetResolver::new();

        assert!(resolver.drag_over(&tree, card, &legal, &order));
        assert!(!resolver.drag_over(&tree, air_zone, &legal, &order));
        // Leaving the card for its parent zone keeps the highlight.
        assert!(!resolver.drag_leave(DropTarget::Theater(TheaterType::Air), true));
        assert_eq!(resolver.active(), Some(DropTarget::Theater(TheaterType::Air)));
        assert!(resolver.drag_leave(DropTarget::Theater(TheaterType::Air), false));

        let dropped = resolver.drop(&tree, Some(card), &legal, &order);
        assert_eq!(dropped, Some(DropTarget::Theater(TheaterType::Air)));
        assert_eq!(resolver.active(), None);
    }
}
