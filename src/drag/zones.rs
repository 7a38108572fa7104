//! Element tree for coordinate hit-testing.
//!
//! The renderer rebuilds the tree every frame: each rendered element gets a
//! rectangle, an optional parent, an optional drop-target tag and an optional
//! gesture key. Later elements sit above earlier ones.

use ratatui::layout::{Position, Rect};

use super::context::DropTarget;

pub type ElementId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element<K> {
    pub rect: Rect,
    pub parent: Option<ElementId>,
    pub drop_target: Option<DropTarget>,
    pub key: Option<K>,
}

#[derive(Debug, Clone)]
pub struct ZoneTree<K> {
    elements: Vec<Element<K>>,
}

impl<K> Default for ZoneTree<K> {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
        }
    }
}

impl<K: Clone + PartialEq> ZoneTree<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call at the start of each render.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// A drop zone with no parent.
    pub fn add_zone(&mut self, rect: Rect, target: DropTarget) -> ElementId {
        self.push(Element {
            rect,
            parent: None,
            drop_target: Some(target),
            key: None,
        })
    }

    /// An interactive element nested in `parent`.
    pub fn add_child(&mut self, parent: ElementId, rect: Rect, key: K) -> ElementId {
        self.push(Element {
            rect,
            parent: Some(parent),
            drop_target: None,
            key: Some(key),
        })
    }

    pub fn push(&mut self, element: Element<K>) -> ElementId {
        self.elements.push(element);
        self.elements.len() - 1
    }

    pub fn get(&self, id: ElementId) -> Option<&Element<K>> {
        self.elements.get(id)
    }

    /// Topmost element under the point.
    pub fn element_at(&self, x: u16, y: u16) -> Option<ElementId> {
        let point = Position::new(x, y);
        self.elements.iter().rposition(|e| e.rect.contains(point))
    }

    /// `id` followed by each of its ancestors.
    pub fn ancestry(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        let mut next = self.elements.get(id).map(|_| id);
        std::iter::from_fn(move || {
            let current = next?;
            // Parents always precede children, which rules out cycles.
            next = self.elements[current].parent.filter(|p| *p < current);
            Some(current)
        })
    }

    /// Drop targets tagged on `id` or any ancestor.
    pub fn targets_in_ancestry(&self, id: ElementId) -> Vec<DropTarget> {
        self.ancestry(id)
            .filter_map(|i| self.elements[i].drop_target)
            .collect()
    }

    /// Drop targets on the topmost element under the point and its ancestors.
    ///
    /// Zones hidden beneath that element are not reported.
    pub fn targets_at(&self, x: u16, y: u16) -> Vec<DropTarget> {
        self.element_at(x, y)
            .map(|id| self.targets_in_ancestry(id))
            .unwrap_or_default()
    }

    /// Gesture key of the topmost keyed element under the point, walking up
    /// from the element hit.
    pub fn key_at(&self, x: u16, y: u16) -> Option<K> {
        let hit = self.element_at(x, y)?;
        self.ancestry(hit)
            .find_map(|i| self.elements[i].key.clone())
    }

    pub fn rect_of(&self, key: &K) -> Option<Rect> {
        self.elements
            .iter()
            .rev()
            .find(|e| e.key.as_ref() == Some(key))
            .map(|e| e.rect)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.elements.iter().any(|e| e.key.as_ref() == Some(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TheaterType;

    #[test]
    fn test_child_hit_walks_to_zone() {
        let mut tree: ZoneTree<u32> = ZoneTree::new();
        let air = tree.add_zone(Rect::new(0, 0, 20, 10), DropTarget::Theater(TheaterType::Air));
        let card = tree.add_child(air, Rect::new(2, 2, 6, 3), 42);

        assert_eq!(tree.element_at(3, 3), Some(card));
        assert_eq!(
            tree.targets_in_ancestry(card),
            vec![DropTarget::Theater(TheaterType::Air)]
        );
        assert_eq!(tree.key_at(3, 3), Some(42));
        assert_eq!(tree.key_at(15, 8), None);
        assert_eq!(tree.element_at(30, 3), None);
    }

    #[test]
    fn test_overlapping_zone_drawn_later_hides_the_one_below() {
        let mut tree: ZoneTree<u32> = ZoneTree::new();
        tree.add_zone(Rect::new(0, 0, 20, 10), DropTarget::Theater(TheaterType::Land));
        tree.add_zone(Rect::new(10, 5, 20, 10), DropTarget::Trash);
        assert_eq!(tree.targets_at(12, 6), vec![DropTarget::Trash]);
        assert_eq!(
            tree.targets_at(5, 6),
            vec![DropTarget::Theater(TheaterType::Land)]
        );
        assert!(tree.targets_at(35, 6).is_empty());
    }
}
