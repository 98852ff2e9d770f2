//! Flat scene graph owning every visual a board creates.

use std::collections::BTreeMap;

use crate::visual::{Visual, VisualId};

/// Visuals keyed by id. Ids are handed out in increasing order, so iterating
/// the map also walks insertion order.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    visuals: BTreeMap<VisualId, Visual>,
    next_id: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, visual: Visual) -> VisualId {
        let id = VisualId(self.next_id);
        self.next_id += 1;
        self.visuals.insert(id, visual);
        id
    }

    pub fn get(&self, id: VisualId) -> Option<&Visual> {
        self.visuals.get(&id)
    }

    pub fn get_mut(&mut self, id: VisualId) -> Option<&mut Visual> {
        self.visuals.get_mut(&id)
    }

    pub fn remove(&mut self, id: VisualId) -> Option<Visual> {
        self.visuals.remove(&id)
    }

    pub fn contains(&self, id: VisualId) -> bool {
        self.visuals.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.visuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visuals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VisualId, &Visual)> {
        self.visuals.iter().map(|(id, v)| (*id, v))
    }

    /// Visuals in paint order: by layer, then by insertion.
    pub fn draw_order(&self) -> Vec<(VisualId, &Visual)> {
        let mut ordered: Vec<_> = self.iter().collect();
        ordered.sort_by_key(|(id, v)| (v.layer, *id));
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Rgb};
    use crate::visual::{HighlightShape, Layer, Shape, SquareShape};
    use chess::Cell;

    fn square() -> Visual {
        Visual::new(
            Shape::Square(SquareShape {
                cell: Cell::new(0, 0),
                side: 0.999,
                fill: Rgb::WHITE,
            }),
            Point::ORIGIN,
            Layer::Board,
        )
    }

    fn highlight() -> Visual {
        Visual::new(
            Shape::Highlight(HighlightShape {
                cell: Cell::new(0, 0),
                side: 0.999,
                fill: Rgb::RED,
                fill_opacity: 0.7,
            }),
            Point::ORIGIN,
            Layer::Highlights,
        )
    }

    #[test]
    fn test_draw_order_sorts_by_layer_then_insertion() {
        let mut scene = Scene::new();
        let h1 = scene.insert(highlight());
        let s1 = scene.insert(square());
        let h2 = scene.insert(highlight());
        let s2 = scene.insert(square());

        let order: Vec<_> = scene.draw_order().into_iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec![s1, s2, h1, h2]);
    }

    #[test]
    fn test_remove_does_not_reuse_ids() {
        let mut scene = Scene::new();
        let a = scene.insert(square());
        assert!(scene.remove(a).is_some());
        let b = scene.insert(square());
        assert_ne!(a, b);
        assert!(!scene.contains(a));
        assert_eq!(scene.len(), 1);
    }
}
