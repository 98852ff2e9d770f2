use std::path::PathBuf;

use chess::{Cell, Piece};

use crate::assets::{piece_for_path, PieceImage};
use crate::geometry::{Point, Rgb};

/// Draw order. Lower layers are painted first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Layer {
    #[default]
    Board = 0,
    Highlights = 1,
    Pieces = 2,
}

/// Handle to a visual owned by a [`crate::Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VisualId(pub(crate) u64);

impl std::fmt::Display for VisualId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Background square of one board cell.
#[derive(Debug, Clone, PartialEq)]
pub struct SquareShape {
    pub cell: Cell,
    pub side: f32,
    pub fill: Rgb,
}

/// Translucent square drawn over a cell.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightShape {
    pub cell: Cell,
    pub side: f32,
    pub fill: Rgb,
    pub fill_opacity: f32,
}

/// Straight arrow with a circular marker at its tip.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowShape {
    pub start: Point,
    pub end: Point,
    pub color: Rgb,
    pub stroke_width: f32,
    pub marker_radius: f32,
    pub marker_color: Rgb,
}

/// A piece icon. Its identity is the resource it was loaded from.
#[derive(Debug, Clone, PartialEq)]
pub struct PieceSprite {
    pub source: PathBuf,
    pub image: PieceImage,
    pub scale: f32,
}

impl PieceSprite {
    /// Color and kind encoded in the resource file name.
    pub fn piece(&self) -> Option<Piece> {
        piece_for_path(&self.source).ok()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Square(SquareShape),
    Highlight(HighlightShape),
    Arrow(ArrowShape),
    Piece(PieceSprite),
}

/// Anything the scene can draw: a shape, where it sits, and how opaque it is.
#[derive(Debug, Clone, PartialEq)]
pub struct Visual {
    pub shape: Shape,
    pub center: Point,
    pub opacity: f32,
    pub layer: Layer,
}

impl Visual {
    pub fn new(shape: Shape, center: Point, layer: Layer) -> Self {
        Self {
            shape,
            center,
            opacity: 1.0,
            layer,
        }
    }

    /// Translate the visual so its centre lands on `target`.
    pub fn move_to(&mut self, target: Point) {
        let dx = target.x - self.center.x;
        let dy = target.y - self.center.y;
        if let Shape::Arrow(arrow) = &mut self.shape {
            arrow.start = arrow.start.shift(dx, dy);
            arrow.end = arrow.end.shift(dx, dy);
        }
        self.center = target;
    }

    pub fn sprite(&self) -> Option<&PieceSprite> {
        match &self.shape {
            Shape::Piece(sprite) => Some(sprite),
            _ => None,
        }
    }

    pub fn sprite_mut(&mut self) -> Option<&mut PieceSprite> {
        match &mut self.shape {
            Shape::Piece(sprite) => Some(sprite),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_to_translates_arrow_endpoints() {
        let arrow = ArrowShape {
            start: Point::new(0.0, 0.0),
            end: Point::new(2.0, 0.0),
            color: Rgb::BLUE,
            stroke_width: 5.0,
            marker_radius: 0.25,
            marker_color: Rgb::RED,
        };
        let mut visual = Visual::new(Shape::Arrow(arrow), Point::new(1.0, 0.0), Layer::Highlights);
        visual.move_to(Point::new(1.0, -3.0));

        let Shape::Arrow(moved) = &visual.shape else {
            panic!("expected an arrow");
        };
        assert_eq!(moved.start, Point::new(0.0, -3.0));
        assert_eq!(moved.end, Point::new(2.0, -3.0));
    }

    #[test]
    fn test_layer_order() {
        assert!(Layer::Board < Layer::Highlights);
        assert!(Layer::Highlights < Layer::Pieces);
    }
}
