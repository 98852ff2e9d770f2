//! The animated chessboard.
//!
//! [`ChessBoard`] draws a layout into its own [`Scene`] and turns piece moves
//! into animation directives. It never checks whether a move is legal: callers
//! pass explicit cells and the board only tracks which visual sits where.

use chess::{BoardLayout, Cell, Piece, PieceKind};
use smallvec::smallvec;

use crate::animation::{Animation, Animations};
use crate::assets::{piece_for_path, AssetCatalog};
use crate::error::{SceneError, SceneResult};
use crate::geometry::{cell_center, Point, Rgb};
use crate::scene::Scene;
use crate::visual::{
    ArrowShape, HighlightShape, Layer, PieceSprite, Shape, SquareShape, Visual, VisualId,
};

/// Side of a background or highlight square. Slightly under one unit so
/// neighbouring squares do not overlap.
pub const SQUARE_SIDE: f32 = 0.999;
/// Fill of squares whose `row + col` is even.
pub const EVEN_SQUARE: Rgb = Rgb::GREEN;
/// Fill of squares whose `row + col` is odd.
pub const ODD_SQUARE: Rgb = Rgb::WHITE;
pub const PIECE_SCALE: f32 = 0.27;
/// Promoted queens are drawn at this fraction of [`PIECE_SCALE`].
pub const PROMOTION_SCALE: f32 = 0.5;
/// Kings sit slightly higher than other pieces.
pub const KING_LIFT: f32 = 0.035;
pub const HIGHLIGHT_OPACITY: f32 = 0.7;
pub const ARROW_STROKE_WIDTH: f32 = 5.0;
pub const ARROW_MARKER_RADIUS: f32 = 0.25;

pub struct ChessBoard {
    layout: BoardLayout,
    squares: Vec<Vec<VisualId>>,
    pieces: Vec<Vec<Option<VisualId>>>,
    scene: Scene,
    assets: AssetCatalog,
}

impl ChessBoard {
    /// Parse `fen` and draw every square, then every piece.
    pub fn new(fen: &str, assets: AssetCatalog) -> SceneResult<Self> {
        Self::from_layout(BoardLayout::from_fen(fen)?, assets)
    }

    pub fn from_layout(layout: BoardLayout, assets: AssetCatalog) -> SceneResult<Self> {
        if layout.is_ragged() {
            tracing::warn!(
                fen = %layout.to_fen(),
                "Board layout has ranks of different lengths, padding with empty cells"
            );
        }
        let (rows, cols) = layout.dims();
        let mut board = Self {
            layout,
            squares: Vec::with_capacity(rows),
            pieces: vec![vec![None; cols]; rows],
            scene: Scene::new(),
            assets,
        };
        board.draw_empty_board();
        board.draw_pieces()?;
        tracing::debug!(rows, cols, visuals = board.scene.len(), "Board drawn");
        Ok(board)
    }

    fn draw_empty_board(&mut self) {
        let (rows, cols) = self.layout.dims();
        for row in 0..rows {
            let mut rank = Vec::with_capacity(cols);
            for col in 0..cols {
                let cell = Cell::new(row, col);
                let fill = if cell.is_even() { EVEN_SQUARE } else { ODD_SQUARE };
                let square = Visual::new(
                    Shape::Square(SquareShape {
                        cell,
                        side: SQUARE_SIDE,
                        fill,
                    }),
                    cell_center(cell),
                    Layer::Board,
                );
                rank.push(self.scene.insert(square));
            }
            self.squares.push(rank);
        }
    }

    fn draw_pieces(&mut self) -> SceneResult<()> {
        let placed: Vec<(Cell, Piece)> = self.layout.pieces().collect();
        for (cell, piece) in placed {
            let id = self.spawn_piece(piece, cell, PIECE_SCALE)?;
            self.pieces[cell.row][cell.col] = Some(id);
        }
        Ok(())
    }

    fn spawn_piece(&mut self, piece: Piece, cell: Cell, scale: f32) -> SceneResult<VisualId> {
        let (source, image) = self.assets.load(piece)?;
        let sprite = PieceSprite {
            source,
            image,
            scale,
        };
        let visual = Visual::new(
            Shape::Piece(sprite),
            piece_anchor(cell, piece.kind),
            Layer::Pieces,
        );
        Ok(self.scene.insert(visual))
    }

    pub fn dims(&self) -> (usize, usize) {
        self.layout.dims()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable access for the engine playing directives.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    fn check(&self, cell: Cell) -> SceneResult<()> {
        if self.layout.contains(cell) {
            Ok(())
        } else {
            let (rows, cols) = self.layout.dims();
            Err(SceneError::CellOutOfBounds { cell, rows, cols })
        }
    }

    pub fn square_at(&self, cell: Cell) -> SceneResult<VisualId> {
        self.check(cell)?;
        Ok(self.squares[cell.row][cell.col])
    }

    pub fn piece_at(&self, cell: Cell) -> SceneResult<Option<VisualId>> {
        self.check(cell)?;
        Ok(self.pieces[cell.row][cell.col])
    }

    /// Number of occupied cells.
    pub fn piece_count(&self) -> usize {
        self.pieces.iter().flatten().flatten().count()
    }

    /// Move whatever stands on `from` to `to`.
    ///
    /// Returns an empty list when `from` is empty. A piece standing on `to` is
    /// captured: its fade-out comes before the mover's slide. Pawns reaching
    /// the far rank are promoted afterwards.
    pub fn move_piece(&mut self, from: Cell, to: Cell) -> SceneResult<Animations> {
        self.check(from)?;
        self.check(to)?;

        let Some(mover) = self.pieces[from.row][from.col] else {
            tracing::debug!(%from, %to, "No piece to move");
            return Ok(Animations::new());
        };

        let mut animations = Animations::new();

        if from != to {
            if let Some(captured) = self.pieces[to.row][to.col] {
                tracing::debug!(%to, id = %captured, "Capturing piece");
                animations.push(Animation::FadeOut { id: captured });
            }
        }

        let kind = self.identify(from)?.map(|p| p.kind);
        let start = self
            .scene
            .get(mover)
            .map(|v| v.center)
            .unwrap_or_else(|| cell_center(from));
        let target = match kind {
            Some(kind) => piece_anchor(to, kind),
            None => cell_center(to),
        };
        animations.push(Animation::MoveToTarget {
            id: mover,
            from: start,
            to: target,
        });

        self.pieces[from.row][from.col] = None;
        self.pieces[to.row][to.col] = Some(mover);
        tracing::debug!(%from, %to, id = %mover, "Moved piece");

        animations.extend(self.handle_pawn_promotion(mover, to)?);
        Ok(animations)
    }

    /// Swap a pawn standing on its far rank for a half-size queen.
    ///
    /// `moved` is the visual that just arrived on `cell`. Returns the fade-out
    /// of the pawn and the fade-in of the queen, or nothing when no promotion
    /// applies.
    pub fn handle_pawn_promotion(
        &mut self,
        moved: VisualId,
        cell: Cell,
    ) -> SceneResult<Animations> {
        let Some(piece) = self.identify(cell)? else {
            return Ok(Animations::new());
        };
        if !piece.is_promotion_row(cell.row, self.layout.rows()) {
            return Ok(Animations::new());
        }

        let queen = Piece::new(PieceKind::Queen, piece.color);
        let id = self.spawn_piece(queen, cell, PIECE_SCALE * PROMOTION_SCALE)?;
        if let Some(visual) = self.scene.get_mut(id) {
            visual.opacity = 0.0;
        }
        self.pieces[cell.row][cell.col] = Some(id);
        tracing::debug!(%cell, color = %piece.color, "Promoted pawn to queen");

        Ok(smallvec![
            Animation::FadeOut { id: moved },
            Animation::FadeIn { id },
        ])
    }

    /// Draw an arrow from `cell` to the position `delta = (d_row, d_col)`
    /// away, with a marker at its tip. The end may lie off the board.
    pub fn add_arrow(&mut self, cell: Cell, delta: (isize, isize)) -> VisualId {
        let start = cell_center(cell);
        let end = Point::from_grid(
            (cell.row as isize + delta.0) as f32,
            (cell.col as isize + delta.1) as f32,
        );
        let arrow = ArrowShape {
            start,
            end,
            color: Rgb::BLUE,
            stroke_width: ARROW_STROKE_WIDTH,
            marker_radius: ARROW_MARKER_RADIUS,
            marker_color: Rgb::RED,
        };
        tracing::debug!(%cell, ?delta, "Adding arrow");
        self.scene.insert(Visual::new(
            Shape::Arrow(arrow),
            start.lerp(end, 0.5),
            Layer::Highlights,
        ))
    }

    /// Tint `cell` with a translucent square.
    pub fn add_highlight(&mut self, cell: Cell, color: Rgb) -> SceneResult<VisualId> {
        let square = self.square_at(cell)?;
        let center = self
            .scene
            .get(square)
            .map(|v| v.center)
            .unwrap_or_else(|| cell_center(cell));
        let highlight = HighlightShape {
            cell,
            side: SQUARE_SIDE,
            fill: color,
            fill_opacity: HIGHLIGHT_OPACITY,
        };
        tracing::debug!(%cell, %color, "Adding highlight");
        Ok(self
            .scene
            .insert(Visual::new(Shape::Highlight(highlight), center, Layer::Highlights)))
    }

    /// Set each piece image's alpha from a `rows x cols` matrix of values in
    /// `[0, 1]`. Empty cells are ignored.
    pub fn set_piece_opacities(&mut self, opacities: &[Vec<f32>]) -> SceneResult<()> {
        let (rows, cols) = self.layout.dims();
        let shape_error = |got_cols| SceneError::OpacityShape {
            rows: opacities.len(),
            cols: got_cols,
            expected_rows: rows,
            expected_cols: cols,
        };
        if opacities.len() != rows {
            return Err(shape_error(opacities.first().map_or(0, Vec::len)));
        }
        if let Some(bad) = opacities.iter().find(|r| r.len() != cols) {
            return Err(shape_error(bad.len()));
        }

        for (row, values) in opacities.iter().enumerate() {
            for (col, alpha) in values.iter().enumerate() {
                let Some(id) = self.pieces[row][col] else {
                    continue;
                };
                if let Some(sprite) = self.scene.get_mut(id).and_then(Visual::sprite_mut) {
                    sprite.image.set_opacity(*alpha);
                }
            }
        }
        Ok(())
    }

    /// Color and kind of the piece on `cell`, read back from the image
    /// resource its visual was loaded from.
    pub fn identify(&self, cell: Cell) -> SceneResult<Option<Piece>> {
        let Some(id) = self.piece_at(cell)? else {
            return Ok(None);
        };
        let Some(sprite) = self.scene.get(id).and_then(Visual::sprite) else {
            return Ok(None);
        };
        Ok(Some(piece_for_path(&sprite.source)?))
    }
}

impl std::fmt::Debug for ChessBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChessBoard")
            .field("dims", &self.layout.dims())
            .field("pieces", &self.piece_count())
            .field("visuals", &self.scene.len())
            .finish()
    }
}

/// Where a piece of `kind` rests on `cell`.
pub fn piece_anchor(cell: Cell, kind: PieceKind) -> Point {
    let center = cell_center(cell);
    if kind == PieceKind::King {
        center.shift(0.0, KING_LIFT)
    } else {
        center
    }
}
