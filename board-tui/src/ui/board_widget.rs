//! Draws a board scene into a terminal buffer.

use board_scene::board::PIECE_SCALE;
use board_scene::visual::{ArrowShape, HighlightShape, PieceSprite, SquareShape};
use board_scene::{Cell, PieceColor, PieceKind, Point, Rgb, Scene, Shape, Visual};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Widget},
};

use super::theme::{from_color, to_color, Theme};

/// Pieces fainter than this are not drawn at all.
const MIN_VISIBLE_ALPHA: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSize {
    pub width: u16,
    pub height: u16,
}

impl CellSize {
    pub const SMALL: Self = Self {
        width: 3,
        height: 1,
    };
    pub const MEDIUM: Self = Self {
        width: 5,
        height: 2,
    };
    pub const LARGE: Self = Self {
        width: 7,
        height: 3,
    };

    /// Largest size that fits `rows x cols` cells inside `area`.
    pub fn for_area(area: Rect, rows: usize, cols: usize) -> Self {
        let fits = |size: Self| {
            usize::from(size.width) * cols <= usize::from(area.width)
                && usize::from(size.height) * rows <= usize::from(area.height)
        };
        [Self::LARGE, Self::MEDIUM]
            .into_iter()
            .find(|s| fits(*s))
            .unwrap_or(Self::SMALL)
    }
}

/// Maps scene coordinates onto terminal cells.
#[derive(Debug, Clone, Copy)]
struct Projection {
    origin_x: u16,
    origin_y: u16,
    size: CellSize,
}

impl Projection {
    /// Terminal position of a scene point. May lie outside the buffer;
    /// callers clip.
    fn project(&self, p: Point) -> (i32, i32) {
        let w = f32::from(self.size.width);
        let h = f32::from(self.size.height);
        let x = f32::from(self.origin_x) + p.x * w + w / 2.0;
        let y = f32::from(self.origin_y) - p.y * h + h / 2.0;
        (x.floor() as i32, y.floor() as i32)
    }

    /// Saturates at the edge of the `u16` plane for boards wider or taller
    /// than the terminal can address.
    fn cell_rect(&self, cell: Cell) -> Rect {
        let offset = |origin: u16, index: usize, step: u16| {
            origin.saturating_add(to_u16(index).saturating_mul(step))
        };
        Rect::new(
            offset(self.origin_x, cell.col, self.size.width),
            offset(self.origin_y, cell.row, self.size.height),
            self.size.width,
            self.size.height,
        )
    }
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

fn contains(bounds: Rect, x: i32, y: i32) -> bool {
    x >= i32::from(bounds.left())
        && x < i32::from(bounds.right())
        && y >= i32::from(bounds.top())
        && y < i32::from(bounds.bottom())
}

pub struct BoardWidget<'a> {
    pub scene: &'a Scene,
    pub dims: (usize, usize),
    pub theme: &'a Theme,
    pub title: &'a str,
}

impl<'a> BoardWidget<'a> {
    pub fn new(scene: &'a Scene, dims: (usize, usize), theme: &'a Theme) -> Self {
        Self {
            scene,
            dims,
            theme,
            title: "♟ Chess Board ♟",
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }
}

impl Widget for BoardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.board_border));
        let inner = block.inner(area);
        block.render(area, buf);

        let (rows, cols) = self.dims;
        if rows == 0 || cols == 0 {
            return;
        }

        // Leave room for row labels on the left and column labels below.
        let label_width = 3;
        let labelled = Rect::new(
            inner.x + label_width,
            inner.y,
            inner.width.saturating_sub(label_width),
            inner.height.saturating_sub(1),
        );
        let size = CellSize::for_area(labelled, rows, cols);
        let board_width = size.width.saturating_mul(to_u16(cols));
        let board_height = size.height.saturating_mul(to_u16(rows));
        let projection = Projection {
            origin_x: labelled.x + labelled.width.saturating_sub(board_width) / 2,
            origin_y: labelled.y + labelled.height.saturating_sub(board_height) / 2,
            size,
        };

        draw_labels(buf, &projection, rows, cols, self.theme, inner);

        for (_, visual) in self.scene.draw_order() {
            match &visual.shape {
                Shape::Square(square) => draw_square(buf, &projection, square, inner),
                Shape::Highlight(highlight) => {
                    draw_highlight(buf, &projection, highlight, visual.opacity, inner)
                }
                Shape::Arrow(arrow) => {
                    draw_arrow(buf, &projection, arrow, visual.opacity, inner)
                }
                Shape::Piece(sprite) => {
                    draw_piece(buf, &projection, visual, sprite, self.theme, inner)
                }
            }
        }
    }
}

fn draw_labels(
    buf: &mut Buffer,
    projection: &Projection,
    rows: usize,
    cols: usize,
    theme: &Theme,
    bounds: Rect,
) {
    let style = Style::default().fg(theme.board_label);
    for row in 0..rows {
        let rect = projection.cell_rect(Cell::new(row, 0));
        let y = rect.y.saturating_add(rect.height / 2);
        if y >= bounds.bottom() {
            break;
        }
        let x = rect.x.saturating_sub(3);
        if x >= bounds.x {
            buf.set_stringn(x, y, format!("{row:>2}"), 2, style);
        }
    }
    for col in 0..cols {
        let rect = projection.cell_rect(Cell::new(rows - 1, col));
        let x = rect.x.saturating_add(rect.width / 2);
        if x >= bounds.right() {
            break;
        }
        let y = rect.bottom();
        if y < bounds.bottom() {
            let label = col.to_string();
            let room = usize::from(bounds.right() - x);
            buf.set_stringn(x, y, &label, room, style);
        }
    }
}

fn fill_rect(
    buf: &mut Buffer,
    rect: Rect,
    bounds: Rect,
    mut paint: impl FnMut(Option<Rgb>) -> Rgb,
) {
    let clipped = rect.intersection(bounds);
    for y in clipped.top()..clipped.bottom() {
        for x in clipped.left()..clipped.right() {
            let cell = &mut buf[(x, y)];
            let color = paint(from_color(cell.bg));
            cell.set_bg(to_color(color));
        }
    }
}

fn draw_square(buf: &mut Buffer, projection: &Projection, square: &SquareShape, bounds: Rect) {
    fill_rect(buf, projection.cell_rect(square.cell), bounds, |_| square.fill);
}

fn draw_highlight(
    buf: &mut Buffer,
    projection: &Projection,
    highlight: &HighlightShape,
    opacity: f32,
    bounds: Rect,
) {
    let alpha = highlight.fill_opacity * opacity;
    fill_rect(buf, projection.cell_rect(highlight.cell), bounds, |under| {
        under.map_or(highlight.fill, |bg| highlight.fill.over(bg, alpha))
    });
}

fn draw_arrow(
    buf: &mut Buffer,
    projection: &Projection,
    arrow: &ArrowShape,
    opacity: f32,
    bounds: Rect,
) {
    if opacity < MIN_VISIBLE_ALPHA {
        return;
    }
    let (x0, y0) = projection.project(arrow.start);
    let (x1, y1) = projection.project(arrow.end);
    let (dx, dy) = (i64::from(x1) - i64::from(x0), i64::from(y1) - i64::from(y0));
    let steps = dx.abs().max(dy.abs());
    let shaft = Style::default().fg(to_color(arrow.color));
    for i in 0..steps {
        let x = i64::from(x0) + dx * i / steps;
        let y = i64::from(y0) + dy * i / steps;
        // Each point fits in i32: it lies between two i32 endpoints.
        put(buf, bounds, x as i32, y as i32, "•", shaft);
    }
    let marker = Style::default()
        .fg(to_color(arrow.marker_color))
        .add_modifier(Modifier::BOLD);
    put(buf, bounds, x1, y1, "◉", marker);
}

fn put(buf: &mut Buffer, bounds: Rect, x: i32, y: i32, symbol: &str, style: Style) {
    if !contains(bounds, x, y) {
        return;
    }
    let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
        return;
    };
    let cell = &mut buf[(x, y)];
    cell.set_symbol(symbol);
    if let Some(fg) = style.fg {
        cell.set_fg(fg);
    }
    cell.modifier.insert(style.add_modifier);
}

/// One glyph per piece, in the terminal cell under the visual's centre.
/// Sub-cell offsets such as the king lift are not visible at this
/// resolution, and the half-size promoted queen only loses its bold weight.
fn draw_piece(
    buf: &mut Buffer,
    projection: &Projection,
    visual: &Visual,
    sprite: &PieceSprite,
    theme: &Theme,
    bounds: Rect,
) {
    let Some(piece) = sprite.piece() else {
        return;
    };
    let alpha = visual.opacity * sprite.image.coverage();
    if alpha < MIN_VISIBLE_ALPHA {
        return;
    }
    let (x, y) = projection.project(visual.center);
    if !contains(bounds, x, y) {
        return;
    }
    let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
        return;
    };

    let base = match piece.color {
        PieceColor::White => theme.white_piece,
        PieceColor::Black => theme.black_piece,
    };
    let cell = &mut buf[(x, y)];
    let under = from_color(cell.bg).unwrap_or(theme.background);
    cell.set_symbol(piece_glyph(piece.kind));
    cell.set_fg(to_color(base.over(under, alpha)));
    if sprite.scale >= PIECE_SCALE {
        cell.modifier.insert(Modifier::BOLD);
    }
}

pub fn piece_glyph(kind: PieceKind) -> &'static str {
    match kind {
        PieceKind::King => "♚",
        PieceKind::Queen => "♛",
        PieceKind::Rook => "♜",
        PieceKind::Bishop => "♝",
        PieceKind::Knight => "♞",
        PieceKind::Pawn => "♟",
    }
}
