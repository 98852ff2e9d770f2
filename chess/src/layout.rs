//! Board layout parsed from the placement field of a FEN-like string.

use std::str::FromStr;

use crate::types::Piece;

/// A `(row, col)` grid position. Row 0 is the top rank, column 0 the left file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Squares alternate color by `(row + col)` parity.
    pub fn is_even(self) -> bool {
        (self.row + self.col) % 2 == 0
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Rectangular grid of optional pieces.
///
/// Ranks shorter than the widest one are padded with blank cells, so every
/// row has exactly [`BoardLayout::cols`] entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardLayout {
    cells: Vec<Vec<Option<Piece>>>,
    cols: usize,
    ragged: bool,
}

impl BoardLayout {
    /// Parse the board placement from a FEN-like string. Anything after the
    /// first whitespace is ignored.
    pub fn from_fen(fen: &str) -> Result<Self, LayoutError> {
        let placement = fen.split_whitespace().next().ok_or(LayoutError::Empty)?;

        let mut cells = Vec::new();
        for (rank_idx, rank_str) in placement.split('/').enumerate() {
            let mut row = Vec::new();
            for c in rank_str.chars() {
                match c {
                    '1'..='9' => {
                        let run = c as usize - '0' as usize;
                        row.extend(std::iter::repeat(None).take(run));
                    }
                    _ => {
                        let piece = Piece::from_char(c).ok_or(LayoutError::InvalidCharacter {
                            rank: rank_idx,
                            character: c,
                        })?;
                        row.push(Some(piece));
                    }
                }
            }
            cells.push(row);
        }

        Ok(Self::from_rows(cells))
    }

    /// Build a layout from a cozy-chess position, top rank first.
    pub fn from_board(board: &cozy_chess::Board) -> Self {
        let cells: Vec<Vec<Option<Piece>>> = (0..8)
            .map(|row| {
                (0..8)
                    .map(|col| {
                        let square = cozy_chess::Square::new(
                            cozy_chess::File::index(col),
                            cozy_chess::Rank::index(7 - row),
                        );
                        match (board.piece_on(square), board.color_on(square)) {
                            (Some(kind), Some(color)) => {
                                Some(Piece::new(kind.into(), color.into()))
                            }
                            _ => None,
                        }
                    })
                    .collect()
            })
            .collect();
        Self::from_rows(cells)
    }

    fn from_rows(mut cells: Vec<Vec<Option<Piece>>>) -> Self {
        let cols = cells.iter().map(Vec::len).max().unwrap_or(0);
        let mut ragged = false;
        for row in &mut cells {
            if row.len() < cols {
                ragged = true;
                row.resize(cols, None);
            }
        }
        Self {
            cells,
            cols,
            ragged,
        }
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn dims(&self) -> (usize, usize) {
        (self.rows(), self.cols)
    }

    /// True when at least one rank had to be padded.
    pub fn is_ragged(&self) -> bool {
        self.ragged
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows() && cell.col < self.cols
    }

    /// Piece at `cell`, or `None` for blank and out-of-range cells.
    pub fn piece_at(&self, cell: Cell) -> Option<Piece> {
        self.cells.get(cell.row)?.get(cell.col).copied().flatten()
    }

    /// Occupied cells in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Cell, Piece)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, rank)| {
            rank.iter()
                .enumerate()
                .filter_map(move |(col, piece)| piece.map(|p| (Cell::new(row, col), p)))
        })
    }

    /// Render back to a placement field, compressing blank runs.
    pub fn to_fen(&self) -> String {
        let ranks: Vec<String> = self
            .cells
            .iter()
            .map(|rank| {
                let mut out = String::new();
                let mut blanks = 0usize;
                for cell in rank {
                    match cell {
                        Some(piece) => {
                            flush_blanks(&mut out, &mut blanks);
                            out.push(piece.to_char());
                        }
                        None => blanks += 1,
                    }
                }
                flush_blanks(&mut out, &mut blanks);
                out
            })
            .collect();
        ranks.join("/")
    }
}

fn flush_blanks(out: &mut String, blanks: &mut usize) {
    while *blanks > 0 {
        let run = (*blanks).min(9);
        out.push(char::from(b'0' + run as u8));
        *blanks -= run;
    }
}

impl FromStr for BoardLayout {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Empty board layout")]
    Empty,
    #[error("Invalid character {character:?} in rank {rank}")]
    InvalidCharacter { rank: usize, character: char },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PieceColor, PieceKind};

    #[test]
    fn test_starting_position() {
        let layout =
            BoardLayout::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
                .unwrap();
        assert_eq!(layout.dims(), (8, 8));
        assert_eq!(
            layout.piece_at(Cell::new(7, 0)),
            Some(Piece::new(PieceKind::Rook, PieceColor::White))
        );
        assert_eq!(
            layout.piece_at(Cell::new(7, 4)),
            Some(Piece::new(PieceKind::King, PieceColor::White))
        );
        assert_eq!(
            layout.piece_at(Cell::new(0, 3)),
            Some(Piece::new(PieceKind::Queen, PieceColor::Black))
        );
        assert_eq!(layout.piece_at(Cell::new(4, 4)), None);
        assert_eq!(layout.pieces().count(), 32);
        assert!(!layout.is_ragged());
    }

    #[test]
    fn test_empty_board() {
        let layout = BoardLayout::from_fen("8/8/8/8/8/8/8/8 w - - 0 1").unwrap();
        assert_eq!(layout.dims(), (8, 8));
        assert_eq!(layout.pieces().count(), 0);
    }

    #[test]
    fn test_consecutive_digits_expand_independently() {
        let layout = BoardLayout::from_fen("55/k9").unwrap();
        assert_eq!(layout.dims(), (2, 10));
    }

    #[test]
    fn test_ragged_ranks_are_padded() {
        let layout = BoardLayout::from_fen("8/3/8").unwrap();
        assert!(layout.is_ragged());
        assert_eq!(layout.dims(), (3, 8));
        assert_eq!(layout.piece_at(Cell::new(1, 7)), None);
        assert!(layout.contains(Cell::new(1, 7)));
        assert!(!layout.contains(Cell::new(3, 0)));
    }

    #[test]
    fn test_invalid_character() {
        assert_eq!(
            BoardLayout::from_fen("8/8/x7"),
            Err(LayoutError::InvalidCharacter {
                rank: 2,
                character: 'x'
            })
        );
        assert!(BoardLayout::from_fen("0/8").is_err());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(BoardLayout::from_fen(""), Err(LayoutError::Empty));
        assert_eq!(BoardLayout::from_fen("   "), Err(LayoutError::Empty));
    }

    #[test]
    fn test_to_fen() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R";
        assert_eq!(BoardLayout::from_fen(fen).unwrap().to_fen(), fen);
        assert_eq!(BoardLayout::from_fen("55").unwrap().to_fen(), "91");
    }

    #[test]
    fn test_from_cozy_board() {
        let board = cozy_chess::Board::default();
        let layout = BoardLayout::from_board(&board);
        assert_eq!(layout.to_fen(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR");
    }

    #[test]
    fn test_cell_parity() {
        assert!(Cell::new(0, 0).is_even());
        assert!(!Cell::new(0, 1).is_even());
        assert!(Cell::new(3, 5).is_even());
    }
}
