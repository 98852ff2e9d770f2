//! Canonical piece and color types for the project.
//! cozy-chess types are only used at the conversion boundary.

/// Project-owned piece type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// Project-owned color type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceColor {
    White,
    Black,
}

/// A colored piece, as written in a layout string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: PieceColor,
}

impl PieceKind {
    pub fn to_char_upper(self) -> char {
        match self {
            Self::Pawn => 'P',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Rook => 'R',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }

    pub fn to_char_lower(self) -> char {
        self.to_char_upper().to_ascii_lowercase()
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'p' => Some(Self::Pawn),
            'n' => Some(Self::Knight),
            'b' => Some(Self::Bishop),
            'r' => Some(Self::Rook),
            'q' => Some(Self::Queen),
            'k' => Some(Self::King),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pawn => "pawn",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Rook => "rook",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }
}

impl PieceColor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }

    /// Single-letter prefix used in piece image file names.
    pub fn prefix(self) -> char {
        match self {
            Self::White => 'w',
            Self::Black => 'b',
        }
    }

    pub fn from_prefix(c: char) -> Option<Self> {
        match c {
            'w' => Some(Self::White),
            'b' => Some(Self::Black),
            _ => None,
        }
    }
}

impl Piece {
    pub const fn new(kind: PieceKind, color: PieceColor) -> Self {
        Self { kind, color }
    }

    /// Uppercase letters are White, lowercase are Black.
    pub fn from_char(c: char) -> Option<Self> {
        let kind = PieceKind::from_char(c)?;
        let color = if c.is_ascii_uppercase() {
            PieceColor::White
        } else {
            PieceColor::Black
        };
        Some(Self { kind, color })
    }

    pub fn to_char(self) -> char {
        match self.color {
            PieceColor::White => self.kind.to_char_upper(),
            PieceColor::Black => self.kind.to_char_lower(),
        }
    }

    /// Image resource stem, e.g. `wQ` or `bP`.
    pub fn resource_stem(self) -> String {
        format!("{}{}", self.color.prefix(), self.kind.to_char_upper())
    }

    /// Inverse of [`Piece::resource_stem`]. Only the first two characters are
    /// significant.
    pub fn from_resource_stem(stem: &str) -> Option<Self> {
        let mut chars = stem.chars();
        let color = PieceColor::from_prefix(chars.next()?)?;
        let kind = PieceKind::from_char(chars.next()?)?;
        Some(Self { kind, color })
    }

    /// Whether a pawn of this color standing on `row` has reached the far
    /// side of a board with `rows` ranks. White promotes on row 0.
    pub fn is_promotion_row(self, row: usize, rows: usize) -> bool {
        if self.kind != PieceKind::Pawn || rows == 0 {
            return false;
        }
        match self.color {
            PieceColor::White => row == 0,
            PieceColor::Black => row == rows - 1,
        }
    }
}

impl From<cozy_chess::Piece> for PieceKind {
    fn from(p: cozy_chess::Piece) -> Self {
        match p {
            cozy_chess::Piece::Pawn => Self::Pawn,
            cozy_chess::Piece::Knight => Self::Knight,
            cozy_chess::Piece::Bishop => Self::Bishop,
            cozy_chess::Piece::Rook => Self::Rook,
            cozy_chess::Piece::Queen => Self::Queen,
            cozy_chess::Piece::King => Self::King,
        }
    }
}

impl From<cozy_chess::Color> for PieceColor {
    fn from(c: cozy_chess::Color) -> Self {
        match c {
            cozy_chess::Color::White => Self::White,
            cozy_chess::Color::Black => Self::Black,
        }
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::fmt::Display for PieceColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.color, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_from_char_case_sets_color() {
        assert_eq!(
            Piece::from_char('Q'),
            Some(Piece::new(PieceKind::Queen, PieceColor::White))
        );
        assert_eq!(
            Piece::from_char('n'),
            Some(Piece::new(PieceKind::Knight, PieceColor::Black))
        );
        assert_eq!(Piece::from_char('x'), None);
        assert_eq!(Piece::from_char(' '), None);
    }

    #[test]
    fn test_resource_stem() {
        assert_eq!(Piece::from_char('K').unwrap().resource_stem(), "wK");
        assert_eq!(Piece::from_char('p').unwrap().resource_stem(), "bP");
        assert_eq!(
            Piece::from_resource_stem("bQ"),
            Some(Piece::new(PieceKind::Queen, PieceColor::Black))
        );
        assert_eq!(Piece::from_resource_stem("xQ"), None);
        assert_eq!(Piece::from_resource_stem("w"), None);
    }

    #[test]
    fn test_promotion_row() {
        let white_pawn = Piece::new(PieceKind::Pawn, PieceColor::White);
        let black_pawn = Piece::new(PieceKind::Pawn, PieceColor::Black);
        let white_rook = Piece::new(PieceKind::Rook, PieceColor::White);

        assert!(white_pawn.is_promotion_row(0, 8));
        assert!(!white_pawn.is_promotion_row(7, 8));
        assert!(black_pawn.is_promotion_row(7, 8));
        assert!(black_pawn.is_promotion_row(9, 10));
        assert!(!black_pawn.is_promotion_row(0, 8));
        assert!(!white_rook.is_promotion_row(0, 8));
    }

    #[test]
    fn test_cozy_conversions() {
        assert_eq!(PieceKind::from(cozy_chess::Piece::Bishop), PieceKind::Bishop);
        assert_eq!(PieceColor::from(cozy_chess::Color::Black), PieceColor::Black);
    }
}
