pub mod layout;
pub mod types;

pub use layout::{BoardLayout, Cell, LayoutError};
pub use types::{Piece, PieceColor, PieceKind};
