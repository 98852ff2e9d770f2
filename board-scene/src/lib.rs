//! Animated chessboard scene.
//!
//! Build a [`ChessBoard`] from a FEN-like layout, then feed the
//! [`Animation`] directives its operations return to whatever engine draws the
//! [`Scene`].

pub mod animation;
pub mod assets;
pub mod board;
pub mod error;
pub mod geometry;
pub mod scene;
pub mod visual;

pub use animation::{Animation, Animations};
pub use assets::{
    AssetCatalog, ImageError, PieceImage, PieceImageLoader, PngImageLoader, SilhouetteLoader,
};
pub use board::ChessBoard;
pub use error::{SceneError, SceneResult};
pub use geometry::{cell_center, Point, Rgb};
pub use scene::Scene;
pub use visual::{Layer, Shape, Visual, VisualId};

pub use chess::{BoardLayout, Cell, Piece, PieceColor, PieceKind};
