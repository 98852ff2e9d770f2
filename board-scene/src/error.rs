//! Error types for the board scene

use chess::{Cell, LayoutError};
use thiserror::Error;

use crate::assets::ImageError;

pub type SceneResult<T> = Result<T, SceneError>;

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Invalid board layout: {0}")]
    Layout(#[from] LayoutError),

    #[error("Cell {cell} is outside the {rows}x{cols} board")]
    CellOutOfBounds { cell: Cell, rows: usize, cols: usize },

    #[error("Opacity matrix is {rows}x{cols}, expected {expected_rows}x{expected_cols}")]
    OpacityShape {
        rows: usize,
        cols: usize,
        expected_rows: usize,
        expected_cols: usize,
    },

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error("Invalid color: {0}")]
    InvalidColor(String),
}
