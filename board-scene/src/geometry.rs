//! Scene coordinates and colors.
//!
//! The scene uses one unit per board cell: moving one row down subtracts one
//! from `y`, moving one column right adds one to `x`. Cell `(0, 0)` is centred
//! on the origin.

use std::str::FromStr;

use chess::Cell;

use crate::error::SceneError;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Centre of a grid position given as fractional `(row, col)`.
    pub fn from_grid(row: f32, col: f32) -> Self {
        Self::new(col, -row)
    }

    pub fn shift(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

/// Centre of a board cell.
pub fn cell_center(cell: Cell) -> Point {
    Point::from_grid(cell.row as f32, cell.col as f32)
}

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Self = Self::new(0xff, 0xff, 0xff);
    pub const BLACK: Self = Self::new(0x00, 0x00, 0x00);
    pub const GREEN: Self = Self::new(0x69, 0x92, 0x3e);
    pub const BLUE: Self = Self::new(0x58, 0xc4, 0xdd);
    pub const RED: Self = Self::new(0xfc, 0x62, 0x55);
    pub const YELLOW: Self = Self::new(0xff, 0xff, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `self` painted over `under` with the given alpha.
    pub fn over(self, under: Self, alpha: f32) -> Self {
        let a = alpha.clamp(0.0, 1.0);
        let mix = |top: u8, bottom: u8| -> u8 {
            (f32::from(top) * a + f32::from(bottom) * (1.0 - a)).round() as u8
        };
        Self::new(
            mix(self.r, under.r),
            mix(self.g, under.g),
            mix(self.b, under.b),
        )
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = SceneError;

    /// Accepts `#rrggbb` or `rrggbb`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(SceneError::InvalidColor(s.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| SceneError::InvalidColor(s.to_string()))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}
