//! Core logic of the colorgrid elimination game.
//!
//! A board of randomly colored tiles; picking a tile wipes out every other
//! live tile whose color lies within a tolerance of the picked one, scored by
//! `eliminated * 10 / turn`. No rendering here, the game crate drives this
//! from its model.

use serde::{Deserialize, Serialize};

pub mod grid;
pub use grid::*;

/// Diagonal of the unit RGB cube, the largest possible color distance.
pub const DIST_MAX: f32 = 1.732_050_8;

/// Number of discrete levels per color channel when rolling random colors.
pub const COLOR_LEVELS: u32 = 256;

/// Normalized RGB color, each channel in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Euclidean distance to another color, normalized by [`DIST_MAX`]
    /// so that 0.0 is an exact match and 1.0 the cube diagonal.
    pub fn distance(&self, other: &Rgb) -> f32 {
        let dr = self.r - other.r;
        let dg = self.g - other.g;
        let db = self.b - other.b;
        (dr * dr + dg * dg + db * db).sqrt() / DIST_MAX
    }
}

/// One board tile. Position and dimensions are render placement in board
/// pixels (center of the tile), not the logical grid index.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Cell {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Rgb,
    pub eliminated: bool,
}
