use crate::{Cell, Rgb, COLOR_LEVELS};
use itertools::Itertools;
use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    #[error("board needs at least one row, one column and a nonzero cell size")]
    EmptyGrid,
    #[error("point ({x}, {y}) is outside the {width}x{height} board")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}

/// Display state of the board: `Finished` once every tile is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Playing,
    Finished,
}

/// Outcome of one elimination pass.
///
/// `eliminated` counts the similar tiles wiped besides the picked one; the
/// picked tile itself is removed at selection time and never counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolved {
    pub eliminated: u32,
    pub gained: u32,
    pub turn: u32,
}

/// A fixed-size board of colored tiles with selection, similarity
/// elimination and scoring.
pub struct ColorGrid {
    pub rows: usize,
    pub cols: usize,
    pub cell_width: u32,
    pub cell_height: u32,
    pub cells: Vec<Cell>,
    pub selected: Option<usize>,
    pub score: u32,
    pub turn: u32,
    rng: StdRng,
}

impl ColorGrid {
    /// Build a board seeded from OS entropy.
    pub fn new(
        rows: usize,
        cols: usize,
        cell_width: u32,
        cell_height: u32,
    ) -> Result<Self, GridError> {
        Self::with_rng(rows, cols, cell_width, cell_height, StdRng::from_os_rng())
    }

    /// Build a board with a fixed seed, for tests and replays.
    pub fn with_seed(
        rows: usize,
        cols: usize,
        cell_width: u32,
        cell_height: u32,
        seed: u64,
    ) -> Result<Self, GridError> {
        Self::with_rng(
            rows,
            cols,
            cell_width,
            cell_height,
            StdRng::seed_from_u64(seed),
        )
    }

    fn with_rng(
        rows: usize,
        cols: usize,
        cell_width: u32,
        cell_height: u32,
        rng: StdRng,
    ) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 || cell_width == 0 || cell_height == 0 {
            return Err(GridError::EmptyGrid);
        }
        let mut board = Self {
            rows,
            cols,
            cell_width,
            cell_height,
            cells: Vec::with_capacity(rows * cols),
            selected: None,
            score: 0,
            turn: 1,
            rng,
        };
        board.reset();
        Ok(board)
    }

    /// Restart: fresh random colors, all tiles live, counters back to start.
    /// The only way back from `Finished` to `Playing`.
    pub fn reset(&mut self) {
        self.selected = None;
        self.score = 0;
        self.turn = 1;
        self.cells.clear();
        let (cw, ch) = (self.cell_width as f32, self.cell_height as f32);
        for (row, col) in (0..self.rows).cartesian_product(0..self.cols) {
            let color = Rgb::new(
                self.rng.random_range(0..COLOR_LEVELS) as f32 / (COLOR_LEVELS - 1) as f32,
                self.rng.random_range(0..COLOR_LEVELS) as f32 / (COLOR_LEVELS - 1) as f32,
                self.rng.random_range(0..COLOR_LEVELS) as f32 / (COLOR_LEVELS - 1) as f32,
            );
            self.cells.push(Cell {
                x: cw / 2.0 + col as f32 * cw,
                y: ch / 2.0 + row as f32 * ch,
                width: cw,
                height: ch,
                color,
                eliminated: false,
            });
        }
    }

    pub fn index_of(&self, row: usize, col: usize) -> usize {
        col + row * self.cols
    }

    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        &self.cells[self.index_of(row, col)]
    }

    /// Map a board pixel to a tile and pick it. The tile is wiped
    /// immediately; the similarity pass runs on the next `resolve` call.
    pub fn select(&mut self, x: u32, y: u32) -> Result<usize, GridError> {
        let col = (x / self.cell_width) as usize;
        let row = (y / self.cell_height) as usize;
        if col >= self.cols || row >= self.rows {
            return Err(GridError::OutOfBounds {
                x,
                y,
                width: self.cols as u32 * self.cell_width,
                height: self.rows as u32 * self.cell_height,
            });
        }
        let idx = self.index_of(row, col);
        self.cells[idx].eliminated = true;
        self.selected = Some(idx);
        Ok(idx)
    }

    /// Run one elimination pass against the pending selection.
    ///
    /// Every live tile within `tolerance` of the picked color is wiped and
    /// counted; score grows by `count * 10 / turn` with the pre-increment
    /// turn. Returns `None` when nothing is selected.
    pub fn resolve(&mut self, tolerance: f32) -> Option<Resolved> {
        let picked = self.selected?;
        let reference = self.cells[picked].color;
        self.cells[picked].eliminated = true;
        let mut count = 0u32;
        for cell in self.cells.iter_mut() {
            if cell.eliminated {
                continue;
            }
            if reference.distance(&cell.color) <= tolerance {
                cell.eliminated = true;
                count += 1;
            }
        }
        let report = Resolved {
            eliminated: count,
            gained: count * 10 / self.turn,
            turn: self.turn,
        };
        self.score += report.gained;
        self.turn += 1;
        self.selected = None;
        debug!(
            "turn {}: wiped {} tiles for {} points (total {})",
            report.turn, report.eliminated, report.gained, self.score
        );
        Some(report)
    }

    /// Full-board scan, recomputed on every call.
    pub fn is_cleared(&self) -> bool {
        self.cells.iter().all(|c| c.eliminated)
    }

    pub fn phase(&self) -> Phase {
        if self.is_cleared() {
            Phase::Finished
        } else {
            Phase::Playing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_degenerate_boards() {
        assert!(matches!(
            ColorGrid::new(0, 16, 50, 50),
            Err(GridError::EmptyGrid)
        ));
        assert!(matches!(
            ColorGrid::new(12, 0, 50, 50),
            Err(GridError::EmptyGrid)
        ));
        assert!(matches!(
            ColorGrid::new(12, 16, 0, 50),
            Err(GridError::EmptyGrid)
        ));
        assert!(matches!(
            ColorGrid::new(12, 16, 50, 0),
            Err(GridError::EmptyGrid)
        ));
    }

    #[test]
    fn test_fresh_board_state() {
        let board = ColorGrid::with_seed(12, 16, 50, 50, 7).unwrap();
        assert_eq!(board.cells.len(), 12 * 16);
        assert_eq!(board.score, 0);
        assert_eq!(board.turn, 1);
        assert_eq!(board.selected, None);
        assert_eq!(board.phase(), Phase::Playing);
        for cell in &board.cells {
            assert!(!cell.eliminated);
            for ch in [cell.color.r, cell.color.g, cell.color.b] {
                assert!((0.0..=1.0).contains(&ch));
            }
        }
    }

    #[test]
    fn test_cell_placement() {
        let board = ColorGrid::with_seed(12, 16, 50, 50, 7).unwrap();
        let cell = board.cell(2, 3);
        assert_eq!(cell.x, 25.0 + 3.0 * 50.0);
        assert_eq!(cell.y, 25.0 + 2.0 * 50.0);
        assert_eq!(cell.width, 50.0);
        assert_eq!(cell.height, 50.0);
    }

    #[test]
    fn test_select_maps_pixels_to_tiles() {
        let mut board = ColorGrid::with_seed(12, 16, 50, 50, 7).unwrap();
        let idx = board.select(75, 120).unwrap();
        assert_eq!(idx, 1 + 2 * 16);
        assert_eq!(board.selected, Some(idx));
        assert!(board.cells[idx].eliminated);
    }

    #[test]
    fn test_select_out_of_bounds() {
        let mut board = ColorGrid::with_seed(12, 16, 50, 50, 7).unwrap();
        let err = board.select(800, 10).unwrap_err();
        assert_eq!(
            err,
            GridError::OutOfBounds {
                x: 800,
                y: 10,
                width: 800,
                height: 600
            }
        );
        assert_eq!(board.selected, None);
    }

    #[test]
    fn test_resolve_without_selection() {
        let mut board = ColorGrid::with_seed(12, 16, 50, 50, 7).unwrap();
        assert_eq!(board.resolve(0.2), None);
        assert_eq!(board.turn, 1);
        assert_eq!(board.score, 0);
    }

    #[test]
    fn test_resolve_respects_tolerance() {
        let mut board = ColorGrid::with_seed(12, 16, 50, 50, 99).unwrap();
        let reference = board.cell(0, 0).color;
        board.select(0, 0).unwrap();
        board.resolve(0.2).unwrap();
        for (i, cell) in board.cells.iter().enumerate() {
            if i == 0 {
                continue;
            }
            if cell.eliminated {
                assert!(reference.distance(&cell.color) <= 0.2);
            } else {
                assert!(reference.distance(&cell.color) > 0.2);
            }
        }
    }

    #[test]
    fn test_same_seed_same_board() {
        let a = ColorGrid::with_seed(4, 4, 10, 10, 42).unwrap();
        let b = ColorGrid::with_seed(4, 4, 10, 10, 42).unwrap();
        for (ca, cb) in a.cells.iter().zip(b.cells.iter()) {
            assert_eq!(ca.color, cb.color);
        }
    }
}
