//! Fixed-size grid of cell ranks
//!
//! Rank 0 means the cell is active this generation. Any positive rank counts
//! generations since the cell was last active, saturating at `max_rank`.

use crate::error::{LifeError, Result};

/// Largest grid accepted, in cells
pub const MAX_CELLS: usize = 1 << 22;

/// Grid dimensions in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    pub cols: usize,
    pub rows: usize,
}

impl GridSize {
    /// `cols = width / block`, `rows = height / block`
    pub fn from_pixels(width_px: usize, height_px: usize, block_px: usize) -> Result<Self> {
        if block_px == 0 {
            return Err(LifeError::invalid("block size must be positive"));
        }
        let size = Self {
            cols: width_px / block_px,
            rows: height_px / block_px,
        };
        if size.cols == 0 || size.rows == 0 {
            return Err(LifeError::invalid(format!(
                "{}x{} area holds no {}px blocks",
                width_px, height_px, block_px
            )));
        }
        Ok(size)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cols: usize,
    rows: usize,
    max_rank: u16,
    cells: Vec<u16>,
}

impl Grid {
    /// New grid with every cell fully inactive
    pub fn new(cols: usize, rows: usize, max_rank: u16) -> Result<Self> {
        if cols == 0 || rows == 0 {
            return Err(LifeError::invalid(format!("grid {}x{} is empty", cols, rows)));
        }
        if max_rank == 0 {
            return Err(LifeError::invalid("max rank must be at least 1"));
        }
        let len = cols
            .checked_mul(rows)
            .filter(|&n| n <= MAX_CELLS)
            .ok_or_else(|| {
                LifeError::invalid(format!("grid {}x{} exceeds {} cells", cols, rows, MAX_CELLS))
            })?;
        Ok(Self {
            cols,
            rows,
            max_rank,
            cells: vec![max_rank; len],
        })
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn max_rank(&self) -> u16 {
        self.max_rank
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Result<usize> {
        if x < self.cols && y < self.rows {
            Ok(y * self.cols + x)
        } else {
            Err(LifeError::OutOfRange {
                index: y.saturating_mul(self.cols).saturating_add(x),
                len: self.cells.len(),
            })
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Result<u16> {
        Ok(self.cells[self.index(x, y)?])
    }

    /// Set a cell's rank, clamped to `[0, max_rank]`
    pub fn set(&mut self, x: usize, y: usize, rank: u16) -> Result<()> {
        let i = self.index(x, y)?;
        self.cells[i] = rank.min(self.max_rank);
        Ok(())
    }

    pub fn is_active(&self, x: usize, y: usize) -> bool {
        matches!(self.get(x, y), Ok(0))
    }

    /// Count rank-0 cells in the Moore neighborhood. Edges do not wrap.
    pub fn active_neighbors(&self, x: usize, y: usize) -> u8 {
        let mut count = 0u8;
        let y_lo = y.saturating_sub(1);
        let y_hi = (y + 1).min(self.rows - 1);
        let x_lo = x.saturating_sub(1);
        let x_hi = (x + 1).min(self.cols - 1);
        for ny in y_lo..=y_hi {
            let row = &self.cells[ny * self.cols..(ny + 1) * self.cols];
            for nx in x_lo..=x_hi {
                if (nx, ny) != (x, y) && row[nx] == 0 {
                    count += 1;
                }
            }
        }
        count
    }

    /// Iterate `(x, y, rank)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, u16)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &rank)| (i % cols, i / cols, rank))
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&r| r == 0).count()
    }

    /// Snapshot of which cells are active, row-major
    pub fn active_plane(&self) -> Vec<bool> {
        self.cells.iter().map(|&r| r == 0).collect()
    }

    pub(crate) fn cells(&self) -> &[u16] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [u16] {
        &mut self.cells
    }

    pub fn fill(&mut self, rank: u16) {
        let rank = rank.min(self.max_rank);
        self.cells.iter_mut().for_each(|c| *c = rank);
    }
}
