//! Grid to terminal rendering
//!
//! A terminal column counts as one pixel wide and a row as two pixels tall,
//! so a block of `b` pixels covers `b` columns and `b / 2` rows.

use crate::error::Result;
use crate::gradient::{Gradient, Rgb};
use crate::sim::{Policy, Simulation};
use crate::terminal::Terminal;
use crossterm::style::Color;

/// Colors used to draw cells
#[derive(Debug, Clone)]
pub struct Palette {
    pub gradient: Gradient,
    /// Full-brightness color for the trail policy
    pub base: Rgb,
    /// Dead-cell color for the plain policy
    pub off: Rgb,
}

impl Palette {
    pub fn new(gradient: Gradient, base: Option<Rgb>, off: Option<Rgb>) -> Self {
        let base = base.unwrap_or(gradient.first());
        let off = off.unwrap_or(gradient.last());
        Self { gradient, base, off }
    }

    /// Color of the cell at `(x, y)` holding `rank`
    pub fn cell_color(&self, sim: &Simulation, x: usize, y: usize, rank: u16) -> Result<Rgb> {
        match sim.policy() {
            Policy::Decay => self.gradient.get(rank as usize),
            Policy::Plain => Ok(if rank == 0 { self.gradient.first() } else { self.off }),
            Policy::Trail => Ok(self.base.scale(sim.brightness(x, y))),
        }
    }
}

/// Terminal cells covered by one grid cell
pub fn cell_extent(block: usize) -> (usize, usize) {
    (block.max(1), (block / 2).max(1))
}

/// Map a terminal position back to a grid cell
pub fn cell_at(sim: &Simulation, block: usize, col: u16, row: u16) -> Option<(usize, usize)> {
    let (w, h) = cell_extent(block);
    let (x, y) = (col as usize / w, row as usize / h);
    (x < sim.grid().cols() && y < sim.grid().rows()).then_some((x, y))
}

/// Draw the grid into the back buffer, clipped to the terminal
pub fn draw_grid(term: &mut Terminal, sim: &Simulation, palette: &Palette, block: usize, glyph: char) -> Result<()> {
    let (w, h) = cell_extent(block);
    let (term_w, term_h) = term.size();
    let (term_w, term_h) = (term_w as usize, term_h as usize);

    for (x, y, rank) in sim.grid().iter() {
        let (left, top) = (x.saturating_mul(w), y.saturating_mul(h));
        if left >= term_w || top >= term_h {
            continue;
        }
        let color: Color = palette.cell_color(sim, x, y, rank)?.into();
        for dy in 0..h.min(term_h - top) {
            for dx in 0..w.min(term_w - left) {
                term.set((left + dx) as i32, (top + dy) as i32, glyph, Some(color), false);
            }
        }
    }
    Ok(())
}
