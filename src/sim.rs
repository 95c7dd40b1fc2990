//! Simulation context: grid, aging policy, trail history and pause state

use crate::error::{LifeError, Result};
use crate::grid::Grid;
use rand::Rng;
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

/// Number of previous generations kept by the trail policy
pub const TRAIL_DEPTH: usize = 3;

/// Weights applied to the current plane and each trail entry
const TRAIL_WEIGHTS: [f32; TRAIL_DEPTH] = [0.5, 0.25, 0.125];

/// How dead cells are remembered between generations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Policy {
    /// Boolean life, dead cells render flat
    Plain,
    /// Rank counts generations since death, saturating at the gradient end
    #[default]
    Decay,
    /// Boolean life plus the last three generations for brightness
    Trail,
}

impl Policy {
    /// Max rank the grid should use under this policy
    pub fn max_rank(self, gradient_steps: usize) -> u16 {
        match self {
            Policy::Decay => gradient_steps.saturating_sub(1).clamp(1, u16::MAX as usize) as u16,
            Policy::Plain | Policy::Trail => 1,
        }
    }
}

impl FromStr for Policy {
    type Err = LifeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "plain" | "none" | "classic" => Ok(Policy::Plain),
            "decay" | "afterglow" | "rank" => Ok(Policy::Decay),
            "trail" | "history" => Ok(Policy::Trail),
            _ => Err(LifeError::invalid(format!(
                "unknown policy {:?} (available: plain, decay, trail)",
                s
            ))),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Policy::Plain => "plain",
            Policy::Decay => "decay",
            Policy::Trail => "trail",
        })
    }
}

/// Previous active planes, most recent first
#[derive(Debug, Clone, Default)]
pub struct Trail {
    planes: VecDeque<Vec<bool>>,
}

impl Trail {
    pub fn push(&mut self, plane: Vec<bool>) {
        self.planes.push_front(plane);
        self.planes.truncate(TRAIL_DEPTH);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.planes.len()
    }

    pub fn clear(&mut self) {
        self.planes.clear();
    }

    /// `current + 0.5*t0 + 0.25*t1 + 0.125*t2`, clamped to 1.0
    pub fn brightness(&self, current: bool, index: usize) -> f32 {
        let mut total = if current { 1.0 } else { 0.0 };
        for (plane, weight) in self.planes.iter().zip(TRAIL_WEIGHTS) {
            if plane.get(index).copied().unwrap_or(false) {
                total += weight;
            }
        }
        total.min(1.0)
    }
}

/// Everything the loop, renderer and controls share
#[derive(Debug, Clone)]
pub struct Simulation {
    grid: Grid,
    policy: Policy,
    trail: Trail,
    mask: Vec<bool>,
    paused: bool,
    generation: u64,
}

impl Simulation {
    pub fn new(cols: usize, rows: usize, policy: Policy, max_rank: u16) -> Result<Self> {
        let grid = Grid::new(cols, rows, max_rank)?;
        let mask = vec![false; cols * rows];
        Ok(Self {
            grid,
            policy,
            trail: Trail::default(),
            mask,
            paused: false,
            generation: 0,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[cfg(test)]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    #[cfg(test)]
    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.grid.population()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        info!(paused = self.paused, generation = self.generation, "pause toggled");
    }

    /// Each cell becomes active or fully inactive with equal probability
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let max = self.grid.max_rank();
        for cell in self.grid.cells_mut() {
            *cell = if rng.gen_bool(0.5) { 0 } else { max };
        }
        self.trail.clear();
        self.generation = 0;
        debug!(population = self.grid.population(), "grid randomized");
    }

    /// Every cell fully inactive
    pub fn clear(&mut self) {
        self.grid.fill(self.grid.max_rank());
        self.trail.clear();
        self.generation = 0;
        debug!("grid cleared");
    }

    /// Flip a cell between active and fully inactive
    pub fn toggle_cell(&mut self, x: usize, y: usize) -> Result<()> {
        let rank = if self.grid.is_active(x, y) { self.grid.max_rank() } else { 0 };
        self.grid.set(x, y, rank)
    }

    /// Advance one generation
    pub fn step(&mut self) {
        let cols = self.grid.cols();

        // Pass 1: decide next liveness from the current generation only
        for (i, next) in self.mask.iter_mut().enumerate() {
            let (x, y) = (i % cols, i / cols);
            let neighbors = self.grid.active_neighbors(x, y);
            *next = match (self.grid.cells()[i] == 0, neighbors) {
                (true, 2) | (true, 3) => true,
                (false, 3) => true,
                _ => false,
            };
        }

        if self.policy == Policy::Trail {
            self.trail.push(self.grid.active_plane());
        }

        // Pass 2: age everything, revive flagged cells
        let max = self.grid.max_rank();
        for (cell, &alive) in self.grid.cells_mut().iter_mut().zip(&self.mask) {
            *cell = if alive { 0 } else { cell.saturating_add(1).min(max) };
        }

        self.generation += 1;
    }

    /// Step unless paused. Returns true if a generation was computed.
    pub fn tick(&mut self) -> bool {
        if self.paused {
            return false;
        }
        self.step();
        true
    }

    /// Single step, only while paused
    pub fn step_once(&mut self) -> bool {
        if !self.paused {
            return false;
        }
        self.step();
        true
    }

    /// Trail brightness of a cell in [0, 1]; 1.0 or 0.0 for other policies
    pub fn brightness(&self, x: usize, y: usize) -> f32 {
        let active = self.grid.is_active(x, y);
        match self.policy {
            Policy::Trail => self.trail.brightness(active, y * self.grid.cols() + x),
            Policy::Plain | Policy::Decay => {
                if active {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sim_with(cols: usize, rows: usize, policy: Policy, max_rank: u16, alive: &[(usize, usize)]) -> Simulation {
        let mut sim = Simulation::new(cols, rows, policy, max_rank).unwrap();
        for &(x, y) in alive {
            sim.grid_mut().set(x, y, 0).unwrap();
        }
        sim
    }

    fn actives(sim: &Simulation) -> Vec<(usize, usize)> {
        sim.grid().iter().filter(|&(_, _, r)| r == 0).map(|(x, y, _)| (x, y)).collect()
    }

    #[test]
    fn block_is_still_life() {
        let block = [(1, 1), (2, 1), (1, 2), (2, 2)];
        for policy in [Policy::Plain, Policy::Decay, Policy::Trail] {
            let mut sim = sim_with(4, 4, policy, policy.max_rank(10), &block);
            let before = sim.grid().clone();
            sim.step();
            assert_eq!(sim.grid(), &before, "{}", policy);
        }
    }

    #[test]
    fn blinker_oscillates() {
        let mut sim = sim_with(5, 5, Policy::Decay, 9, &[(1, 2), (2, 2), (3, 2)]);
        sim.step();
        assert_eq!(actives(&sim), vec![(2, 1), (2, 2), (2, 3)]);
        // The dead ends of the horizontal bar glow at rank 1
        assert_eq!(sim.grid().get(1, 2).unwrap(), 1);
        sim.step();
        assert_eq!(actives(&sim), vec![(1, 2), (2, 2), (3, 2)]);
        assert_eq!(sim.generation(), 2);
    }

    #[test]
    fn recently_dead_neighbors_do_not_count() {
        // Three rank-1 cells around (1, 1) must not cause a birth
        let mut sim = sim_with(3, 3, Policy::Decay, 5, &[]);
        for (x, y) in [(0, 0), (1, 0), (2, 0)] {
            sim.grid_mut().set(x, y, 1).unwrap();
        }
        sim.step();
        assert_eq!(sim.population(), 0);
    }

    #[test]
    fn ranks_age_and_saturate() {
        let max = 4;
        let mut sim = sim_with(5, 5, Policy::Decay, max, &[(2, 2)]);
        for k in 1..=7u16 {
            sim.step();
            assert_eq!(sim.grid().get(2, 2).unwrap(), k.min(max));
        }
    }

    #[test]
    fn revival_resets_rank() {
        // Blinker: (1, 2) dies on step 1 and revives on step 2
        let mut sim = sim_with(5, 5, Policy::Decay, 9, &[(1, 2), (2, 2), (3, 2)]);
        sim.step();
        assert_eq!(sim.grid().get(1, 2).unwrap(), 1);
        sim.step();
        assert_eq!(sim.grid().get(1, 2).unwrap(), 0);
    }

    #[test]
    fn plain_policy_is_boolean() {
        let mut sim = sim_with(5, 5, Policy::Plain, Policy::Plain.max_rank(50), &[(2, 2)]);
        for _ in 0..3 {
            sim.step();
            assert!(sim.grid().iter().all(|(_, _, r)| r == 1));
        }
    }

    #[test]
    fn randomize_uses_extremes_only() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut sim = Simulation::new(30, 20, Policy::Decay, 12).unwrap();
        sim.step();
        sim.randomize(&mut rng);
        assert_eq!(sim.generation(), 0);
        assert!(sim.grid().iter().all(|(_, _, r)| r == 0 || r == 12));
        let pop = sim.population();
        assert!(pop > 0 && pop < 600);
    }

    #[test]
    fn trail_keeps_three_planes() {
        let mut sim = sim_with(5, 5, Policy::Trail, 1, &[(2, 2)]);
        sim.step();
        // Lone cell died: current 0 + 0.5 from the previous generation
        assert!((sim.brightness(2, 2) - 0.5).abs() < f32::EPSILON);
        sim.step();
        assert!((sim.brightness(2, 2) - 0.25).abs() < f32::EPSILON);
        sim.step();
        assert!((sim.brightness(2, 2) - 0.125).abs() < f32::EPSILON);
        sim.step();
        assert_eq!(sim.brightness(2, 2), 0.0);
        assert_eq!(sim.trail().len(), TRAIL_DEPTH);
    }

    #[test]
    fn trail_brightness_clamps() {
        let block = [(1, 1), (2, 1), (1, 2), (2, 2)];
        let mut sim = sim_with(4, 4, Policy::Trail, 1, &block);
        sim.step();
        sim.step();
        assert_eq!(sim.brightness(1, 1), 1.0);
    }

    #[test]
    fn pause_gates_tick() {
        let mut sim = sim_with(5, 5, Policy::Decay, 3, &[(1, 2), (2, 2), (3, 2)]);
        assert!(!sim.step_once());
        sim.toggle_pause();
        assert!(sim.is_paused());
        assert!(!sim.tick());
        assert_eq!(sim.generation(), 0);
        assert!(sim.step_once());
        assert_eq!(sim.generation(), 1);
        sim.toggle_pause();
        assert!(sim.tick());
    }

    #[test]
    fn toggle_and_clear() {
        let mut sim = Simulation::new(3, 3, Policy::Decay, 6).unwrap();
        sim.toggle_cell(1, 1).unwrap();
        assert!(sim.grid().is_active(1, 1));
        sim.toggle_cell(1, 1).unwrap();
        assert_eq!(sim.grid().get(1, 1).unwrap(), 6);
        assert!(sim.toggle_cell(3, 0).is_err());
        sim.toggle_cell(0, 0).unwrap();
        sim.clear();
        assert_eq!(sim.population(), 0);
    }

    #[test]
    fn policy_parsing() {
        assert_eq!("Trail".parse::<Policy>().unwrap(), Policy::Trail);
        assert_eq!("afterglow".parse::<Policy>().unwrap(), Policy::Decay);
        assert!("sparkle".parse::<Policy>().is_err());
        assert_eq!(Policy::Decay.max_rank(100), 99);
        assert_eq!(Policy::Trail.max_rank(100), 1);
    }
}
