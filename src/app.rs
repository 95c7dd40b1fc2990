//! Interactive loop and headless print mode

use crate::colors::{preset_for_key, Preset};
use crate::config::{LifeConfig, MAX_TICK_RATE, MIN_TICK_RATE};
use crate::controls::{Command, Footer};
use crate::error::{LifeError, Result};
use crate::help::{render_help_overlay, HELP_TEXT};
use crate::render::{self, Palette};
use crate::sim::Simulation;
use crate::terminal::Terminal;
use crossterm::event::{Event, KeyEventKind, MouseButton, MouseEventKind};
use rand::prelude::*;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Multiplier applied by the faster/slower commands
const RATE_FACTOR: f32 = 1.5;

/// What the loop should do after an event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Flow {
    Continue,
    Redraw,
    Resize(u16, u16),
    Quit,
}

/// Simulation context plus everything the loop needs to drive it
pub struct App {
    config: LifeConfig,
    sim: Simulation,
    palette: Palette,
    preset: Option<Preset>,
    footer: Footer,
    rng: StdRng,
    tick_rate: f32,
    show_help: bool,
}

fn seed_rng(seed: Option<u64>) -> StdRng {
    let seed = seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    });
    debug!(seed, "rng seeded");
    StdRng::seed_from_u64(seed)
}

impl App {
    /// Build a randomized simulation sized for a `term_w` x `term_h` terminal
    pub fn new(config: LifeConfig, term_w: u16, term_h: u16) -> Result<Self> {
        let size = config.grid_size(term_w, term_h)?;
        let mut sim = Simulation::new(size.cols, size.rows, config.policy, config.max_rank())?;
        let mut rng = seed_rng(config.seed);
        sim.randomize(&mut rng);
        info!(cols = size.cols, rows = size.rows, policy = %config.policy, "simulation created");

        Ok(Self {
            palette: config.palette(None)?,
            tick_rate: config.tick_rate,
            sim,
            preset: None,
            footer: Footer::new(term_h),
            rng,
            show_help: false,
            config,
        })
    }

    #[cfg(test)]
    pub fn sim(&self) -> &Simulation {
        &self.sim
    }

    #[cfg(test)]
    pub fn tick_rate(&self) -> f32 {
        self.tick_rate
    }

    fn tick_interval(&self) -> Duration {
        Duration::from_secs_f32(1.0 / self.tick_rate)
    }

    fn palette_name(&self) -> &'static str {
        match self.preset {
            Some(p) => p.name(),
            None if !self.config.stops.is_empty() => "custom",
            None => self.config.preset.name(),
        }
    }

    fn status(&self) -> String {
        format!(
            "gen {}  pop {}  {:.0}/s  {}  {}  ? help",
            self.sim.generation(),
            self.sim.population(),
            self.tick_rate,
            self.sim.policy(),
            self.palette_name(),
        )
    }

    fn set_preset(&mut self, preset: Preset) -> Result<()> {
        self.palette = self.config.palette(Some(preset))?;
        self.preset = Some(preset);
        debug!(preset = preset.name(), "palette changed");
        Ok(())
    }

    /// Apply a command to the context
    pub fn dispatch(&mut self, command: Command) -> Result<Flow> {
        if command.apply(&mut self.sim, &mut self.rng) {
            return Ok(Flow::Redraw);
        }
        match command {
            Command::Faster => {
                self.tick_rate = (self.tick_rate * RATE_FACTOR).min(MAX_TICK_RATE);
                debug!(rate = self.tick_rate, "tick rate changed");
            }
            Command::Slower => {
                self.tick_rate = (self.tick_rate / RATE_FACTOR).max(MIN_TICK_RATE);
                debug!(rate = self.tick_rate, "tick rate changed");
            }
            Command::NextPalette => {
                let current = self.preset.unwrap_or(self.config.preset);
                self.set_preset(current.next())?;
            }
            Command::Help => self.show_help = !self.show_help,
            Command::Quit => return Ok(Flow::Quit),
            _ => return Ok(Flow::Continue),
        }
        Ok(Flow::Redraw)
    }

    pub fn handle_event(&mut self, event: Event) -> Result<Flow> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if let Some(preset) = preset_for_key(key.code) {
                    self.set_preset(preset)?;
                    return Ok(Flow::Redraw);
                }
                match Command::from_key(key.code) {
                    Some(command) => self.dispatch(command),
                    None => Ok(Flow::Continue),
                }
            }
            Event::Mouse(mouse) => {
                if let Some(command) = self.footer.handle_mouse(&mouse) {
                    return self.dispatch(command);
                }
                if mouse.kind == MouseEventKind::Down(MouseButton::Left) && mouse.row < self.footer.row() {
                    if let Some((x, y)) = render::cell_at(&self.sim, self.config.block_size, mouse.column, mouse.row) {
                        self.sim.toggle_cell(x, y)?;
                    }
                }
                // Hover state may have changed either way
                Ok(Flow::Redraw)
            }
            Event::Resize(w, h) => Ok(Flow::Resize(w, h)),
            _ => Ok(Flow::Continue),
        }
    }

    pub fn draw(&self, term: &mut Terminal) -> Result<()> {
        term.clear();
        render::draw_grid(term, &self.sim, &self.palette, self.config.block_size, self.config.glyph)?;
        self.footer.draw(term, &self.sim, &self.status());
        if self.show_help {
            render_help_overlay(term, HELP_TEXT);
        }
        term.present()?;
        Ok(())
    }

    /// Fixed-rate step-then-render loop; render only while paused
    pub fn run(&mut self, term: &mut Terminal) -> Result<()> {
        term.clear_screen()?;
        let mut next_tick = Instant::now();

        loop {
            let now = Instant::now();
            if now >= next_tick {
                self.sim.tick();
                self.draw(term)?;
                next_tick = now + self.tick_interval();
            }

            let timeout = next_tick.saturating_duration_since(Instant::now());
            let Some(event) = term.poll_event(timeout)? else {
                continue;
            };
            match self.handle_event(event)? {
                Flow::Continue => {}
                Flow::Redraw => self.draw(term)?,
                Flow::Resize(w, h) => {
                    // The grid keeps its size; only the view is clipped
                    term.resize(w, h);
                    term.clear_screen()?;
                    self.footer = Footer::new(h);
                    self.draw(term)?;
                }
                Flow::Quit => break,
            }
        }

        info!(generation = self.sim.generation(), "quit");
        Ok(())
    }
}

/// Run the interactive visualizer
pub fn run(config: LifeConfig) -> Result<()> {
    let mut term = Terminal::new()?;
    let (w, h) = term.size();
    let mut app = App::new(config, w, h)?;
    app.run(&mut term)
}

/// Run `generations` steps on a `cols` x `rows` grid and print the last frame
pub fn print(config: LifeConfig, generations: u64, cols: usize, rows: usize) -> Result<()> {
    let mut sim = Simulation::new(cols, rows, config.policy, config.max_rank())?;
    let mut rng = seed_rng(config.seed);
    sim.randomize(&mut rng);
    for _ in 0..generations {
        sim.step();
    }
    info!(generations, population = sim.population(), "print mode finished");

    let palette = config.palette(None)?;
    let (w, h) = render::cell_extent(config.block_size);
    let extent = |cells: usize, per_cell: usize| {
        cells
            .checked_mul(per_cell)
            .and_then(|n| u16::try_from(n).ok())
            .ok_or_else(|| LifeError::invalid(format!("{} cells do not fit a printed frame", cells)))
    };
    let width = extent(cols, w)?;
    let height = extent(rows, h)?;
    let mut term = Terminal::headless(width, height);
    render::draw_grid(&mut term, &sim, &palette, config.block_size, config.glyph)?;
    term.print_to_stdout();
    Ok(())
}
