use crate::colors::Preset;
use crate::controls::FOOTER_HEIGHT;
use crate::error::{LifeError, Result};
use crate::gradient::{Gradient, Rgb};
use crate::grid::GridSize;
use crate::render::Palette;
use crate::settings::Settings;
use crate::sim::Policy;
use std::path::PathBuf;

pub const DEFAULT_TICK_RATE: f32 = 10.0;
pub const DEFAULT_STEPS: usize = 100;
pub const DEFAULT_BLOCK: usize = 2;
pub const DEFAULT_GLYPH: char = '█';

/// Slowest and fastest tick rates reachable with +/-
pub const MIN_TICK_RATE: f32 = 1.0;
pub const MAX_TICK_RATE: f32 = 120.0;

/// Values given on the command line; these win over the settings file
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub policy: Option<String>,
    pub tick_rate: Option<f32>,
    pub steps: Option<usize>,
    pub block_size: Option<usize>,
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub seed: Option<u64>,
    pub preset: Option<String>,
    pub glyph: Option<char>,
    pub log_file: Option<PathBuf>,
}

/// Fully resolved configuration
#[derive(Debug, Clone)]
pub struct LifeConfig {
    pub policy: Policy,
    pub tick_rate: f32,
    pub steps: usize,
    pub block_size: usize,
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub seed: Option<u64>,
    pub preset: Preset,
    pub stops: Vec<(f64, Rgb)>,
    pub base_color: Option<Rgb>,
    pub off_color: Option<Rgb>,
    pub glyph: char,
    pub log_file: Option<PathBuf>,
}

impl LifeConfig {
    pub fn resolve(settings: Settings, cli: Overrides) -> Result<Self> {
        let policy = match cli.policy.or(settings.policy) {
            Some(name) => name.parse::<Policy>()?,
            None => Policy::default(),
        };
        let preset = match cli.preset.or(settings.preset) {
            Some(name) => Preset::from_name(&name)?,
            None => Preset::default(),
        };

        let tick_rate = cli.tick_rate.or(settings.tick_rate).unwrap_or(DEFAULT_TICK_RATE);
        if !(MIN_TICK_RATE..=MAX_TICK_RATE).contains(&tick_rate) {
            return Err(LifeError::invalid(format!(
                "tick rate must be within {}..={}, got {}",
                MIN_TICK_RATE, MAX_TICK_RATE, tick_rate
            )));
        }

        let block_size = cli.block_size.or(settings.block_size).unwrap_or(DEFAULT_BLOCK);
        if block_size < 2 || block_size % 2 != 0 {
            return Err(LifeError::invalid(format!(
                "block size must be an even number >= 2, got {}",
                block_size
            )));
        }

        let config = Self {
            policy,
            tick_rate,
            steps: cli.steps.or(settings.steps).unwrap_or(DEFAULT_STEPS),
            block_size,
            width: cli.width.or(settings.width),
            height: cli.height.or(settings.height),
            seed: cli.seed.or(settings.seed),
            preset,
            stops: settings.gradient.into_iter().map(|s| (s.position, s.color)).collect(),
            base_color: settings.base_color,
            off_color: settings.off_color,
            glyph: cli.glyph.or(settings.glyph).unwrap_or(DEFAULT_GLYPH),
            log_file: cli.log_file.or(settings.log_file),
        };

        // Fail at startup rather than on first draw
        config.palette(None)?;
        Ok(config)
    }

    /// Build the palette; `preset` replaces custom stops when given
    pub fn palette(&self, preset: Option<Preset>) -> Result<Palette> {
        let (gradient, base) = match preset {
            None if !self.stops.is_empty() => {
                let gradient = Gradient::build(&self.stops, self.steps)?;
                let base = self.base_color.unwrap_or(gradient.first());
                (gradient, base)
            }
            None => (self.preset.gradient(self.steps)?, self.base_color.unwrap_or(self.preset.base())),
            Some(p) => (p.gradient(self.steps)?, p.base()),
        };
        Ok(Palette::new(gradient, Some(base), self.off_color))
    }

    /// Grid size for a terminal of `cols` x `rows` characters.
    ///
    /// A column is one pixel wide and a row two pixels tall.
    pub fn grid_size(&self, cols: u16, rows: u16) -> Result<GridSize> {
        let width = self.width.unwrap_or(cols as usize);
        let height = self
            .height
            .unwrap_or(rows.saturating_sub(FOOTER_HEIGHT) as usize * 2);
        GridSize::from_pixels(width, height, self.block_size)
    }

    pub fn max_rank(&self) -> u16 {
        self.policy.max_rank(self.steps)
    }
}
