//! Built-in gradient presets and their palette hotkeys

use crate::error::{LifeError, Result};
use crate::gradient::{Easing, Gradient, Rgb};
use crossterm::event::KeyCode;

/// Built-in gradient presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    #[default]
    Dusk,
    Ember,
    Ice,
    Matrix,
    Mono,
    Neon,
}

impl Preset {
    pub const ALL: [Preset; 6] = [
        Preset::Dusk,
        Preset::Ember,
        Preset::Ice,
        Preset::Matrix,
        Preset::Mono,
        Preset::Neon,
    ];

    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "dusk" => Ok(Preset::Dusk),
            "ember" | "fire" => Ok(Preset::Ember),
            "ice" => Ok(Preset::Ice),
            "matrix" | "green" => Ok(Preset::Matrix),
            "mono" => Ok(Preset::Mono),
            "neon" => Ok(Preset::Neon),
            _ => Err(LifeError::invalid(format!(
                "unknown preset {:?} (available: dusk, ember, ice, matrix, mono, neon)",
                name
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::Dusk => "dusk",
            Preset::Ember => "ember",
            Preset::Ice => "ice",
            Preset::Matrix => "matrix",
            Preset::Mono => "mono",
            Preset::Neon => "neon",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&p| p == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Gradient stops, rank 0 (alive) first
    pub fn stops(self) -> Vec<(f64, Rgb)> {
        match self {
            Preset::Dusk => vec![(0.0, Rgb::new(0xd4, 0x9d, 0x6a)), (1.0, Rgb::new(0x2f, 0x40, 0x73))],
            Preset::Ember => vec![
                (0.0, Rgb::new(255, 240, 180)),
                (0.15, Rgb::new(255, 170, 40)),
                (0.4, Rgb::new(200, 40, 20)),
                (1.0, Rgb::new(25, 8, 8)),
            ],
            Preset::Ice => vec![
                (0.0, Rgb::new(235, 250, 255)),
                (0.3, Rgb::new(80, 180, 230)),
                (1.0, Rgb::new(8, 16, 40)),
            ],
            Preset::Matrix => vec![
                (0.0, Rgb::new(200, 255, 200)),
                (0.2, Rgb::new(0, 200, 60)),
                (1.0, Rgb::new(0, 20, 5)),
            ],
            Preset::Mono => vec![(0.0, Rgb::new(240, 240, 240)), (1.0, Rgb::new(16, 16, 16))],
            Preset::Neon => vec![
                (0.0, Rgb::new(255, 255, 255)),
                (0.25, Rgb::new(255, 60, 220)),
                (0.6, Rgb::new(60, 40, 200)),
                (1.0, Rgb::new(10, 5, 30)),
            ],
        }
    }

    pub fn gradient(self, steps: usize) -> Result<Gradient> {
        match self {
            // Two-color ramp with square-root easing so the glow fades quickly
            Preset::Dusk => {
                let stops = self.stops();
                Gradient::two_color(stops[0].1, stops[1].1, steps, Easing::Sqrt)
            }
            _ => Gradient::build(&self.stops(), steps),
        }
    }

    /// Bright base color used by the trail renderer
    pub fn base(self) -> Rgb {
        self.stops()[0].1
    }
}

/// Map Shift+digit to a preset. Returns None for other keys.
pub fn preset_for_key(code: KeyCode) -> Option<Preset> {
    match code {
        KeyCode::Char('!') => Some(Preset::Dusk),    // Shift+1
        KeyCode::Char('@') => Some(Preset::Ember),   // Shift+2
        KeyCode::Char('#') => Some(Preset::Ice),     // Shift+3
        KeyCode::Char('$') => Some(Preset::Matrix),  // Shift+4
        KeyCode::Char('%') => Some(Preset::Mono),    // Shift+5
        KeyCode::Char('^') => Some(Preset::Neon),    // Shift+6
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_builds() {
        for preset in Preset::ALL {
            let g = preset.gradient(20).unwrap();
            assert_eq!(g.steps(), 20);
            assert_eq!(g.first(), preset.base());
        }
    }

    #[test]
    fn names_round_trip() {
        for preset in Preset::ALL {
            assert_eq!(Preset::from_name(preset.name()).unwrap(), preset);
        }
        assert!(Preset::from_name("plaid").is_err());
    }

    #[test]
    fn next_cycles() {
        let mut p = Preset::Dusk;
        for _ in 0..Preset::ALL.len() {
            p = p.next();
        }
        assert_eq!(p, Preset::Dusk);
    }

    #[test]
    fn shifted_digits_select_presets() {
        assert_eq!(preset_for_key(KeyCode::Char('#')), Some(Preset::Ice));
        assert_eq!(preset_for_key(KeyCode::Char('3')), None);
    }
}
