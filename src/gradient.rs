//! Multi-stop color gradients
//!
//! A gradient is sampled once at construction into a fixed table of
//! discrete colors, indexed by integer rank.

use crate::error::{LifeError, Result};
use crossterm::style::Color;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear interpolation towards `other`, `t` clamped to [0, 1]
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    /// Scale every channel by `f`, clamped to [0, 1]
    pub fn scale(self, f: f32) -> Rgb {
        let f = f.clamp(0.0, 1.0);
        let ch = |c: u8| (c as f32 * f).round() as u8;
        Rgb::new(ch(self.r), ch(self.g), ch(self.b))
    }
}

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::Rgb { r: c.r, g: c.g, b: c.b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = LifeError;

    /// Parses `#rrggbb` or `rrggbb`
    fn from_str(s: &str) -> Result<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(LifeError::invalid(format!("bad color {:?}, expected #rrggbb", s)));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| LifeError::invalid(format!("bad color {:?}", s)))
        };
        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Easing applied to the sample position of a two-color gradient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    Sqrt,
}

impl Easing {
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Easing::Linear => x,
            Easing::Sqrt => x.sqrt(),
        }
    }
}

/// Precomputed color ramp indexed by rank `0..steps`
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    colors: Vec<Rgb>,
}

impl Gradient {
    /// Build a gradient from `(position, color)` stops.
    ///
    /// Requires at least two stops, one at exactly `0.0` and one at exactly
    /// `1.0`, every position inside `[0, 1]`, and `steps >= 2`.
    pub fn build(stops: &[(f64, Rgb)], steps: usize) -> Result<Self> {
        if stops.len() < 2 {
            return Err(LifeError::invalid("gradient needs at least two stops"));
        }
        if let Some(&(pos, _)) = stops.iter().find(|(p, _)| !(0.0..=1.0).contains(p)) {
            return Err(LifeError::invalid(format!("gradient stop {} outside [0, 1]", pos)));
        }
        if !stops.iter().any(|&(p, _)| p == 0.0) || !stops.iter().any(|&(p, _)| p == 1.0) {
            return Err(LifeError::invalid("gradient needs stops at 0 and 1"));
        }
        if steps < 2 {
            return Err(LifeError::invalid(format!("gradient needs at least 2 steps, got {}", steps)));
        }

        let mut sorted = stops.to_vec();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

        let last_pair = sorted.len() - 2;
        let mut cur = 0;
        let colors = (0..steps)
            .map(|i| {
                let val = i as f64 / (steps - 1) as f64;
                while cur < last_pair && val >= sorted[cur + 1].0 {
                    cur += 1;
                }
                let (cur_val, cur_color) = sorted[cur];
                let (next_val, next_color) = sorted[cur + 1];
                let span = next_val - cur_val;
                let t = if span > 0.0 { (val - cur_val) / span } else { 0.0 };
                cur_color.lerp(next_color, t)
            })
            .collect();

        Ok(Self { colors })
    }

    /// Two-color ramp from `primary` (rank 0) to `secondary` (last rank)
    pub fn two_color(primary: Rgb, secondary: Rgb, steps: usize, ease: Easing) -> Result<Self> {
        if steps < 2 {
            return Err(LifeError::invalid(format!("gradient needs at least 2 steps, got {}", steps)));
        }
        let colors = (0..steps)
            .map(|i| primary.lerp(secondary, ease.apply(i as f64 / (steps - 1) as f64)))
            .collect();
        Ok(Self { colors })
    }

    pub fn get(&self, rank: usize) -> Result<Rgb> {
        self.colors.get(rank).copied().ok_or(LifeError::OutOfRange {
            index: rank,
            len: self.colors.len(),
        })
    }

    #[cfg(test)]
    pub fn steps(&self) -> usize {
        self.colors.len()
    }

    pub fn first(&self) -> Rgb {
        self.colors[0]
    }

    pub fn last(&self) -> Rgb {
        self.colors[self.colors.len() - 1]
    }
}
