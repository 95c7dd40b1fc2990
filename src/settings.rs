use crate::error::{LifeError, Result};
use crate::gradient::Rgb;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub policy: Option<String>,
    pub tick_rate: Option<f32>,
    pub steps: Option<usize>,
    pub block_size: Option<usize>,
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub seed: Option<u64>,
    pub preset: Option<String>,
    pub base_color: Option<Rgb>,
    pub off_color: Option<Rgb>,
    pub glyph: Option<char>,
    #[serde(default)]
    pub gradient: Vec<StopSetting>,
    pub log_file: Option<PathBuf>,
}

/// A `[[gradient]]` table
#[derive(Debug, Clone, Deserialize)]
pub struct StopSetting {
    pub position: f64,
    pub color: Rgb,
}

impl Settings {
    /// Load from `path`, or from the default location when `None`.
    ///
    /// A missing default file yields defaults; an explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let p = Self::config_path();
                if !p.exists() {
                    return Ok(Self::default());
                }
                p
            }
        };

        let content = fs::read_to_string(&path)?;
        Self::parse(&content, &path)
    }

    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|source| LifeError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("afterglow")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_file() {
        let text = r##"
policy = "trail"
tick_rate = 15.0
steps = 40
glyph = "#"
base_color = "#ff8800"

[[gradient]]
position = 0.0
color = "#ffffff"

[[gradient]]
position = 1.0
color = "#000000"
"##;
        let s = Settings::parse(text, Path::new("test.toml")).unwrap();
        assert_eq!(s.policy.as_deref(), Some("trail"));
        assert_eq!(s.steps, Some(40));
        assert_eq!(s.glyph, Some('#'));
        assert_eq!(s.base_color, Some(Rgb::new(255, 136, 0)));
        assert_eq!(s.gradient.len(), 2);
        assert_eq!(s.gradient[1].color, Rgb::BLACK);
    }

    #[test]
    fn empty_file_is_default() {
        let s = Settings::parse("", Path::new("empty.toml")).unwrap();
        assert!(s.policy.is_none());
        assert!(s.gradient.is_empty());
    }

    #[test]
    fn bad_color_is_config_error() {
        let err = Settings::parse("base_color = \"orange\"", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, LifeError::Config { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(Settings::parse("speed = 3", Path::new("x.toml")).is_err());
    }

    #[test]
    fn missing_explicit_path_is_io_error() {
        let err = Settings::load(Some(Path::new("/nonexistent/afterglow.toml"))).unwrap_err();
        assert!(matches!(err, LifeError::Io(_)));
    }
}
