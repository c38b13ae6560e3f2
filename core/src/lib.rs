//! segmenter-core
//!
//! Language-agnostic building blocks shared by phonetic input engines
//! (currently `pinyin-segmenter`).
//!
//! Public API:
//! - `SyllableIndex` - Immutable sorted lookup over a fixed syllable table
//! - `Unit`, `UnitKind`, `Segment` - Classified pieces of an input string
//! - `Segmenter` - Enumerates and ranks every segmentation of an input
//! - `Engine` - Caching front end over any `SyllableParser`
//! - `Config` - Configuration shared by all language crates
use serde::{Deserialize, Serialize};
use std::path::Path;

use anyhow::Context;

pub mod index;
pub use index::{successor, SearchPosition, SyllableIndex};

pub mod unit;
pub use unit::{Segment, Unit, UnitKind};

pub mod segmenter;
pub use segmenter::Segmenter;

pub mod engine;
pub use engine::{Engine, SyllableParser};

/// Default manual separator typed by users to force a syllable boundary
/// (e.g. `xi'an` versus `xian`).
pub const DEFAULT_SEPARATOR: char = '\'';

/// Generic configuration for segmentation.
///
/// This config contains only language-agnostic fields. Language-specific
/// options belong in the language crate (see `PinyinConfig`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Character that marks an explicit unit boundary in raw input.
    pub separator: char,

    /// Upper bound on the number of characters that are segmented.
    /// Anything past it is reported as a single trailing invalid unit.
    /// `None` segments the whole input.
    pub max_input_length: Option<usize>,

    /// Override for the longest unit the segmenter tries.
    /// `None` derives it from the longest entry of the syllable index.
    pub max_unit_length: Option<usize>,

    /// Maximum number of entries in the input -> segments cache
    pub max_cache_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            max_input_length: None,
            max_unit_length: None,
            // 1000 entries covers a typing session comfortably
            max_cache_size: 1000,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let content = self.to_toml_string()?;
        std::fs::write(path, content)
            .with_context(|| format!("writing config {}", path.display()))?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_apostrophe() {
        let cfg = Config::default();
        assert_eq!(cfg.separator, '\'');
        assert_eq!(cfg.max_input_length, None);
        assert_eq!(cfg.max_unit_length, None);
        assert_eq!(cfg.max_cache_size, 1000);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = Config::from_toml_str("max_input_length = 32\n").unwrap();
        assert_eq!(cfg.max_input_length, Some(32));
        assert_eq!(cfg.separator, DEFAULT_SEPARATOR);
    }

    #[test]
    fn toml_string_roundtrip() {
        let cfg = Config {
            separator: '-',
            max_input_length: Some(48),
            max_unit_length: Some(4),
            max_cache_size: 16,
        };
        let text = cfg.to_toml_string().unwrap();
        assert_eq!(Config::from_toml_str(&text).unwrap(), cfg);
    }

    #[test]
    fn config_file_save_and_load() {
        let path = std::env::temp_dir().join(format!(
            "segmenter_core_config_{}.toml",
            std::process::id()
        ));
        let cfg = Config {
            max_input_length: Some(20),
            ..Config::default()
        };
        cfg.save_toml(&path).unwrap();
        let loaded = Config::load_toml(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let err = Config::load_toml("/nonexistent/segmenter.toml").unwrap_err();
        assert!(err.to_string().contains("reading config"));
    }
}
