//! Pinyin-specific configuration that extends the base `Config` from core.
//!
//! This configuration includes:
//! - All generic options from `segmenter_core::Config` (flattened via serde)
//! - An optional replacement syllable table
//! - The set of initials accepted as abbreviations
//!
//! # Example
//!
//! ```rust
//! use libpinyin::PinyinConfig;
//!
//! let config = PinyinConfig::from_toml_str("abbreviations = [\"zh\", \"ch\", \"sh\"]").unwrap();
//! assert_eq!(config.base.separator, '\'');
//! assert_eq!(config.abbreviations.len(), 3);
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use segmenter_core::SyllableIndex;

use crate::syllables::{default_index, PINYIN_ABBREVIATIONS, PINYIN_SYLLABLES};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PinyinConfig {
    /// Base configuration fields (separator, input cap, cache size)
    #[serde(flatten)]
    pub base: segmenter_core::Config,

    /// File with one syllable per line, replacing the built-in table
    pub syllable_table: Option<PathBuf>,

    /// Initials accepted on their own (e.g. "b" for "bei")
    pub abbreviations: Vec<String>,
}

impl Default for PinyinConfig {
    fn default() -> Self {
        Self {
            base: segmenter_core::Config::default(),
            syllable_table: None,
            abbreviations: PINYIN_ABBREVIATIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl PinyinConfig {
    /// Convert this pinyin config into the base config
    pub fn into_base(self) -> segmenter_core::Config {
        self.base
    }

    /// Get a reference to the base config
    pub fn base(&self) -> &segmenter_core::Config {
        &self.base
    }

    /// Get a mutable reference to the base config
    pub fn base_mut(&mut self) -> &mut segmenter_core::Config {
        &mut self.base
    }

    pub fn load_toml<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Build the syllable index this config describes.
    ///
    /// The shared default index is reused when neither the table nor the
    /// abbreviations were changed.
    pub fn build_index(&self) -> anyhow::Result<Arc<SyllableIndex>> {
        let default_abbreviations = self
            .abbreviations
            .iter()
            .map(String::as_str)
            .eq(PINYIN_ABBREVIATIONS.iter().copied());

        match &self.syllable_table {
            None if default_abbreviations => Ok(default_index()),
            None => Ok(Arc::new(SyllableIndex::new(
                PINYIN_SYLLABLES,
                &self.abbreviations,
            ))),
            Some(path) => {
                let syllables = load_syllables(path)?;
                tracing::debug!(
                    path = %path.display(),
                    count = syllables.len(),
                    "loaded syllable table"
                );
                Ok(Arc::new(SyllableIndex::new(&syllables, &self.abbreviations)))
            }
        }
    }
}

/// Read a syllable table: one syllable per line, blank lines and `#`
/// comments skipped.
pub fn load_syllables<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<String>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading syllable table {}", path.display()))?;
    let syllables: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();
    anyhow::ensure!(
        !syllables.is_empty(),
        "syllable table {} has no entries",
        path.display()
    );
    Ok(syllables)
}
