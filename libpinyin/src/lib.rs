//! libpinyin crate root
//!
//! This crate provides the pinyin syllable tables, a pinyin `Parser` and a
//! caching `Engine`, all built on the segmentation in `segmenter-core`.
//!
//! Public API exported here:
//! - `Parser` from `parser`
//! - `Engine` from `engine`
//! - `PinyinConfig` from `config`
//! - `PINYIN_SYLLABLES`, `PINYIN_ABBREVIATIONS`, `default_index` from `syllables`

pub mod config;
pub mod engine;
pub mod parser;
pub mod syllables;

// Re-export the core data model so callers need only this crate.
pub use segmenter_core::{Config, Segment, SyllableIndex, Unit, UnitKind};

// Convenience re-exports for common types used by callers.
pub use config::{load_syllables, PinyinConfig};
pub use engine::Engine;
pub use parser::Parser;
pub use syllables::{default_index, PINYIN_ABBREVIATIONS, PINYIN_SYLLABLES};
