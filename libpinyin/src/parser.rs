// libpinyin/src/parser.rs
//
// Pinyin parser: binds the pinyin syllable tables to the core segmenter.
// - Exhaustive multi-candidate segmentation (every split, ranked)
// - Abbreviated initials ("bj") and incomplete syllables ("zhua") are kept
//   as lower-confidence units instead of failures
// - Unsegmentable trailing input is returned as one invalid unit

use std::sync::Arc;

use segmenter_core::{Config, Segment, Segmenter, SyllableIndex, SyllableParser, UnitKind};

use crate::syllables::default_index;

/// Pinyin segmentation parser.
///
/// Public entrypoints:
/// - `Parser::new` for the standard pinyin tables
/// - `Parser::with_tables` for another romanization
/// - `Parser::parse` / `Parser::parse_top_k` for ranked segmentations
///
/// # Example
/// ```
/// use libpinyin::{Parser, UnitKind};
///
/// let parser = Parser::new();
/// let best = &parser.parse("bj")[0];
/// assert_eq!(best.texts(), vec!["b", "j"]);
/// assert!(best.iter().all(|u| u.kind == UnitKind::Abbreviated));
/// ```
#[derive(Debug, Clone)]
pub struct Parser {
    segmenter: Segmenter,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// Parser over the standard pinyin tables with the default config.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Parser over the standard pinyin tables.
    pub fn with_config(config: Config) -> Self {
        Self::with_index(default_index(), config)
    }

    /// Parser over a custom syllable and abbreviation table.
    pub fn with_tables<S, A>(syllables: &[S], abbreviations: &[A]) -> Self
    where
        S: AsRef<str>,
        A: AsRef<str>,
    {
        let index = SyllableIndex::new(syllables, abbreviations);
        Self::with_index(Arc::new(index), Config::default())
    }

    pub fn with_index(index: Arc<SyllableIndex>, config: Config) -> Self {
        Self {
            segmenter: Segmenter::new(index, config),
        }
    }

    pub fn segmenter(&self) -> &Segmenter {
        &self.segmenter
    }

    pub fn config(&self) -> &Config {
        self.segmenter.config()
    }

    /// True if the parser knows `syllable` as a complete syllable.
    pub fn contains_syllable(&self, syllable: &str) -> bool {
        self.segmenter.index().contains(syllable)
    }

    pub fn classify(&self, text: &str) -> UnitKind {
        self.segmenter.classify(text)
    }

    /// Every segmentation of `input`, best first.
    pub fn parse(&self, input: &str) -> Vec<Segment> {
        self.segmenter.parse(input)
    }

    /// The `k` best segmentations of `input`.
    pub fn parse_top_k(&self, input: &str, k: usize) -> Vec<Segment> {
        self.segmenter.parse_top_k(input, k)
    }
}

impl SyllableParser for Parser {
    fn parse(&self, input: &str) -> Vec<Segment> {
        Parser::parse(self, input)
    }

    fn parse_top_k(&self, input: &str, k: usize) -> Vec<Segment> {
        Parser::parse_top_k(self, input, k)
    }
}
