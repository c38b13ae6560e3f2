//! Pinyin segmentation engine
//!
//! Provides a high-level Engine that combines the pinyin parser with a result
//! cache behind a simple `input(text) -> segments` API.
//!
//! This is a thin wrapper around the generic core::Engine<Parser>.

use std::sync::Arc;

use segmenter_core::Segment;

use crate::config::PinyinConfig;
use crate::parser::Parser;

/// Public engine for libpinyin.
///
/// The inner engine is wrapped in Arc to allow cheap cloning for sharing
/// across threads; all clones share one cache.
#[derive(Clone)]
pub struct Engine {
    inner: Arc<segmenter_core::Engine<Parser>>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Parser::new())
    }
}

impl Engine {
    /// Construct an Engine around `parser`, sized by the parser's config.
    pub fn new(parser: Parser) -> Self {
        let capacity = parser.config().max_cache_size;
        Self {
            inner: Arc::new(segmenter_core::Engine::new(parser, capacity)),
        }
    }

    /// Construct an Engine from a pinyin configuration.
    ///
    /// Fails only when the configured syllable table cannot be read.
    pub fn from_config(config: PinyinConfig) -> anyhow::Result<Self> {
        let index = config.build_index()?;
        Ok(Self::new(Parser::with_index(index, config.into_base())))
    }

    /// Get a cloned Arc to the inner core engine.
    pub fn inner_arc(&self) -> Arc<segmenter_core::Engine<Parser>> {
        Arc::clone(&self.inner)
    }

    pub fn parser(&self) -> &Parser {
        self.inner.parser()
    }

    /// Main input API. Returns every segmentation of `input`, best first.
    pub fn input(&self, input: &str) -> Arc<Vec<Segment>> {
        self.inner.input(input)
    }

    /// The `k` best segmentations of `input`.
    pub fn input_top_k(&self, input: &str, k: usize) -> Vec<Segment> {
        self.inner.input_top_k(input, k)
    }

    /// Get cache statistics (hits, misses)
    pub fn cache_stats(&self) -> (usize, usize) {
        self.inner.cache_stats()
    }

    pub fn cache_hit_rate(&self) -> Option<f32> {
        self.inner.cache_hit_rate()
    }

    pub fn cache_size(&self) -> usize {
        self.inner.cache_size()
    }

    pub fn cache_capacity(&self) -> usize {
        self.inner.cache_capacity()
    }

    /// Clear the cache
    pub fn clear_cache(&self) {
        self.inner.clear_cache();
    }
}
