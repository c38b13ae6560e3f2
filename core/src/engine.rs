// core/src/engine.rs
//
// Caching front end that works with any segmentation parser.
// Language crates wrap it with their own tables (see libpinyin's `Engine`).

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lru::LruCache;

use crate::{Segment, Segmenter};

/// Trait that parsers must implement to work with the generic Engine.
pub trait SyllableParser: Send + Sync {
    /// Every segmentation of `input`, best first.
    fn parse(&self, input: &str) -> Vec<Segment>;

    /// The `k` best segmentations of `input`; must equal the first `k` of
    /// `parse`. Parsers that can prune while enumerating override this.
    fn parse_top_k(&self, input: &str, k: usize) -> Vec<Segment> {
        let mut segments = self.parse(input);
        segments.truncate(k);
        segments
    }
}

impl SyllableParser for Segmenter {
    fn parse(&self, input: &str) -> Vec<Segment> {
        Segmenter::parse(self, input)
    }

    fn parse_top_k(&self, input: &str, k: usize) -> Vec<Segment> {
        Segmenter::parse_top_k(self, input, k)
    }
}

/// Engine that memoises parser output per raw input string.
///
/// Typing re-parses the same prefixes over and over (`x`, `xi`, `xia`, ...),
/// so results are kept in an LRU cache. Cached results are shared and
/// identical to what the parser returns.
///
/// The engine is `Sync`; the cache sits behind a mutex.
pub struct Engine<P> {
    parser: P,
    cache: Mutex<LruCache<String, Arc<Vec<Segment>>>>,
    cache_hits: AtomicUsize,
    cache_misses: AtomicUsize,
}

impl<P: SyllableParser> Engine<P> {
    /// Create a new engine. A capacity of zero is treated as one.
    pub fn new(parser: P, cache_capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(cache_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            parser,
            cache: Mutex::new(LruCache::new(capacity)),
            cache_hits: AtomicUsize::new(0),
            cache_misses: AtomicUsize::new(0),
        }
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    /// Segment `input`, serving repeated inputs from the cache.
    pub fn input(&self, input: &str) -> Arc<Vec<Segment>> {
        if let Some(cached) = self.lock_cache().get(input) {
            self.cache_hits.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(input, "segment cache hit");
            return Arc::clone(cached);
        }

        self.cache_misses.fetch_add(1, Ordering::Relaxed);
        let segments = Arc::new(self.parser.parse(input));
        self.lock_cache()
            .put(input.to_string(), Arc::clone(&segments));
        segments
    }

    /// The `k` best segmentations of `input`.
    ///
    /// A cached full result is reused; otherwise the parser's top-k path
    /// runs and its truncated result is not cached.
    pub fn input_top_k(&self, input: &str, k: usize) -> Vec<Segment> {
        if let Some(cached) = self.lock_cache().get(input) {
            self.cache_hits.fetch_add(1, Ordering::Relaxed);
            return cached.iter().take(k).cloned().collect();
        }

        self.cache_misses.fetch_add(1, Ordering::Relaxed);
        self.parser.parse_top_k(input, k)
    }

    /// Get cache statistics for monitoring.
    ///
    /// Returns (hits, misses) tuple.
    pub fn cache_stats(&self) -> (usize, usize) {
        (
            self.cache_hits.load(Ordering::Relaxed),
            self.cache_misses.load(Ordering::Relaxed),
        )
    }

    /// Get cache hit rate as a percentage (0.0 to 100.0).
    ///
    /// Returns None if no cache accesses have been made yet.
    pub fn cache_hit_rate(&self) -> Option<f32> {
        let (hits, misses) = self.cache_stats();
        let total = hits + misses;
        if total == 0 {
            None
        } else {
            Some((hits as f32 / total as f32) * 100.0)
        }
    }

    /// Get current cache size (number of entries).
    pub fn cache_size(&self) -> usize {
        self.lock_cache().len()
    }

    /// Get cache capacity (maximum entries).
    pub fn cache_capacity(&self) -> usize {
        self.lock_cache().cap().get()
    }

    /// Drop all cached results and reset the statistics.
    pub fn clear_cache(&self) {
        self.lock_cache().clear();
        self.cache_hits.store(0, Ordering::Relaxed);
        self.cache_misses.store(0, Ordering::Relaxed);
    }

    fn lock_cache(&self) -> MutexGuard<'_, LruCache<String, Arc<Vec<Segment>>>> {
        // cached values are immutable, a poisoned lock still holds valid data
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
