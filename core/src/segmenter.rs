// core/src/segmenter.rs
//
// Multi-candidate segmentation over a `SyllableIndex`.
//
// Every way of splitting the input into recognised units is enumerated, not
// just the best one. Units may be complete syllables, consonant
// abbreviations or incomplete prefixes of a syllable. Input that cannot be
// segmented is never dropped: the longest segmentable prefix is used and the
// rest is kept as one trailing invalid unit.

use std::sync::Arc;

use crate::{Config, Segment, SyllableIndex, Unit, UnitKind};

/// Segmentation engine bound to one syllable index.
///
/// The segmenter holds no mutable state; a single instance can serve
/// concurrent callers.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use segmenter_core::{Config, Segmenter, SyllableIndex};
///
/// let index = SyllableIndex::new(&["xi", "xian", "xia", "an", "a"], &["x", "n"]);
/// let segmenter = Segmenter::new(Arc::new(index), Config::default());
///
/// let segments = segmenter.parse("xian");
/// assert_eq!(segments[0].texts(), vec!["xian"]);
/// assert_eq!(segments[1].texts(), vec!["xi", "an"]);
/// ```
#[derive(Debug, Clone)]
pub struct Segmenter {
    index: Arc<SyllableIndex>,
    config: Config,
}

impl Segmenter {
    pub fn new(index: Arc<SyllableIndex>, config: Config) -> Self {
        Self { index, config }
    }

    pub fn index(&self) -> &Arc<SyllableIndex> {
        &self.index
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Longest unit that will be tried, in characters.
    pub fn max_unit_length(&self) -> usize {
        self.config
            .max_unit_length
            .unwrap_or_else(|| self.index.max_key_len())
    }

    /// Classify a single piece of input.
    ///
    /// Abbreviations win over syllables, syllables over prefixes. Text
    /// containing the separator is never recognised.
    pub fn classify(&self, text: &str) -> UnitKind {
        if text.is_empty() || text.contains(self.config.separator) {
            UnitKind::Invalid
        } else if self.index.is_abbreviation(text) {
            UnitKind::Abbreviated
        } else if self.index.contains(text) {
            UnitKind::Complete
        } else if self.index.has_extension(text) {
            UnitKind::Incomplete
        } else {
            UnitKind::Invalid
        }
    }

    /// Return every segmentation of `input`, best first.
    ///
    /// Leading and trailing separators are ignored. An empty input yields no
    /// segments; any other input yields at least one. When no segmentation
    /// covers the whole input, the longest prefix that can be segmented is
    /// used and the remaining text is appended to each segment as a single
    /// `Invalid` unit.
    pub fn parse(&self, input: &str) -> Vec<Segment> {
        self.parse_limited(input, None)
    }

    /// The `k` best segmentations of `input`, the same as the first `k` of
    /// `parse`.
    ///
    /// Worse candidates are dropped at every position while enumerating, so
    /// long ambiguous inputs stay cheap for small `k`.
    pub fn parse_top_k(&self, input: &str, k: usize) -> Vec<Segment> {
        self.parse_limited(input, Some(k))
    }

    fn parse_limited(&self, input: &str, k: Option<usize>) -> Vec<Segment> {
        let input = input.trim_matches(self.config.separator);
        if input.is_empty() || k == Some(0) {
            return Vec::new();
        }

        let chars = CharTable::new(input, self.config.separator);
        let total = chars.len();
        let limit = match self.config.max_input_length {
            Some(max) if max < total => {
                tracing::debug!(total, max, "input longer than max_input_length");
                max
            }
            _ => total,
        };

        let Some(prefix) = self.longest_prefix(&chars, limit) else {
            tracing::debug!(input, "no segmentable prefix");
            return vec![Segment::new(vec![Unit::new(input, UnitKind::Invalid)])];
        };

        let mut segments = self.try_parse(&chars, prefix, k);
        if prefix < total {
            let tail = chars.slice(prefix, total);
            tracing::debug!(input, tail, "keeping unsegmentable tail as invalid");
            for segment in segments.iter_mut() {
                segment.push(Unit::new(tail, UnitKind::Invalid));
            }
        }
        segments
    }

    /// Length of the longest prefix of the first `limit` characters that can
    /// be segmented, separators following its last unit included.
    fn longest_prefix(&self, chars: &CharTable<'_>, limit: usize) -> Option<usize> {
        let max_unit = self.max_unit_length();
        // reachable[p]: some chain of units from the start leads to p
        let mut reachable = vec![false; limit + 1];
        reachable[0] = true;
        let mut best_end = None;

        for pos in 0..limit {
            if !reachable[pos] || chars.is_separator(pos) {
                continue;
            }
            for len in 1..=max_unit.min(limit - pos) {
                let cut = pos + len;
                if !self.classify(chars.slice(pos, cut)).is_recognized() {
                    continue;
                }
                best_end = best_end.max(Some(cut));
                let next = chars.skip_separators(cut, limit);
                if next < limit {
                    reachable[next] = true;
                }
            }
        }

        best_end.map(|end| chars.skip_separators(end, limit))
    }

    /// Every segmentation of exactly the first `end` characters that uses
    /// recognised units only, sorted by `Segment::rank_key`. With `k` set
    /// only the `k` best are kept.
    ///
    /// Suffixes are solved right to left so each suffix is enumerated once
    /// no matter how many prefixes lead to it. Rank keys add up unit by
    /// unit, so keeping the `k` best per suffix loses nothing from the `k`
    /// best overall.
    fn try_parse(&self, chars: &CharTable<'_>, end: usize, k: Option<usize>) -> Vec<Segment> {
        let mut end = end;
        while end > 0 && chars.is_separator(end - 1) {
            end -= 1;
        }
        if end == 0 {
            return Vec::new();
        }

        // next_start[p]: first non-separator position at or after p
        let mut next_start = vec![end; end + 1];
        for pos in (0..end).rev() {
            next_start[pos] = if chars.is_separator(pos) {
                next_start[pos + 1]
            } else {
                pos
            };
        }

        let max_unit = self.max_unit_length();
        let mut table: Vec<Vec<Segment>> = vec![Vec::new(); end + 1];

        for pos in (0..end).rev() {
            if chars.is_separator(pos) {
                continue;
            }
            let mut found: Vec<Segment> = Vec::new();
            for len in (1..=max_unit.min(end - pos)).rev() {
                let cut = pos + len;
                let key = chars.slice(pos, cut);
                let kind = self.classify(key);
                if !kind.is_recognized() {
                    continue;
                }
                let unit = Unit::new(key, kind);
                if cut == end {
                    found.push(Segment::new(vec![unit]));
                    continue;
                }
                for rest in &table[next_start[cut]] {
                    let mut units = Vec::with_capacity(rest.len() + 1);
                    units.push(unit.clone());
                    units.extend(rest.iter().cloned());
                    found.push(Segment::new(units));
                }
            }
            found.sort_by_key(Segment::rank_key);
            if let Some(k) = k {
                found.truncate(k);
            }
            table[pos] = found;
        }

        std::mem::take(&mut table[next_start[0]])
    }
}

/// Character positions of the input, so that units never split a code
/// point.
struct CharTable<'a> {
    text: &'a str,
    /// Byte offset of every char, plus `text.len()`.
    bounds: Vec<usize>,
    separators: Vec<bool>,
}

impl<'a> CharTable<'a> {
    fn new(text: &'a str, separator: char) -> Self {
        let bounds = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let separators = text.chars().map(|c| c == separator).collect();
        Self {
            text,
            bounds,
            separators,
        }
    }

    fn len(&self) -> usize {
        self.separators.len()
    }

    fn is_separator(&self, pos: usize) -> bool {
        self.separators[pos]
    }

    /// First non-separator position in `pos..limit`, or `limit`.
    fn skip_separators(&self, mut pos: usize, limit: usize) -> usize {
        while pos < limit && self.separators[pos] {
            pos += 1;
        }
        pos
    }

    fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.text[self.bounds[start]..self.bounds[end]]
    }
}
