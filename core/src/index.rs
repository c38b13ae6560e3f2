//! Sorted lookup over a fixed syllable table.

use std::ops::Bound;

/// Where a key falls inside a window of the sorted key table.
///
/// Returned by [`SyllableIndex::search`]. `BelowAll`/`AboveAll` are relative
/// to the searched window, not the whole table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPosition {
    /// The key is stored at this position.
    Found(usize),
    /// The key sorts strictly between position `i` and `i + 1`.
    Between(usize),
    /// The key sorts before the first key of the window.
    BelowAll,
    /// The key sorts after the last key of the window.
    AboveAll,
}

/// Immutable index over the valid syllables and single-consonant
/// abbreviations of a romanization scheme.
///
/// The index is built once and never mutated; share it with `Arc`.
///
/// # Example
/// ```
/// use segmenter_core::SyllableIndex;
///
/// let index = SyllableIndex::new(&["xi", "xian", "an"], &["x"]);
/// assert_eq!(index.get("xian"), &[1]);
/// assert!(index.get("xia").is_empty());
/// assert!(index.has_extension("xia"));
/// assert!(index.is_abbreviation("x"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SyllableIndex {
    /// Distinct syllables in strictly ascending order.
    keys: Vec<String>,
    /// `positions[i]` lists where `keys[i]` occurs in the source table.
    positions: Vec<Vec<usize>>,
    /// Distinct abbreviations in ascending order.
    abbreviations: Vec<String>,
    max_key_len: usize,
}

impl SyllableIndex {
    /// Build the index from a syllable table and an abbreviation table.
    ///
    /// Entries are trimmed and lower-cased; blank entries are skipped but
    /// still count towards the positions of later entries.
    pub fn new<S, A>(syllables: &[S], abbreviations: &[A]) -> Self
    where
        S: AsRef<str>,
        A: AsRef<str>,
    {
        let mut entries: Vec<(String, usize)> = syllables
            .iter()
            .enumerate()
            .filter_map(|(pos, s)| {
                let key = s.as_ref().trim().to_lowercase();
                (!key.is_empty()).then_some((key, pos))
            })
            .collect();
        // stable: positions of a duplicated key stay ascending
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        let mut keys: Vec<String> = Vec::new();
        let mut positions: Vec<Vec<usize>> = Vec::new();
        for (key, pos) in entries {
            match keys.last() {
                Some(last) if *last == key => {
                    if let Some(p) = positions.last_mut() {
                        p.push(pos);
                    }
                }
                _ => {
                    keys.push(key);
                    positions.push(vec![pos]);
                }
            }
        }

        let mut abbreviations: Vec<String> = abbreviations
            .iter()
            .map(|a| a.as_ref().trim().to_lowercase())
            .filter(|a| !a.is_empty())
            .collect();
        abbreviations.sort();
        abbreviations.dedup();

        let max_key_len = keys
            .iter()
            .chain(abbreviations.iter())
            .map(|k| k.chars().count())
            .max()
            .unwrap_or(0);

        tracing::debug!(
            syllables = keys.len(),
            abbreviations = abbreviations.len(),
            max_key_len,
            "built syllable index"
        );

        Self {
            keys,
            positions,
            abbreviations,
            max_key_len,
        }
    }

    /// Number of distinct syllables.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Distinct syllables in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Longest syllable or abbreviation, in characters.
    pub fn max_key_len(&self) -> usize {
        self.max_key_len
    }

    /// Exact lookup. Returns the source positions of `key`, or an empty
    /// slice when `key` is not a syllable.
    pub fn get(&self, key: &str) -> &[usize] {
        match self.keys.binary_search_by(|entry| entry.as_str().cmp(key)) {
            Ok(i) => &self.positions[i],
            Err(_) => &[],
        }
    }

    /// True if `key` is exactly one of the syllables.
    pub fn contains(&self, key: &str) -> bool {
        !self.get(key).is_empty()
    }

    /// True if `key` is exactly one of the abbreviations.
    pub fn is_abbreviation(&self, key: &str) -> bool {
        self.abbreviations
            .binary_search_by(|entry| entry.as_str().cmp(key))
            .is_ok()
    }

    /// Source positions of every syllable whose key lies within the range.
    ///
    /// `Included` is a closed bound, `Excluded` an open one and `Unbounded`
    /// places no constraint on that side. Positions come back in key order.
    pub fn get_range(&self, lower: Bound<&str>, upper: Bound<&str>) -> Vec<usize> {
        let Some(mut hi) = self.keys.len().checked_sub(1) else {
            return Vec::new();
        };
        let mut lo = 0;

        if let Some((key, open)) = bound_key(lower) {
            match self.search(key, lo, hi) {
                SearchPosition::AboveAll => return Vec::new(),
                SearchPosition::BelowAll => {}
                SearchPosition::Found(i) => lo = if open { i + 1 } else { i },
                SearchPosition::Between(i) => lo = i + 1,
            }
            if lo > hi {
                return Vec::new();
            }
        }

        if let Some((key, open)) = bound_key(upper) {
            match self.search(key, lo, hi) {
                SearchPosition::BelowAll => return Vec::new(),
                SearchPosition::AboveAll => {}
                SearchPosition::Found(i) if open => match i.checked_sub(1) {
                    Some(h) if h >= lo => hi = h,
                    _ => return Vec::new(),
                },
                SearchPosition::Found(i) | SearchPosition::Between(i) => hi = i,
            }
        }

        self.positions[lo..=hi].iter().flatten().copied().collect()
    }

    /// True if some syllable starts with `prefix` and is longer than it.
    ///
    /// Every such syllable sorts inside `(prefix, successor(prefix))`.
    pub fn has_extension(&self, prefix: &str) -> bool {
        let upper = successor(prefix);
        let upper = match &upper {
            Some(u) => Bound::Excluded(u.as_str()),
            None => Bound::Unbounded,
        };
        !self.get_range(Bound::Excluded(prefix), upper).is_empty()
    }

    /// Binary search for `key` within the window `keys[left..=right]`.
    ///
    /// A window reaching past the table is clipped to it. When nothing is
    /// left of the window, every key is `BelowAll`.
    pub fn search(&self, key: &str, left: usize, right: usize) -> SearchPosition {
        let Some(last) = self.keys.len().checked_sub(1) else {
            return SearchPosition::BelowAll;
        };
        let right = right.min(last);
        if left > right {
            return SearchPosition::BelowAll;
        }
        let window = &self.keys[left..=right];
        match window.binary_search_by(|entry| entry.as_str().cmp(key)) {
            Ok(i) => SearchPosition::Found(left + i),
            Err(0) => SearchPosition::BelowAll,
            Err(i) if i == window.len() => SearchPosition::AboveAll,
            Err(i) => SearchPosition::Between(left + i - 1),
        }
    }
}

fn bound_key<'a>(bound: Bound<&'a str>) -> Option<(&'a str, bool)> {
    match bound {
        Bound::Included(k) => Some((k, false)),
        Bound::Excluded(k) => Some((k, true)),
        Bound::Unbounded => None,
    }
}

/// The same-length string that immediately follows `s` in lexicographic
/// order: the last code point is bumped by one.
///
/// Returns `None` for the empty string and for strings ending in
/// `char::MAX`.
///
/// ```
/// assert_eq!(segmenter_core::successor("zhua").as_deref(), Some("zhub"));
/// ```
pub fn successor(s: &str) -> Option<String> {
    let last = s.chars().next_back()?;
    let next = match last {
        '\u{D7FF}' => '\u{E000}',
        c => char::from_u32(c as u32 + 1)?,
    };
    let mut out = String::with_capacity(s.len() + 1);
    out.push_str(&s[..s.len() - last.len_utf8()]);
    out.push(next);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SyllableIndex {
        // source positions:    0      1       2     3      4       5
        SyllableIndex::new(&["xian", "an", "xi", "xia", "zhuang", "an"], &["x", "zh"])
    }

    #[test]
    fn keys_are_sorted_and_distinct() {
        let index = sample();
        let keys: Vec<&str> = index.keys().collect();
        assert_eq!(keys, vec!["an", "xi", "xia", "xian", "zhuang"]);
        assert_eq!(index.len(), 5);
        assert_eq!(index.max_key_len(), 6);
    }

    #[test]
    fn get_returns_all_source_positions() {
        let index = sample();
        assert_eq!(index.get("an"), &[1, 5]);
        assert_eq!(index.get("xian"), &[0]);
        assert!(index.get("xiang").is_empty());
        assert!(index.get("").is_empty());
    }

    #[test]
    fn entries_are_normalised() {
        let index = SyllableIndex::new(&[" Ni ", "", "HAO"], &[" N "]);
        assert_eq!(index.get("ni"), &[0]);
        assert_eq!(index.get("hao"), &[2]);
        assert!(index.is_abbreviation("n"));
    }

    #[test]
    fn search_reports_between_and_out_of_range() {
        let index = sample();
        // an xi xia xian zhuang
        assert_eq!(index.search("xi", 0, 4), SearchPosition::Found(1));
        assert_eq!(index.search("b", 0, 4), SearchPosition::Between(0));
        assert_eq!(index.search("a", 0, 4), SearchPosition::BelowAll);
        assert_eq!(index.search("zz", 0, 4), SearchPosition::AboveAll);
        // window-relative sentinels
        assert_eq!(index.search("an", 2, 4), SearchPosition::BelowAll);
        assert_eq!(index.search("xiaa", 2, 3), SearchPosition::Between(2));
    }

    #[test]
    fn search_outside_the_table_does_not_panic() {
        let empty = SyllableIndex::new::<&str, &str>(&[], &[]);
        assert_eq!(empty.search("a", 0, 0), SearchPosition::BelowAll);

        let index = sample();
        // an xi xia xian zhuang
        assert_eq!(index.search("zz", 3, 99), SearchPosition::AboveAll);
        assert_eq!(index.search("xian", 0, 99), SearchPosition::Found(3));
        assert_eq!(index.search("xi", 4, 2), SearchPosition::BelowAll);
        assert_eq!(index.search("xi", 7, 9), SearchPosition::BelowAll);
    }

    #[test]
    fn range_closed_and_open_bounds() {
        let index = sample();
        let closed = index.get_range(Bound::Included("xi"), Bound::Included("xian"));
        assert_eq!(closed, vec![2, 3, 0]);
        let open = index.get_range(Bound::Excluded("xi"), Bound::Excluded("xian"));
        assert_eq!(open, vec![3]);
        let empty = index.get_range(Bound::Excluded("xia"), Bound::Excluded("xian"));
        assert!(empty.is_empty());
    }

    #[test]
    fn range_unbounded_sides() {
        let index = sample();
        assert_eq!(index.get_range(Bound::Unbounded, Bound::Unbounded).len(), 6);
        assert_eq!(
            index.get_range(Bound::Unbounded, Bound::Excluded("xi")),
            vec![1, 5]
        );
        assert_eq!(index.get_range(Bound::Included("y"), Bound::Unbounded), vec![4]);
        assert!(index.get_range(Bound::Included("zz"), Bound::Unbounded).is_empty());
        assert!(index.get_range(Bound::Unbounded, Bound::Excluded("an")).is_empty());
    }

    #[test]
    fn range_on_empty_index() {
        let index = SyllableIndex::new::<&str, &str>(&[], &[]);
        assert!(index.is_empty());
        assert!(index.get_range(Bound::Unbounded, Bound::Unbounded).is_empty());
        assert!(!index.has_extension("a"));
    }

    #[test]
    fn extension_is_strict() {
        let index = sample();
        assert!(index.has_extension("x"));
        assert!(index.has_extension("xi"));
        assert!(index.has_extension("zhua"));
        assert!(!index.has_extension("xian"));
        assert!(!index.has_extension("zhuang"));
        assert!(!index.has_extension("q"));
    }

    #[test]
    fn successor_bumps_last_char() {
        assert_eq!(successor("a").as_deref(), Some("b"));
        assert_eq!(successor("xi").as_deref(), Some("xj"));
        assert_eq!(successor("\u{D7FF}").as_deref(), Some("\u{E000}"));
        assert_eq!(successor(""), None);
        assert_eq!(successor("a\u{10FFFF}"), None);
    }
}
