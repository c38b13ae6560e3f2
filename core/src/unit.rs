//! Classified units and candidate segments.
//!
//! A `Segment` is one way of splitting an input string into consecutive
//! `Unit`s. For example "xian" yields the segments `[xian]`, `[xi, an]`,
//! `[xia, n]` and `[xi, a, n]`.

use serde::Serialize;
use std::fmt;

/// How a piece of input was recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    /// Exactly a valid syllable.
    Complete,
    /// Exactly one of the single-consonant abbreviations.
    Abbreviated,
    /// A strict prefix of at least one valid syllable.
    Incomplete,
    /// Not recognised at all.
    Invalid,
}

impl UnitKind {
    /// Anything except `Invalid`.
    pub fn is_recognized(self) -> bool {
        self != UnitKind::Invalid
    }
}

/// A piece of input together with its classification.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Unit {
    pub text: String,
    pub kind: UnitKind,
}

impl Unit {
    pub fn new<T: Into<String>>(text: T, kind: UnitKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    /// Contribution of this unit to a segment's incompleteness score.
    ///
    /// Invalid text is charged per character so that long unrecognised
    /// tails sink below everything else.
    pub fn weight(&self) -> usize {
        match self.kind {
            UnitKind::Complete => 0,
            UnitKind::Incomplete => 1,
            UnitKind::Abbreviated => 2,
            UnitKind::Invalid => 3 * self.text.chars().count(),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// One candidate segmentation: units in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Segment {
    units: Vec<Unit>,
}

impl Segment {
    pub fn new(units: Vec<Unit>) -> Self {
        Self { units }
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn into_units(self) -> Vec<Unit> {
        self.units
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Unit> {
        self.units.iter()
    }

    /// Number of units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Sum of unit weights; lower means more fully spelled out.
    pub fn incompleteness(&self) -> usize {
        self.units.iter().map(Unit::weight).sum()
    }

    /// Ranking key: least incomplete first, then fewest units.
    pub fn rank_key(&self) -> (usize, usize) {
        (self.incompleteness(), self.len())
    }

    /// Concatenation of all unit texts.
    pub fn text(&self) -> String {
        self.units.iter().map(|u| u.text.as_str()).collect()
    }

    /// Unit texts in order.
    pub fn texts(&self) -> Vec<&str> {
        self.units.iter().map(|u| u.text.as_str()).collect()
    }

    pub(crate) fn push(&mut self, unit: Unit) {
        self.units.push(unit);
    }
}

impl From<Vec<Unit>> for Segment {
    fn from(units: Vec<Unit>) -> Self {
        Self::new(units)
    }
}

impl<'a> IntoIterator for &'a Segment {
    type Item = &'a Unit;
    type IntoIter = std::slice::Iter<'a, Unit>;

    fn into_iter(self) -> Self::IntoIter {
        self.units.iter()
    }
}

/// Space-separated unit texts, e.g. "xi an".
impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, unit) in self.units.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", unit)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_per_kind() {
        assert_eq!(Unit::new("xian", UnitKind::Complete).weight(), 0);
        assert_eq!(Unit::new("zhua", UnitKind::Incomplete).weight(), 1);
        assert_eq!(Unit::new("zh", UnitKind::Abbreviated).weight(), 2);
        assert_eq!(Unit::new("igv", UnitKind::Invalid).weight(), 9);
    }

    #[test]
    fn segment_score_and_text() {
        let seg = Segment::new(vec![
            Unit::new("xi", UnitKind::Complete),
            Unit::new("a", UnitKind::Complete),
            Unit::new("n", UnitKind::Abbreviated),
        ]);
        assert_eq!(seg.incompleteness(), 2);
        assert_eq!(seg.len(), 3);
        assert_eq!(seg.rank_key(), (2, 3));
        assert_eq!(seg.text(), "xian");
        assert_eq!(seg.to_string(), "xi a n");
    }

    #[test]
    fn units_order_by_text_then_kind() {
        let a = Unit::new("an", UnitKind::Invalid);
        let b = Unit::new("xi", UnitKind::Complete);
        let c = Unit::new("xi", UnitKind::Incomplete);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn kind_serializes_lowercase() {
        let json = serde_json::to_string(&Unit::new("b", UnitKind::Abbreviated)).unwrap();
        assert_eq!(json, r#"{"text":"b","kind":"abbreviated"}"#);
        let seg = Segment::new(vec![Unit::new("a", UnitKind::Complete)]);
        assert_eq!(
            serde_json::to_string(&seg).unwrap(),
            r#"[{"text":"a","kind":"complete"}]"#
        );
    }

    #[test]
    fn empty_segment() {
        let seg = Segment::default();
        assert!(seg.is_empty());
        assert_eq!(seg.incompleteness(), 0);
        assert_eq!(seg.to_string(), "");
    }
}
