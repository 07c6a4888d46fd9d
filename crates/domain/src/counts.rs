//! Ordered label → count mapping.
//!
//! Chart data arrives as JSON objects whose key order carries meaning
//! (chronological dates, ranked cities, bracket order). [`Counts`] keeps
//! that order through serialisation in both directions.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An insertion-ordered list of `(label, count)` pairs, serialised as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counts(Vec<(String, u64)>);

impl Counts {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mapping ranked by descending count, ties broken by label.
    #[must_use]
    pub fn ranked(tally: impl IntoIterator<Item = (String, u64)>) -> Self {
        let mut pairs: Vec<(String, u64)> = tally.into_iter().collect();
        pairs.sort_by(|(la, ca), (lb, cb)| cb.cmp(ca).then_with(|| la.cmp(lb)));
        Self(pairs)
    }

    /// Append a pair, or add to the count if the label is already present.
    pub fn add(&mut self, label: impl Into<String>, count: u64) {
        let label = label.into();
        match self.0.iter_mut().find(|(l, _)| *l == label) {
            Some((_, existing)) => *existing += count,
            None => self.0.push((label, count)),
        }
    }

    /// Keep only the first `len` pairs.
    pub fn truncate(&mut self, len: usize) {
        self.0.truncate(len);
    }

    /// Look up the count for a label.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<u64> {
        self.0.iter().find(|(l, _)| l == label).map(|(_, c)| *c)
    }

    /// Labels in order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(l, _)| l.as_str())
    }

    /// Counts in order.
    pub fn values(&self) -> impl Iterator<Item = u64> + '_ {
        self.0.iter().map(|(_, c)| *c)
    }

    /// Pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(l, c)| (l.as_str(), *c))
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.values().sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<L: Into<String>> FromIterator<(L, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (L, u64)>>(iter: I) -> Self {
        let mut counts = Self::new();
        for (label, count) in iter {
            counts.add(label, count);
        }
        counts
    }
}

impl Serialize for Counts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, count) in &self.0 {
            map.serialize_entry(label, count)?;
        }
        map.end()
    }
}

struct CountsVisitor;

impl<'de> Visitor<'de> for CountsVisitor {
    type Value = Counts;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of labels to non-negative counts")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Counts, A::Error> {
        let mut pairs = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((label, count)) = access.next_entry::<String, u64>()? {
            pairs.push((label, count));
        }
        Ok(Counts(pairs))
    }
}

impl<'de> Deserialize<'de> for Counts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(CountsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_keep_key_order_when_deserializing() {
        let json = r#"{"2020-03-16": 1, "2020-03-02": 4, "2020-03-20": 2}"#;
        let counts: Counts = serde_json::from_str(json).unwrap();

        let labels: Vec<&str> = counts.labels().collect();
        assert_eq!(labels, vec!["2020-03-16", "2020-03-02", "2020-03-20"]);
        assert_eq!(counts.values().collect::<Vec<_>>(), vec![1, 4, 2]);
    }

    #[test]
    fn should_serialize_as_object_in_insertion_order() {
        let counts: Counts = [("b", 2), ("a", 1)].into_iter().collect();
        let json = serde_json::to_string(&counts).unwrap();
        assert_eq!(json, r#"{"b":2,"a":1}"#);
    }

    #[test]
    fn should_rank_by_count_then_label() {
        let counts = Counts::ranked(vec![
            ("Cali".to_string(), 3),
            ("Bogota".to_string(), 7),
            ("Armenia".to_string(), 3),
        ]);
        let labels: Vec<&str> = counts.labels().collect();
        assert_eq!(labels, vec!["Bogota", "Armenia", "Cali"]);
    }

    #[test]
    fn should_merge_repeated_labels_on_add() {
        let mut counts = Counts::new();
        counts.add("f", 1);
        counts.add("m", 1);
        counts.add("f", 2);
        assert_eq!(counts.get("f"), Some(3));
        assert_eq!(counts.len(), 2);
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn should_reject_negative_counts() {
        let result: Result<Counts, _> = serde_json::from_str(r#"{"a": -1}"#);
        assert!(result.is_err());
    }
}
