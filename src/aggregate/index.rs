//! Aggregate result types
//!
//! - `QueryTree`: year → month → queries, in encounter order
//! - `AggregateIndex`: the immutable snapshot handed to presenters

use super::terms::{top_terms, TermFrequency};
use crate::ingest::LoadStats;
use serde::Serialize;
use std::collections::BTreeMap;

/// Month (1-12) → lowercased queries for one year
pub type YearBranch = BTreeMap<u32, Vec<String>>;

/// Year → month → occurrence count
pub type TimeCounts = BTreeMap<i32, BTreeMap<u32, usize>>;

/// Year → month → list of lowercased query texts
///
/// Leaves keep the order queries were encountered, which follows file
/// enumeration order and is not guaranteed to be chronological.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QueryTree {
    years: BTreeMap<i32, YearBranch>,
}

impl QueryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a query under its year and month, creating both on first use
    pub fn push(&mut self, year: i32, month: u32, query: impl Into<String>) {
        self.years
            .entry(year)
            .or_default()
            .entry(month)
            .or_default()
            .push(query.into());
    }

    /// Queries recorded for one month
    pub fn get(&self, year: i32, month: u32) -> Option<&[String]> {
        self.years
            .get(&year)
            .and_then(|months| months.get(&month))
            .map(Vec::as_slice)
    }

    pub fn year(&self, year: i32) -> Option<&YearBranch> {
        self.years.get(&year)
    }

    pub fn years(&self) -> &BTreeMap<i32, YearBranch> {
        &self.years
    }

    /// Total queries across one year
    pub fn year_total(&self, year: i32) -> usize {
        self.years
            .get(&year)
            .map(|months| months.values().map(Vec::len).sum())
            .unwrap_or(0)
    }

    /// Total number of queries in the tree
    pub fn leaf_count(&self) -> usize {
        self.years
            .values()
            .flat_map(|months| months.values())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

impl From<BTreeMap<i32, YearBranch>> for QueryTree {
    fn from(years: BTreeMap<i32, YearBranch>) -> Self {
        Self { years }
    }
}

/// Everything derived from one ingestion run
///
/// Built once by [`AggregateBuilder`](super::AggregateBuilder) and read-only
/// afterwards.
#[derive(Debug, Clone, Default)]
pub struct AggregateIndex {
    pub(super) type_counts: BTreeMap<String, usize>,
    pub(super) time_counts: TimeCounts,
    pub(super) query_tree: QueryTree,
    pub(super) term_frequency: TermFrequency,
    pub(super) total_events: usize,
    pub(super) load_stats: LoadStats,
}

impl AggregateIndex {
    /// Query type → occurrence count
    pub fn type_counts(&self) -> &BTreeMap<String, usize> {
        &self.type_counts
    }

    pub fn time_counts(&self) -> &TimeCounts {
        &self.time_counts
    }

    pub fn query_tree(&self) -> &QueryTree {
        &self.query_tree
    }

    pub fn term_frequency(&self) -> &TermFrequency {
        &self.term_frequency
    }

    /// Number of events consumed
    pub fn total_events(&self) -> usize {
        self.total_events
    }

    pub fn load_stats(&self) -> LoadStats {
        self.load_stats
    }

    pub fn distinct_terms(&self) -> usize {
        self.term_frequency.len()
    }

    /// Count for one year/month bucket, zero if absent
    pub fn month_count(&self, year: i32, month: u32) -> usize {
        self.time_counts
            .get(&year)
            .and_then(|months| months.get(&month))
            .copied()
            .unwrap_or(0)
    }

    pub fn year_total(&self, year: i32) -> usize {
        self.time_counts
            .get(&year)
            .map(|months| months.values().sum())
            .unwrap_or(0)
    }

    /// Highest-count terms, at most `n`
    pub fn top_terms(&self, n: usize) -> Vec<(String, usize)> {
        top_terms(&self.term_frequency, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_creates_branches() {
        let mut tree = QueryTree::new();
        assert!(tree.is_empty());

        tree.push(2020, 3, "first");
        tree.push(2020, 3, "second");
        tree.push(2021, 1, "third");

        assert_eq!(
            tree.get(2020, 3),
            Some(&["first".to_string(), "second".to_string()][..])
        );
        assert_eq!(tree.get(2020, 4), None);
        assert_eq!(tree.year_total(2020), 2);
        assert_eq!(tree.year_total(1999), 0);
        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(tree.years().keys().copied().collect::<Vec<_>>(), vec![2020, 2021]);
    }

    #[test]
    fn test_serializes_as_nested_maps() {
        let mut tree = QueryTree::new();
        tree.push(2020, 3, "rust");

        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json, serde_json::json!({"2020": {"3": ["rust"]}}));
    }
}
