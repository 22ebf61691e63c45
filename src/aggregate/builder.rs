//! Aggregate builder
//!
//! The single mutable accumulator of an ingestion run. Events are fed in
//! loader order; `finish` freezes the counts into an [`AggregateIndex`].

use super::index::{AggregateIndex, QueryTree, TimeCounts};
use super::terms::TermCounter;
use crate::ingest::{LoadStats, SearchEvent};
use std::collections::BTreeMap;

/// Accumulates counts, tree leaves and term frequencies
#[derive(Debug, Clone, Default)]
pub struct AggregateBuilder {
    type_counts: BTreeMap<String, usize>,
    time_counts: TimeCounts,
    query_tree: QueryTree,
    terms: TermCounter,
    total_events: usize,
}

impl AggregateBuilder {
    /// Create a builder that ignores `stop_words` when counting terms
    pub fn new<I, S>(stop_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            terms: TermCounter::new(stop_words),
            ..Self::default()
        }
    }

    /// Fold one event into every index
    ///
    /// Each call adds exactly one time-bucket increment and one tree leaf.
    pub fn record(&mut self, event: &SearchEvent) {
        *self
            .type_counts
            .entry(event.query_type.clone())
            .or_default() += 1;

        *self
            .time_counts
            .entry(event.year)
            .or_default()
            .entry(event.month)
            .or_default() += 1;

        self.query_tree
            .push(event.year, event.month, event.query_text.to_lowercase());

        self.terms.add_query(&event.query_text);
        self.total_events += 1;
    }

    pub fn record_all<'a>(&mut self, events: impl IntoIterator<Item = &'a SearchEvent>) {
        for event in events {
            self.record(event);
        }
    }

    /// Events recorded so far
    pub fn len(&self) -> usize {
        self.total_events
    }

    pub fn is_empty(&self) -> bool {
        self.total_events == 0
    }

    /// Freeze into a read-only snapshot
    pub fn finish(self, load_stats: LoadStats) -> AggregateIndex {
        AggregateIndex {
            type_counts: self.type_counts,
            time_counts: self.time_counts,
            query_tree: self.query_tree,
            term_frequency: self.terms.finish(),
            total_events: self.total_events,
            load_stats,
        }
    }
}
