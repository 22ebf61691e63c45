//! Term frequency counting
//!
//! Splits query text into whitespace-delimited terms and counts them,
//! leaving out stop words and direction queries.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Stop words excluded from term counts unless configured otherwise
pub const DEFAULT_STOP_WORDS: &[&str] = &["in", "to", "a", "the"];

/// Lowercased term → occurrence count
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TermFrequency(BTreeMap<String, usize>);

impl TermFrequency {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, term: &str) -> Option<usize> {
        self.0.get(term).copied()
    }

    /// Number of distinct terms
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total term occurrences
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.0.contains_key(term)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(term, count)| (term.as_str(), *count))
    }

    fn increment(&mut self, term: &str) {
        match self.0.get_mut(term) {
            Some(count) => *count += 1,
            None => {
                self.0.insert(term.to_string(), 1);
            }
        }
    }
}

impl<S: Into<String>> FromIterator<(S, usize)> for TermFrequency {
    fn from_iter<I: IntoIterator<Item = (S, usize)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(term, count)| (term.into(), count)).collect())
    }
}

/// Accumulates term counts for the aggregator
#[derive(Debug, Clone)]
pub struct TermCounter {
    stop_words: BTreeSet<String>,
    frequency: TermFrequency,
}

impl Default for TermCounter {
    fn default() -> Self {
        Self::new(DEFAULT_STOP_WORDS.iter().copied())
    }
}

impl TermCounter {
    /// Create a counter with the given stop words (matched case-insensitively)
    pub fn new<I, S>(stop_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stop_words: stop_words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
            frequency: TermFrequency::new(),
        }
    }

    pub fn is_stop_word(&self, term: &str) -> bool {
        self.stop_words.contains(term)
    }

    /// Count the terms of one query
    ///
    /// Queries containing `->` are skipped entirely. Terms are lowercased
    /// before counting.
    pub fn add_query(&mut self, query_text: &str) {
        if query_text.contains("->") {
            return;
        }

        let lowered = query_text.to_lowercase();
        for term in lowered.split_whitespace() {
            if !self.is_stop_word(term) {
                self.frequency.increment(term);
            }
        }
    }

    pub fn finish(self) -> TermFrequency {
        self.frequency
    }
}

/// Rank terms by count, highest first
///
/// Ties are ordered by term so output is stable run to run; callers should
/// still not rely on tie order.
pub fn top_terms(frequency: &TermFrequency, n: usize) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = frequency
        .iter()
        .map(|(term, count)| (term.to_string(), count))
        .collect();

    // Stable sort keeps the map's alphabetical order inside each count
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_words_excluded() {
        let mut counter = TermCounter::default();
        counter.add_query("paris to london");
        counter.add_query("the weather in a city");

        let freq = counter.finish();
        assert_eq!(freq.get("paris"), Some(1));
        assert_eq!(freq.get("london"), Some(1));
        assert_eq!(freq.get("weather"), Some(1));
        assert_eq!(freq.get("city"), Some(1));
        for stop in DEFAULT_STOP_WORDS {
            assert!(!freq.contains(stop), "stop word {} counted", stop);
        }
    }

    #[test]
    fn test_directional_queries_skipped() {
        let mut counter = TermCounter::default();
        counter.add_query("100 usd -> eur");
        counter.add_query("berlin->munich");
        counter.add_query("usd");

        let freq = counter.finish();
        assert_eq!(freq.get("usd"), Some(1));
        assert!(!freq.contains("eur"));
        assert!(!freq.contains("berlin->munich"));
        assert_eq!(freq.len(), 1);
    }

    #[test]
    fn test_terms_lowercased() {
        let mut counter = TermCounter::default();
        counter.add_query("Rust Lang");
        counter.add_query("rust   book");
        counter.add_query("The Rust");

        let freq = counter.finish();
        assert_eq!(freq.get("rust"), Some(3));
        assert_eq!(freq.get("lang"), Some(1));
        assert!(!freq.contains("Rust"));
        assert!(!freq.contains("the"));
    }

    #[test]
    fn test_custom_stop_words() {
        let mut counter = TermCounter::new(["How", " to "]);
        counter.add_query("how to cook the rice");

        let freq = counter.finish();
        assert!(!freq.contains("how"));
        assert!(!freq.contains("to"));
        assert_eq!(freq.get("the"), Some(1));
        assert_eq!(freq.total(), 3);
    }

    #[test]
    fn test_top_terms_ranking() {
        let freq: TermFrequency = [("a", 5), ("b", 5), ("c", 1)].into_iter().collect();

        let top = top_terms(&freq, 1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].1, 5);
        assert!(top[0].0 == "a" || top[0].0 == "b");

        let all = top_terms(&freq, 10);
        assert_eq!(all.len(), 3);
        assert_eq!(all[2], ("c".to_string(), 1));
        assert!(all.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn test_top_terms_empty() {
        assert!(top_terms(&TermFrequency::new(), 10).is_empty());
    }
}
