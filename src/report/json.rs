//! JSON summary report

use crate::aggregate::{AggregateIndex, TimeCounts};
use crate::ingest::LoadStats;
use serde::Serialize;
use std::collections::BTreeMap;

/// One entry of the ranked term list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedTerm {
    pub term: String,
    pub count: usize,
}

/// Serializable view of an aggregate run
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub total_events: usize,
    pub distinct_terms: usize,
    pub top_terms: Vec<RankedTerm>,
    pub type_counts: &'a BTreeMap<String, usize>,
    pub time_counts: &'a TimeCounts,
    pub load_stats: LoadStats,
}

impl<'a> JsonReport<'a> {
    pub fn new(index: &'a AggregateIndex, top_n: usize) -> Self {
        Self {
            total_events: index.total_events(),
            distinct_terms: index.distinct_terms(),
            top_terms: index
                .top_terms(top_n)
                .into_iter()
                .map(|(term, count)| RankedTerm { term, count })
                .collect(),
            type_counts: index.type_counts(),
            time_counts: index.time_counts(),
            load_stats: index.load_stats(),
        }
    }
}

/// Render the summary as pretty-printed JSON
pub fn render_json(index: &AggregateIndex, top_n: usize) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport::new(index, top_n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::AggregateBuilder;
    use crate::ingest::{SearchEvent, TimeZoneMode};

    #[test]
    fn test_json_report_shape() {
        let mut builder = AggregateBuilder::default();
        for (text, secs, kind) in [
            ("paris to london", 1_584_273_600, "MAPS"),
            ("weather today", 1_584_705_600, "TEXT"),
        ] {
            builder.record(&SearchEvent::new(text, secs, kind, TimeZoneMode::Utc).unwrap());
        }
        let stats = LoadStats {
            files_seen: 2,
            files_loaded: 2,
            files_skipped: 0,
        };
        let index = builder.finish(stats);

        let value: serde_json::Value =
            serde_json::from_str(&render_json(&index, 1).unwrap()).unwrap();

        assert_eq!(value["total_events"], 2);
        assert_eq!(value["distinct_terms"], 4);
        assert_eq!(value["top_terms"].as_array().unwrap().len(), 1);
        assert_eq!(value["type_counts"]["MAPS"], 1);
        assert_eq!(value["time_counts"]["2020"]["3"], 2);
        assert_eq!(value["load_stats"]["files_loaded"], 2);
    }
}
