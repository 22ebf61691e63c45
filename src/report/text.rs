//! Plain-text summary report

use super::month_name;
use crate::aggregate::AggregateIndex;
use std::fmt::Write;

/// Render the textual report
///
/// Line order: totals, top terms, one line per query type, then each year
/// with its months sorted by number.
pub fn render_text(index: &AggregateIndex, top_n: usize) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(
        out,
        "total queries = {}, {} distinct terms",
        index.total_events(),
        index.distinct_terms()
    );

    let terms = index
        .top_terms(top_n)
        .iter()
        .map(|(term, count)| format!("{} ({})", term, count))
        .collect::<Vec<_>>()
        .join(", ");
    let _ = writeln!(out, "top {} terms: {}", top_n, terms);

    for (query_type, count) in index.type_counts() {
        let _ = writeln!(out, "{}: {}", query_type, count);
    }

    for (year, months) in index.time_counts() {
        let _ = writeln!(out, "{} (total: {})", year, index.year_total(*year));
        for (month, count) in months {
            let _ = writeln!(out, "\t{}: {}", month_name(*month), count);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::AggregateBuilder;
    use crate::ingest::{LoadStats, SearchEvent, TimeZoneMode};

    fn sample_index() -> AggregateIndex {
        let mut builder = AggregateBuilder::default();
        let events = [
            ("paris to london", 1_584_273_600, "MAPS"),
            ("weather today", 1_584_705_600, "TEXT"),
            ("london weather", 1_588_334_400, "TEXT"),
            ("rust weather", 1_625_140_800, "TEXT"),
        ];
        for (text, secs, kind) in events {
            builder.record(&SearchEvent::new(text, secs, kind, TimeZoneMode::Utc).unwrap());
        }
        builder.finish(LoadStats::default())
    }

    #[test]
    fn test_text_report_layout() {
        let report = render_text(&sample_index(), 2);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(
            lines,
            vec![
                "total queries = 4, 5 distinct terms",
                "top 2 terms: weather (3), london (2)",
                "MAPS: 1",
                "TEXT: 3",
                "2020 (total: 3)",
                "\tMarch: 2",
                "\tMay: 1",
                "2021 (total: 1)",
                "\tJuly: 1",
            ]
        );
    }

    #[test]
    fn test_empty_index() {
        let index = AggregateBuilder::default().finish(LoadStats::default());
        let report = render_text(&index, 10);
        assert_eq!(report, "total queries = 0, 0 distinct terms\ntop 10 terms: \n");
    }
}
