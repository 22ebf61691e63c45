//! Aggregation pipeline
//!
//! Drives the loader over a set of paths and feeds every event into one
//! [`AggregateBuilder`].

use super::builder::AggregateBuilder;
use super::index::AggregateIndex;
use super::terms::DEFAULT_STOP_WORDS;
use crate::config::Config;
use crate::ingest::{discover, ErrorPolicy, IngestResult, LoadStats, RecordLoader, TimeZoneMode};
use std::path::Path;
use std::time::Instant;

/// Knobs for one aggregation run
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub zone: TimeZoneMode,
    pub on_error: ErrorPolicy,
    pub stop_words: Vec<String>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            zone: TimeZoneMode::default(),
            on_error: ErrorPolicy::default(),
            stop_words: DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl AnalysisOptions {
    pub fn zone(mut self, zone: TimeZoneMode) -> Self {
        self.zone = zone;
        self
    }

    pub fn on_error(mut self, policy: ErrorPolicy) -> Self {
        self.on_error = policy;
        self
    }

    pub fn stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_words = words.into_iter().map(Into::into).collect();
        self
    }
}

impl From<&Config> for AnalysisOptions {
    fn from(config: &Config) -> Self {
        Self {
            zone: config.ingest.timezone,
            on_error: config.ingest.on_error,
            stop_words: config.analysis.stop_words.clone(),
        }
    }
}

/// Load every path in order and aggregate the events
///
/// Under [`ErrorPolicy::Fail`] the first bad file aborts the run. Under
/// [`ErrorPolicy::Skip`] it is logged and left out of every total.
pub fn run_aggregation<P: AsRef<Path>>(
    paths: &[P],
    options: &AnalysisOptions,
) -> IngestResult<AggregateIndex> {
    let start = Instant::now();
    let loader = RecordLoader::new(options.zone);
    let mut builder = AggregateBuilder::new(&options.stop_words);
    let mut stats = LoadStats {
        files_seen: paths.len(),
        ..LoadStats::default()
    };

    for path in paths {
        let path = path.as_ref();
        match loader.load_file(path) {
            Ok(events) => {
                builder.record_all(&events);
                stats.files_loaded += 1;
            }
            Err(e) if options.on_error == ErrorPolicy::Skip => {
                tracing::warn!("Skipping {:?}: {}", path, e);
                stats.files_skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    let index = builder.finish(stats);
    tracing::info!(
        "Aggregated {} events from {} files ({} skipped) in {:?}",
        index.total_events(),
        stats.files_loaded,
        stats.files_skipped,
        start.elapsed()
    );

    Ok(index)
}

/// Discover files with a glob pattern, then aggregate them
pub fn aggregate_pattern(pattern: &str, options: &AnalysisOptions) -> IngestResult<AggregateIndex> {
    let paths = discover(pattern)?;
    run_aggregation(&paths, options)
}
