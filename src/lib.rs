//! # searchlog
//!
//! Search-history analysis: reads a directory of exported search records,
//! aggregates them by type, year and month, ranks search terms, and filters
//! the resulting query tree on demand.
//!
//! ## Modules
//!
//! - [`ingest`]: Export file discovery and decoding
//! - [`aggregate`]: Counts, query tree and term frequency
//! - [`filter`]: Substring filtering of the query tree
//! - [`report`]: Text, JSON and tree rendering
//! - [`browse`]: Interactive filter/expand session
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use searchlog::aggregate::{aggregate_pattern, AnalysisOptions};
//! use searchlog::filter::filter_tree;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let index = aggregate_pattern("./Searches/Searches/*.json", &AnalysisOptions::default())?;
//!
//!     println!("{} queries", index.total_events());
//!     for (term, count) in index.top_terms(10) {
//!         println!("{}: {}", term, count);
//!     }
//!
//!     let matches = filter_tree(index.query_tree(), Some("weather"));
//!     println!("{} queries mention weather", matches.match_count());
//!
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod browse;
pub mod config;
pub mod filter;
pub mod ingest;
pub mod report;

// Re-export top-level types for convenience
pub use aggregate::{
    aggregate_pattern, run_aggregation, top_terms, AggregateBuilder, AggregateIndex,
    AnalysisOptions, QueryTree, TermFrequency,
};

pub use filter::{filter_tree, FilteredTree};

pub use ingest::{
    discover, ErrorPolicy, IngestError, IngestResult, LoadStats, RecordLoader, SearchEvent,
    TimeZoneMode,
};

pub use browse::{Command, IndexSource, Outcome, PatternSource, Session};

pub use config::{Config, ConfigError, DisplayMode, LoggingConfig};
