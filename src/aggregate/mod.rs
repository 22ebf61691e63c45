//! Search History Aggregation
//!
//! Folds search events into the indices presenters read from:
//!
//! - **index**: `AggregateIndex` and `QueryTree`
//! - **builder**: the mutable accumulator behind an index
//! - **terms**: term frequency counting and ranking
//! - **pipeline**: loader → builder driver
//!
//! # Architecture
//!
//! ```text
//! paths → RecordLoader → SearchEvent → AggregateBuilder::record
//!                                            ↓ finish
//!        type_counts / time_counts / query_tree / term_frequency
//! ```

pub mod builder;
pub mod index;
pub mod pipeline;
pub mod terms;

pub use builder::AggregateBuilder;
pub use index::{AggregateIndex, QueryTree, TimeCounts, YearBranch};
pub use pipeline::{aggregate_pattern, run_aggregation, AnalysisOptions};
pub use terms::{top_terms, TermCounter, TermFrequency, DEFAULT_STOP_WORDS};
