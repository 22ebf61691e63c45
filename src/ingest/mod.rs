//! Search History Ingestion
//!
//! Turns a directory of search-history export files into normalized events:
//!
//! - **types**: `SearchEvent` and the raw JSON shapes it is decoded from
//! - **loader**: glob discovery and per-file decoding
//! - **error**: Error types
//!
//! # Input format
//!
//! Each file holds one JSON document on its first line:
//!
//! ```text
//! {"event": [{"query": {"id": [{"type"?: "...", "timestamp_usec": "..."}, ...],
//!                       "query_text": "..."}}, ...]}
//! ```

pub mod error;
pub mod loader;
pub mod types;

pub use error::{IngestError, IngestResult};
pub use loader::{discover, LoadStats, RecordLoader};
pub use types::{
    parse_timestamp_secs, ErrorPolicy, SearchEvent, TimeZoneMode, DEFAULT_QUERY_TYPE,
};
