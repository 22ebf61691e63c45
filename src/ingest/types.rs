//! Core data types for search-history ingestion
//!
//! - `SearchEvent`: one normalized search action
//! - `ExportFile` / `RawEvent` / `RawQuery` / `QueryId`: the on-disk JSON shape
//! - `TimeZoneMode` and `ErrorPolicy`: loader behaviour switches

use chrono::{DateTime, Datelike, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Query type used when the export carries no explicit classification
pub const DEFAULT_QUERY_TYPE: &str = "TEXT";

/// A single search action, normalized from one export record
///
/// Calendar fields are resolved once at load time so the aggregator never
/// touches time zones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchEvent {
    /// Raw query text as typed by the user
    pub query_text: String,
    /// Whole seconds since the Unix epoch
    pub timestamp_secs: i64,
    /// Coarse classification (`TEXT`, `MAPS`, ...)
    pub query_type: String,
    /// Calendar year in the loader's time zone
    pub year: i32,
    /// Calendar month (1-12) in the loader's time zone
    pub month: u32,
}

impl SearchEvent {
    /// Build an event, resolving year and month in `zone`
    ///
    /// Returns `None` when the timestamp is outside chrono's representable range.
    pub fn new(
        query_text: impl Into<String>,
        timestamp_secs: i64,
        query_type: impl Into<String>,
        zone: TimeZoneMode,
    ) -> Option<Self> {
        let (year, month) = zone.year_month(timestamp_secs)?;
        Some(Self {
            query_text: query_text.into(),
            timestamp_secs,
            query_type: query_type.into(),
            year,
            month,
        })
    }

    /// Whether this query is a direction/conversion lookup (`a -> b`)
    pub fn is_directional(&self) -> bool {
        self.query_text.contains("->")
    }
}

/// Top-level JSON document found on the first line of an export file
#[derive(Debug, Deserialize)]
pub struct ExportFile {
    pub event: Vec<RawEvent>,
}

#[derive(Debug, Deserialize)]
pub struct RawEvent {
    pub query: RawQuery,
}

#[derive(Debug, Deserialize)]
pub struct RawQuery {
    pub id: Vec<QueryId>,
    pub query_text: String,
}

/// One identifier entry; the first may carry a type, the last carries the time
#[derive(Debug, Deserialize)]
pub struct QueryId {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub timestamp_usec: String,
}

impl RawQuery {
    /// Type of the query: the first id's `type` when more than one id exists
    pub fn query_type(&self) -> &str {
        match self.id.as_slice() {
            [first, _, ..] => first.kind.as_deref().unwrap_or(DEFAULT_QUERY_TYPE),
            _ => DEFAULT_QUERY_TYPE,
        }
    }

    /// Raw timestamp string of the last id entry
    pub fn last_timestamp(&self) -> Option<&str> {
        self.id.last().map(|id| id.timestamp_usec.as_str())
    }
}

/// Parse the seconds prefix of a microsecond timestamp string
///
/// Only the first 10 characters are significant, matching how the export
/// encodes epoch microseconds. The prefix is cut from the raw string, so
/// leading whitespace counts towards the 10; whitespace inside the prefix is
/// then ignored.
pub fn parse_timestamp_secs(timestamp_usec: &str) -> Option<i64> {
    let prefix = match timestamp_usec.char_indices().nth(10) {
        Some((idx, _)) => &timestamp_usec[..idx],
        None => timestamp_usec,
    };
    prefix.trim().parse().ok()
}

/// Time zone used to bucket events into years and months
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimeZoneMode {
    /// The machine's local zone
    #[default]
    Local,
    Utc,
}

impl TimeZoneMode {
    /// Resolve `(year, month)` for an epoch second count
    pub fn year_month(self, secs: i64) -> Option<(i32, u32)> {
        match self {
            TimeZoneMode::Local => Local
                .timestamp_opt(secs, 0)
                .single()
                .map(|dt| (dt.year(), dt.month())),
            TimeZoneMode::Utc => {
                DateTime::<Utc>::from_timestamp(secs, 0).map(|dt| (dt.year(), dt.month()))
            }
        }
    }
}

impl FromStr for TimeZoneMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(TimeZoneMode::Local),
            "utc" => Ok(TimeZoneMode::Utc),
            other => Err(format!("unknown timezone {:?} (expected local or utc)", other)),
        }
    }
}

/// What the loader does with a file it cannot read
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Abort the whole run on the first bad file
    #[default]
    Fail,
    /// Log a warning, leave the file out of the totals, keep going
    Skip,
}

impl FromStr for ErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fail" => Ok(ErrorPolicy::Fail),
            "skip" => Ok(ErrorPolicy::Skip),
            other => Err(format!("unknown error policy {:?} (expected fail or skip)", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(json: &str) -> RawQuery {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_parse_timestamp_prefix() {
        assert_eq!(parse_timestamp_secs("1584273600123456"), Some(1584273600));
        assert_eq!(parse_timestamp_secs("1584273600"), Some(1584273600));
        assert_eq!(parse_timestamp_secs("42"), Some(42));
        assert_eq!(parse_timestamp_secs("abc4273600123456"), None);
        assert_eq!(parse_timestamp_secs(""), None);
    }

    #[test]
    fn test_parse_timestamp_prefix_counts_leading_space() {
        assert_eq!(parse_timestamp_secs(" 1584273600123456"), Some(158427360));
        assert_eq!(parse_timestamp_secs("1584273600 "), Some(1584273600));
        assert_eq!(parse_timestamp_secs("   "), None);
    }

    #[test]
    fn test_query_type_needs_two_ids() {
        let q = query(
            r#"{"id":[{"type":"MAPS","timestamp_usec":"1"},{"timestamp_usec":"2"}],"query_text":"x"}"#,
        );
        assert_eq!(q.query_type(), "MAPS");

        // A lone id is always TEXT, even when typed
        let q = query(r#"{"id":[{"type":"MAPS","timestamp_usec":"1"}],"query_text":"x"}"#);
        assert_eq!(q.query_type(), DEFAULT_QUERY_TYPE);

        // Type on a later id does not count
        let q = query(
            r#"{"id":[{"timestamp_usec":"1"},{"type":"MAPS","timestamp_usec":"2"}],"query_text":"x"}"#,
        );
        assert_eq!(q.query_type(), DEFAULT_QUERY_TYPE);
    }

    #[test]
    fn test_last_timestamp_used() {
        let q = query(
            r#"{"id":[{"timestamp_usec":"111"},{"timestamp_usec":"222"}],"query_text":"x"}"#,
        );
        assert_eq!(q.last_timestamp(), Some("222"));
    }

    #[test]
    fn test_utc_year_month() {
        // 2020-03-15T12:00:00Z
        assert_eq!(TimeZoneMode::Utc.year_month(1_584_273_600), Some((2020, 3)));
        assert_eq!(TimeZoneMode::Utc.year_month(0), Some((1970, 1)));
        assert_eq!(TimeZoneMode::Utc.year_month(i64::MAX), None);
    }

    #[test]
    fn test_local_mid_month_is_stable() {
        // Mid-month noon lands in March in every zone
        assert_eq!(TimeZoneMode::Local.year_month(1_584_273_600), Some((2020, 3)));
    }

    #[test]
    fn test_directional_marker() {
        let event = SearchEvent::new("10 usd -> eur", 0, "TEXT", TimeZoneMode::Utc).unwrap();
        assert!(event.is_directional());

        let event = SearchEvent::new("usd to eur", 0, "TEXT", TimeZoneMode::Utc).unwrap();
        assert!(!event.is_directional());
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("Skip".parse::<ErrorPolicy>().unwrap(), ErrorPolicy::Skip);
        assert_eq!("utc".parse::<TimeZoneMode>().unwrap(), TimeZoneMode::Utc);
        assert!("sometimes".parse::<ErrorPolicy>().is_err());
    }
}
