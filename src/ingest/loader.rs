//! Export file loader
//!
//! Discovers export files through a glob pattern and decodes each one into
//! a flat list of [`SearchEvent`]s.

use super::error::{IngestError, IngestResult};
use super::types::{parse_timestamp_secs, ExportFile, SearchEvent, TimeZoneMode};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Expand a glob pattern into the list of export files to load
///
/// Paths come back in the order the filesystem walk yields them; callers must
/// not assume they are sorted. Entries that cannot be read are skipped.
pub fn discover(pattern: &str) -> IngestResult<Vec<PathBuf>> {
    let entries = glob::glob(pattern).map_err(|e| IngestError::Glob {
        pattern: pattern.to_string(),
        source: e,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => paths.push(path),
            Ok(path) => tracing::debug!("Skipping non-file match {:?}", path),
            Err(e) => tracing::warn!("Cannot access {:?}: {}", e.path(), e.error()),
        }
    }

    if paths.is_empty() {
        return Err(IngestError::NoInputFiles {
            pattern: pattern.to_string(),
        });
    }

    tracing::debug!("Pattern {:?} matched {} files", pattern, paths.len());
    Ok(paths)
}

/// Per-run file accounting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    /// Files handed to the loader
    pub files_seen: usize,
    /// Files whose events made it into the aggregate
    pub files_loaded: usize,
    /// Files dropped under the skip policy
    pub files_skipped: usize,
}

/// Decodes export files into search events
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordLoader {
    zone: TimeZoneMode,
}

impl RecordLoader {
    pub fn new(zone: TimeZoneMode) -> Self {
        Self { zone }
    }

    pub fn zone(&self) -> TimeZoneMode {
        self.zone
    }

    /// Load every event from one export file
    ///
    /// Only the first line of the file is read; it must hold the whole JSON
    /// document.
    pub fn load_file(&self, path: &Path) -> IngestResult<Vec<SearchEvent>> {
        let file = File::open(path).map_err(|e| IngestError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut raw = Vec::new();
        BufReader::new(file)
            .read_until(b'\n', &mut raw)
            .map_err(|e| IngestError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        let first_line = String::from_utf8(raw).map_err(|e| {
            IngestError::malformed(path, format!("first line is not valid UTF-8: {}", e))
        })?;

        let events = self.parse_document(path, &first_line)?;
        tracing::debug!("Loaded {} events from {:?}", events.len(), path);
        Ok(events)
    }

    /// Load events from an in-memory document (useful for testing)
    pub fn load_str(&self, content: &str) -> IngestResult<Vec<SearchEvent>> {
        let first_line = content.lines().next().unwrap_or_default();
        self.parse_document(Path::new("<memory>"), first_line)
    }

    fn parse_document(&self, path: &Path, line: &str) -> IngestResult<Vec<SearchEvent>> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Err(IngestError::malformed(path, "first line is empty"));
        }

        let document: ExportFile = serde_json::from_str(line)
            .map_err(|e| IngestError::malformed(path, e.to_string()))?;

        let mut events = Vec::with_capacity(document.event.len());
        for (idx, raw) in document.event.into_iter().enumerate() {
            let query = raw.query;

            let stamp = query.last_timestamp().ok_or_else(|| {
                IngestError::malformed(path, format!("event {}: query.id is empty", idx))
            })?;

            let timestamp_err = || IngestError::TimestampParse {
                path: path.to_path_buf(),
                value: stamp.to_string(),
            };

            let secs = parse_timestamp_secs(stamp).ok_or_else(timestamp_err)?;
            let query_type = query.query_type().to_string();
            let event = SearchEvent::new(query.query_text.as_str(), secs, query_type, self.zone)
                .ok_or_else(timestamp_err)?;

            events.push(event);
        }

        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    const ONE_EVENT: &str = r#"{"event":[{"query":{"id":[{"timestamp_usec":"1584273600000000"}],"query_text":"Weather Today"}}]}"#;

    fn loader() -> RecordLoader {
        RecordLoader::new(TimeZoneMode::Utc)
    }

    #[test]
    fn test_load_str_single_event() {
        let events = loader().load_str(ONE_EVENT).unwrap();

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.query_text, "Weather Today");
        assert_eq!(event.timestamp_secs, 1_584_273_600);
        assert_eq!(event.query_type, "TEXT");
        assert_eq!((event.year, event.month), (2020, 3));
    }

    #[test]
    fn test_only_first_line_is_read() {
        let content = format!("{}\nthis is not json\n", ONE_EVENT);
        let events = loader().load_str(&content).unwrap();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_typed_event_and_order() {
        let doc = r#"{"event":[
            {"query":{"id":[{"type":"MAPS","timestamp_usec":"1"},{"timestamp_usec":"1584273600000000"}],"query_text":"paris to london"}},
            {"query":{"id":[{"timestamp_usec":"1588000000000000"}],"query_text":"second"}}
        ]}"#
        .replace('\n', "");

        let events = loader().load_str(&doc).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].query_type, "MAPS");
        assert_eq!(events[0].timestamp_secs, 1_584_273_600);
        assert_eq!(events[1].query_text, "second");
    }

    #[test]
    fn test_empty_first_line_is_malformed() {
        let err = loader().load_str("\n{}").unwrap_err();
        assert!(matches!(err, IngestError::MalformedInput { .. }));
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let err = loader().load_str("{not json").unwrap_err();
        assert!(matches!(err, IngestError::MalformedInput { .. }));
    }

    #[test]
    fn test_missing_fields_are_malformed() {
        let cases = [
            r#"{"events":[]}"#,
            r#"{"event":[{"nope":{}}]}"#,
            r#"{"event":[{"query":{"query_text":"x"}}]}"#,
            r#"{"event":[{"query":{"id":[{"timestamp_usec":"1"}]}}]}"#,
            r#"{"event":[{"query":{"id":[{"type":"X"}],"query_text":"x"}}]}"#,
            r#"{"event":[{"query":{"id":[],"query_text":"x"}}]}"#,
        ];

        for case in cases {
            let err = loader().load_str(case).unwrap_err();
            assert!(
                matches!(err, IngestError::MalformedInput { .. }),
                "expected malformed for {}: {:?}",
                case,
                err
            );
        }
    }

    #[test]
    fn test_bad_timestamp() {
        let doc = r#"{"event":[{"query":{"id":[{"timestamp_usec":"soon"}],"query_text":"x"}}]}"#;
        let err = loader().load_str(doc).unwrap_err();
        match err {
            IngestError::TimestampParse { value, .. } => assert_eq!(value, "soon"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_empty_event_list() {
        let events = loader().load_str(r#"{"event":[]}"#).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_load_file_and_discover() {
        let dir = tempdir().unwrap();
        for name in ["a.json", "b.json"] {
            let mut file = File::create(dir.path().join(name)).unwrap();
            writeln!(file, "{}", ONE_EVENT).unwrap();
        }
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let pattern = dir.path().join("*.json").to_string_lossy().into_owned();
        let paths = discover(&pattern).unwrap();
        assert_eq!(paths.len(), 2);

        for path in &paths {
            let events = loader().load_file(path).unwrap();
            assert_eq!(events.len(), 1);
        }
    }

    #[test]
    fn test_discover_no_matches() {
        let dir = tempdir().unwrap();
        let pattern = dir.path().join("*.json").to_string_lossy().into_owned();
        assert!(matches!(
            discover(&pattern),
            Err(IngestError::NoInputFiles { .. })
        ));
    }

    #[test]
    fn test_discover_bad_pattern() {
        assert!(matches!(discover("[unclosed"), Err(IngestError::Glob { .. })));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = loader().load_file(&dir.path().join("gone.json")).unwrap_err();
        assert!(matches!(err, IngestError::Io { .. }));
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("binary.json");
        std::fs::write(&path, b"{\"event\":[\xff\xfe]}\n").unwrap();

        let err = loader().load_file(&path).unwrap_err();
        match err {
            IngestError::MalformedInput { path: p, reason } => {
                assert_eq!(p, path);
                assert!(reason.contains("UTF-8"), "unexpected reason: {}", reason);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_utf8_after_first_line_is_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tail.json");
        let mut content = format!("{}\n", ONE_EVENT).into_bytes();
        content.extend_from_slice(b"\xff\xfe\n");
        std::fs::write(&path, content).unwrap();

        let events = loader().load_file(&path).unwrap();
        assert_eq!(events.len(), 1);
    }
}
