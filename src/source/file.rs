//! File-based data source.
//!
//! Watches the JSON report file the monitoring host rewrites after each run.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::{DataSource, StatusReport};

/// Reads status reports from a JSON file.
///
/// A report is returned only when the file's modification time moved forward
/// since the last successful read. An empty file is treated as a write in
/// progress and retried on the next poll without raising an error.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    last_error: Option<String>,
    last_modified: Option<SystemTime>,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            description: format!("file: {}", path.display()),
            path,
            last_error: None,
            last_modified: None,
        }
    }

    /// Returns the path being watched.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn has_changed(&self, modified: Option<SystemTime>) -> bool {
        match (self.last_modified, modified) {
            (None, _) => true,
            // Gone since the last read; keep showing what we have
            (Some(_), None) => false,
            (Some(last), Some(current)) => current > last,
        }
    }

    /// `Ok(None)` means the file exists but holds nothing yet.
    fn load(&self) -> Result<Option<StatusReport>, String> {
        let content =
            fs::read_to_string(&self.path).map_err(|e| format!("Read error: {}", e))?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| format!("Parse error: {}", e))
    }
}

impl DataSource for FileSource {
    fn poll(&mut self) -> Option<StatusReport> {
        let modified = fs::metadata(&self.path).and_then(|m| m.modified()).ok();
        if !self.has_changed(modified) {
            return None;
        }

        match self.load() {
            Ok(Some(report)) => {
                tracing::debug!(path = %self.path.display(), hosts = report.len(), "read status file");
                self.last_error = None;
                self.last_modified = modified;
                Some(report)
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "status file unusable");
                self.last_error = Some(e);
                None
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Seek, Write};
    use tempfile::NamedTempFile;

    const REPORT: &str = r#"{
        "timestamp": 1000,
        "host": "monitor1",
        "version": "1.13",
        "hosts": [
            { "name": "web", "status": "up", "position": [47.61, -122.33] }
        ]
    }"#;

    #[test]
    fn test_description_names_path() {
        let source = FileSource::new("/tmp/status.json");
        assert_eq!(source.path(), Path::new("/tmp/status.json"));
        assert_eq!(source.description(), "file: /tmp/status.json");
        assert!(source.error().is_none());
    }

    #[test]
    fn test_reads_once_until_changed() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", REPORT).unwrap();

        let mut source = FileSource::new(file.path());

        let report = source.poll().expect("first poll reads the file");
        assert_eq!(report.snapshot.host, "monitor1");
        assert_eq!(report.hosts[0].name, "web");
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_rewritten_file_is_read_again() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", REPORT).unwrap();

        let mut source = FileSource::new(file.path());
        let _ = source.poll();

        std::thread::sleep(std::time::Duration::from_millis(10));
        file.rewind().unwrap();
        writeln!(
            file,
            r#"{{ "timestamp": 2000, "host": "monitor2", "version": "1.13", "hosts": [] }}"#
        )
        .unwrap();
        file.flush().unwrap();

        // Coarse mtime resolution can hide the rewrite
        if let Some(report) = source.poll() {
            assert_eq!(report.snapshot.timestamp, 2000);
        }
    }

    #[test]
    fn test_empty_file_is_not_an_error() {
        let file = NamedTempFile::new().unwrap();
        let mut source = FileSource::new(file.path());

        assert!(source.poll().is_none());
        assert!(source.error().is_none());
    }

    #[test]
    fn test_missing_file_reports_read_error() {
        let mut source = FileSource::new("/nonexistent/path/status.json");

        assert!(source.poll().is_none());
        assert!(source.error().unwrap().starts_with("Read error"));
    }

    #[test]
    fn test_malformed_json_reports_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{{\"timestamp\": \"soon\"}}").unwrap();

        let mut source = FileSource::new(file.path());

        assert!(source.poll().is_none());
        assert!(source.error().unwrap().starts_with("Parse error"));
    }
}
