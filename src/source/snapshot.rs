//! Wire types for status reports.
//!
//! A status report is what the monitoring host writes after each run: a
//! snapshot header (when, by whom, which version) followed by the per-host
//! up/down states. Data sources deserialize these from JSON.

use serde::{Deserialize, Serialize};

/// Header of a status report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Seconds since the epoch, set by the server when the report was generated.
    pub timestamp: i64,
    /// Node that produced the report.
    pub host: String,
    /// Version of the reporting software.
    pub version: String,
}

/// A geographic coordinate, serialized as `[latitude, longitude]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<[f64; 2]> for Position {
    fn from([latitude, longitude]: [f64; 2]) -> Self {
        Self::new(latitude, longitude)
    }
}

impl From<Position> for [f64; 2] {
    fn from(p: Position) -> Self {
        [p.latitude, p.longitude]
    }
}

/// Reported state of a single monitored host.
///
/// The status is kept as the raw string from the feed. Anything other than
/// `up` or `down` is rejected when a marker is selected, not while parsing,
/// so one bad entry does not discard the whole report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostReport {
    pub name: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// A complete status report as delivered by a data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusReport {
    #[serde(flatten)]
    pub snapshot: Snapshot,
    #[serde(default)]
    pub hosts: Vec<HostReport>,
}

impl StatusReport {
    /// Number of hosts in the report.
    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_report() {
        let json = r#"{
            "timestamp": 1000,
            "host": "monitor1",
            "version": "1.13",
            "hosts": [
                { "name": "Aberdeen School District", "status": "up", "position": [46.9784, -123.816528] },
                { "name": "printer", "status": "down" }
            ]
        }"#;

        let report: StatusReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.snapshot.timestamp, 1000);
        assert_eq!(report.snapshot.host, "monitor1");
        assert_eq!(report.snapshot.version, "1.13");
        assert_eq!(report.len(), 2);

        let first = &report.hosts[0];
        assert_eq!(first.status, "up");
        assert_eq!(first.position, Some(Position::new(46.9784, -123.816528)));

        assert!(report.hosts[1].position.is_none());
    }

    #[test]
    fn test_hosts_default_to_empty() {
        let json = r#"{ "timestamp": 5, "host": "h", "version": "v" }"#;
        let report: StatusReport = serde_json::from_str(json).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn test_unknown_status_survives_parsing() {
        let json = r#"{ "timestamp": 5, "host": "h", "version": "v",
                        "hosts": [{ "name": "x", "status": "sideways" }] }"#;
        let report: StatusReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.hosts[0].status, "sideways");
    }

    #[test]
    fn test_position_serializes_as_pair() {
        let value = serde_json::to_value(Position::new(47.61, -122.33)).unwrap();
        assert_eq!(value, serde_json::json!([47.61, -122.33]));
    }
}
