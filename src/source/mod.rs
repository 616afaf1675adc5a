//! Data source abstraction for receiving status reports.
//!
//! This module provides a trait-based abstraction for receiving reports
//! from a file written by the monitoring host, a TCP stream, or an
//! in-process channel.

mod channel;
mod file;
mod snapshot;
mod stream;

pub use channel::ChannelSource;
pub use file::FileSource;
pub use snapshot::{HostReport, Position, Snapshot, StatusReport};
pub use stream::StreamSource;

use std::fmt::Debug;

/// Trait for receiving status reports from various sources.
///
/// # Example
///
/// ```
/// use hostwatch::{DataSource, FileSource};
///
/// let mut source = FileSource::new("status.json");
/// if let Some(report) = source.poll() {
///     println!("Got {} hosts", report.len());
/// }
/// ```
pub trait DataSource: Send + Debug {
    /// Poll for the latest report.
    ///
    /// Returns `Some(report)` if a new report is available, `None` otherwise.
    /// This method must not block.
    fn poll(&mut self) -> Option<StatusReport>;

    /// Returns a human-readable description of the source.
    fn description(&self) -> &str;

    /// Returns the error message from the last poll, if any.
    fn error(&self) -> Option<&str>;
}
