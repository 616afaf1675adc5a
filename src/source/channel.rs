//! Channel-based data source.
//!
//! Receives status reports via a tokio watch channel, for embedding the
//! dashboard in a process that already has the reports in memory.

use tokio::sync::watch;

use super::{DataSource, StatusReport};

/// A data source that receives status reports via a channel.
///
/// The channel starts empty; `poll` returns nothing until the producer
/// sends the first report.
///
/// # Example
///
/// ```
/// use hostwatch::ChannelSource;
///
/// let (tx, source) = ChannelSource::create("in-process");
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<Option<StatusReport>>,
    description: String,
}

impl ChannelSource {
    /// Create a new channel source from the receiving end of a watch channel.
    pub fn new(receiver: watch::Receiver<Option<StatusReport>>, source_description: &str) -> Self {
        Self {
            receiver,
            description: format!("channel: {}", source_description),
        }
    }

    /// Create a channel pair. The sender pushes reports, the source is
    /// handed to the dashboard.
    pub fn create(source_description: &str) -> (watch::Sender<Option<StatusReport>>, Self) {
        let (tx, rx) = watch::channel(None);
        (tx, Self::new(rx, source_description))
    }
}

impl DataSource for ChannelSource {
    fn poll(&mut self) -> Option<StatusReport> {
        if self.receiver.has_changed().unwrap_or(false) {
            self.receiver.borrow_and_update().clone()
        } else {
            None
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        None
    }
}
