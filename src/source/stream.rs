//! Stream-based data source.
//!
//! Receives status reports from an async byte stream, typically a TCP
//! connection to the monitoring host.

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;

use super::{DataSource, StatusReport};

type SharedError = Arc<Mutex<Option<String>>>;

fn set_error(shared: &SharedError, message: Option<String>) {
    if let Ok(mut slot) = shared.lock() {
        *slot = message;
    }
}

/// A data source that receives status reports from an async stream.
///
/// A background task reads newline-delimited JSON from the reader, one
/// report per line, and hands parsed reports to `poll()`. Lines that do not
/// parse are skipped and recorded as the current error.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use hostwatch::StreamSource;
///
/// # tokio_test::block_on(async {
/// let data = b"{\"timestamp\":1,\"host\":\"h\",\"version\":\"v\"}\n";
/// let stream = Cursor::new(data.to_vec());
/// let source = StreamSource::spawn(stream, "example");
/// # });
/// ```
#[derive(Debug)]
pub struct StreamSource {
    receiver: mpsc::Receiver<StatusReport>,
    description: String,
    shared_error: SharedError,
    last_error: Option<String>,
}

impl StreamSource {
    /// Spawn a background task that reads from the given async reader.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<R>(reader: R, description: &str) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(16);
        let shared_error: SharedError = Arc::new(Mutex::new(None));
        let error_handle = shared_error.clone();
        let desc = description.to_string();

        tokio::spawn(async move {
            let mut reader = BufReader::new(reader);
            let mut line = String::new();

            loop {
                line.clear();
                match reader.read_line(&mut line).await {
                    Ok(0) => {
                        tracing::info!(source = %desc, "status stream closed");
                        set_error(&error_handle, Some("Connection closed".to_string()));
                        break;
                    }
                    Ok(_) => {
                        let trimmed = line.trim();
                        if trimmed.is_empty() {
                            continue;
                        }
                        match serde_json::from_str::<StatusReport>(trimmed) {
                            Ok(report) => {
                                set_error(&error_handle, None);
                                if tx.send(report).await.is_err() {
                                    break;
                                }
                            }
                            Err(e) => {
                                tracing::warn!(source = %desc, error = %e, "skipping unparseable report");
                                set_error(&error_handle, Some(format!("Parse error: {}", e)));
                            }
                        }
                    }
                    Err(e) => {
                        tracing::warn!(source = %desc, error = %e, "status stream read failed");
                        set_error(&error_handle, Some(format!("Read error: {}", e)));
                        break;
                    }
                }
            }
        });

        Self {
            receiver: rx,
            description: format!("stream: {}", description),
            shared_error,
            last_error: None,
        }
    }

    /// Create a StreamSource fed by a channel of raw JSON documents.
    pub fn from_bytes_channel(mut rx: mpsc::Receiver<Vec<u8>>, description: &str) -> Self {
        let (tx, report_rx) = mpsc::channel(16);
        let shared_error: SharedError = Arc::new(Mutex::new(None));
        let error_handle = shared_error.clone();

        tokio::spawn(async move {
            while let Some(bytes) = rx.recv().await {
                match serde_json::from_slice::<StatusReport>(&bytes) {
                    Ok(report) => {
                        set_error(&error_handle, None);
                        if tx.send(report).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        set_error(&error_handle, Some(format!("Parse error: {}", e)));
                    }
                }
            }
        });

        Self {
            receiver: report_rx,
            description: format!("stream: {}", description),
            shared_error,
            last_error: None,
        }
    }

    fn sync_error(&mut self) {
        if let Ok(slot) = self.shared_error.lock() {
            self.last_error = slot.clone();
        }
    }
}

impl DataSource for StreamSource {
    fn poll(&mut self) -> Option<StatusReport> {
        let result = match self.receiver.try_recv() {
            Ok(report) => Some(report),
            Err(mpsc::error::TryRecvError::Empty) => None,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                if let Ok(mut slot) = self.shared_error.lock() {
                    slot.get_or_insert_with(|| "Stream disconnected".to_string());
                }
                None
            }
        };
        self.sync_error();
        result
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
    use std::io::Cursor;

    fn sample_json() -> &'static str {
        r#"{"timestamp":1000,"host":"monitor1","version":"1.13","hosts":[{"name":"web","status":"up"}]}"#
    }

    #[tokio::test]
    async fn test_stream_source_spawn() {
        let data = format!("{}\n", sample_json());
        let mut source = StreamSource::spawn(Cursor::new(data), "test");

        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        let report = source.poll().expect("report from stream");
        assert_eq!(report.snapshot.host, "monitor1");
        assert_eq!(report.hosts[0].name, "web");
    }

    #[tokio::test]
    async fn test_stream_source_multiple_reports() {
        let data = format!("{}\n\n{}\n", sample_json(), sample_json());
        let mut source = StreamSource::spawn(Cursor::new(data), "test");

        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        assert!(source.poll().is_some());
        assert!(source.poll().is_some());
        assert!(source.poll().is_none());
    }

    #[tokio::test]
    async fn test_stream_source_description() {
        let source = StreamSource::spawn(Cursor::new(""), "tcp://localhost:9090");
        assert_eq!(source.description(), "stream: tcp://localhost:9090");
    }

    #[tokio::test]
    async fn test_stream_source_from_bytes_channel() {
        let (tx, rx) = mpsc::channel::<Vec<u8>>(16);
        let mut source = StreamSource::from_bytes_channel(rx, "test-channel");

        tx.send(sample_json().as_bytes().to_vec()).await.unwrap();
        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        assert_eq!(source.poll().unwrap().snapshot.timestamp, 1000);
    }

    #[tokio::test]
    async fn test_stream_source_reports_closed_connection() {
        let mut source = StreamSource::spawn(Cursor::new("not valid json\n"), "test");

        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        assert!(source.poll().is_none());
        // The parse error is overwritten once EOF is reached
        assert!(source.error().is_some());
    }
}
