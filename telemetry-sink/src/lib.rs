//! Best-effort network log sink
//!
//! Forwards log lines to a remote collector as one JSON object per line
//! over TCP. Messages sent before the connection is established are queued
//! and flushed in their original order once it opens; after that they are
//! written immediately. There is no acknowledgment and no backpressure
//! back to the caller: `send_log` never blocks and never fails.
//!
//! A [`TelemetryLayer`] adapter is provided so the sink can be attached to
//! the `tracing` subscriber and receive the whole program's log stream.

use std::time::Duration;

use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::sync::mpsc;

mod layer;

pub use layer::TelemetryLayer;

/// A log line with its source/emitter label attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogMessage {
    pub source: String,
    pub message: String,
}

/// Delay between connection attempts to the collector
const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Handle for sending log lines to the collector
///
/// Cheap to clone; all clones feed the same writer task. The unbounded
/// channel doubles as the pre-connection queue, which preserves send order
/// across the connect.
#[derive(Debug, Clone)]
pub struct TelemetrySink {
    tx: mpsc::UnboundedSender<LogMessage>,
    source: String,
}

impl TelemetrySink {
    /// Spawn the background writer and return the sending handle
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(host: &str, port: u16, source: impl Into<String>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let address = format!("{}:{}", host, port);
        tokio::spawn(run_writer(address, rx));
        Self {
            tx,
            source: source.into(),
        }
    }

    /// Queue a log line for delivery; never blocks, never fails
    pub fn send_log(&self, text: &str) {
        let message = LogMessage {
            source: self.source.clone(),
            message: text.to_string(),
        };
        // The receiver only disappears at shutdown; dropping is fine then.
        let _ = self.tx.send(message);
    }
}

/// Writer task: connect, then drain the queue for the life of the socket
///
/// Connect failures retry with a fixed delay while messages keep queueing.
/// Write failures drop the message and go back to connecting: delivery is
/// best-effort, a failed line is never retried.
async fn run_writer(address: String, mut rx: mpsc::UnboundedReceiver<LogMessage>) {
    loop {
        let mut stream = match TcpStream::connect(&address).await {
            Ok(stream) => {
                tracing::debug!(%address, "telemetry collector connected");
                stream
            }
            Err(err) => {
                tracing::debug!(%address, %err, "telemetry collector unreachable, retrying");
                tokio::time::sleep(RECONNECT_DELAY).await;
                continue;
            }
        };

        while let Some(message) = rx.recv().await {
            match encode(&message) {
                Ok(line) => {
                    if let Err(err) = stream.write_all(&line).await {
                        tracing::debug!(%err, "telemetry write failed, reconnecting");
                        break;
                    }
                }
                Err(err) => tracing::debug!(%err, "telemetry message not serializable, dropped"),
            }
        }

        // Channel closed: all senders gone, shut the writer down.
        if rx.is_closed() && rx.is_empty() {
            return;
        }
    }
}

fn encode(message: &LogMessage) -> Result<Vec<u8>, serde_json::Error> {
    let mut line = serde_json::to_vec(message)?;
    line.push(b'\n');
    Ok(line)
}
