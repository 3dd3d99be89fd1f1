//! Event source client
//!
//! Maintains the connection to the player core's event feed: newline-
//! delimited JSON payloads over TCP. Each payload is forwarded to the
//! event loop undecoded; connection edges are forwarded as
//! `SourceConnected` / `SourceLost` so the controller can drive the
//! connecting visual. Reconnects forever with a fixed backoff; a dead
//! core must never take the process down.

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::driver::AppEvent;

const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Spawn the feed client task
pub fn spawn_source(
    host: String,
    port: u16,
    tx: mpsc::UnboundedSender<AppEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match TcpStream::connect((host.as_str(), port)).await {
                Ok(stream) => {
                    tracing::info!(%host, port, "connected to event source");
                    if tx.send(AppEvent::SourceConnected).is_err() {
                        return;
                    }

                    read_feed(stream, &tx).await;

                    tracing::warn!("event source connection lost");
                    if tx.send(AppEvent::SourceLost).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    tracing::debug!(%host, port, %err, "event source unreachable, retrying");
                }
            }

            tokio::time::sleep(RECONNECT_DELAY).await;
        }
    })
}

/// Read payload lines until the stream ends or errors
async fn read_feed(stream: TcpStream, tx: &mpsc::UnboundedSender<AppEvent>) {
    let mut lines = BufReader::new(stream).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str(&line) {
                    Ok(payload) => {
                        if tx.send(AppEvent::Payload(payload)).is_err() {
                            return;
                        }
                    }
                    Err(err) => tracing::warn!(%err, "unparseable feed line dropped"),
                }
            }
            Ok(None) => return,
            Err(err) => {
                tracing::warn!(%err, "feed read failed");
                return;
            }
        }
    }
}
