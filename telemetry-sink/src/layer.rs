//! `tracing` layer adapter for the telemetry sink

use std::fmt;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::TelemetrySink;

/// Forwards every log event's message to the telemetry sink
///
/// Attach with `.with(TelemetryLayer::new(sink))` when building the
/// subscriber; the collector then receives the same stream the local
/// formatter prints.
pub struct TelemetryLayer {
    sink: TelemetrySink,
}

impl TelemetryLayer {
    pub fn new(sink: TelemetrySink) -> Self {
        Self { sink }
    }
}

impl<S: Subscriber> Layer<S> for TelemetryLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        // The sink's own writer logs its connection state; forwarding those
        // lines back into the sink would loop during an outage.
        if event.metadata().target().starts_with("telemetry_sink") {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        if let Some(message) = visitor.message {
            let line = format!("{} {}", event.metadata().level(), message);
            self.sink.send_log(&line);
        }
    }
}

/// Extracts the `message` field from an event
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{:?}", value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncBufReadExt, BufReader};
    use tokio::net::TcpListener;
    use tracing_subscriber::layer::SubscriberExt;

    #[tokio::test]
    async fn test_events_reach_the_collector() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let sink = TelemetrySink::spawn("127.0.0.1", port, "layer-test");
        let subscriber = tracing_subscriber::registry().with(TelemetryLayer::new(sink));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("zone resolved");
        });

        let (stream, _) = listener.accept().await.unwrap();
        let mut lines = BufReader::new(stream).lines();
        let line = lines.next_line().await.unwrap().unwrap();
        let message: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(message["source"], "layer-test");
        assert_eq!(message["message"], "INFO zone resolved");
    }
}
