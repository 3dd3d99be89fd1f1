//! Tokio-backed timer scheduler
//!
//! Arms single-shot timers as detached sleep tasks whose fires re-enter
//! the event loop as [`AppEvent::TimerFired`] messages. Arming replaces
//! any outstanding timer; cancel aborts it outright. The state machine's
//! epoch guard makes the unavoidable race (a fire already in the channel
//! when the abort lands) harmless.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use display_core::{TimerKind, TimerScheduler};

use crate::driver::AppEvent;

pub struct TokioScheduler {
    tx: mpsc::UnboundedSender<AppEvent>,
    armed: Option<JoinHandle<()>>,
}

impl TokioScheduler {
    pub fn new(tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self { tx, armed: None }
    }
}

impl TimerScheduler for TokioScheduler {
    fn arm(&mut self, kind: TimerKind, epoch: u64, after: Duration) {
        self.cancel();
        let tx = self.tx.clone();
        self.armed = Some(tokio::spawn(async move {
            tokio::time::sleep(after).await;
            let _ = tx.send(AppEvent::TimerFired { kind, epoch });
        }));
    }

    fn cancel(&mut self) {
        if let Some(armed) = self.armed.take() {
            armed.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
