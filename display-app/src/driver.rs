//! Single-consumer event loop
//!
//! Every event in the system (zone payloads, timer fires, artwork
//! completions, connection edges) arrives as an [`AppEvent`] on one
//! channel and is dispatched to the controller in order. This is the only
//! place core state is mutated, which is what makes the epoch-guarded
//! timers and the stale-artwork check race-free.

use tokio::sync::mpsc;

use display_core::{
    decode_zone_event, ArtworkFetchError, ArtworkImage, ArtworkSource, DisplayController,
    PowerSwitch, PresentationSurface, TimerKind, TimerScheduler, ZoneEvent,
};

/// An event serialized onto the loop
#[derive(Debug)]
pub enum AppEvent {
    /// Raw payload from the event source, not yet decoded
    Payload(serde_json::Value),
    /// Upstream connection established
    SourceConnected,
    /// Upstream connection gone
    SourceLost,
    /// A scheduled timer elapsed
    TimerFired { kind: TimerKind, epoch: u64 },
    /// An artwork fetch finished
    ArtworkReady {
        key: String,
        result: Result<ArtworkImage, ArtworkFetchError>,
    },
}

/// Run the loop until every sender is gone
pub async fn run_event_loop<S, P, A, T>(
    mut controller: DisplayController<S, P, A, T>,
    mut rx: mpsc::UnboundedReceiver<AppEvent>,
) where
    S: PresentationSurface,
    P: PowerSwitch,
    A: ArtworkSource,
    T: TimerScheduler,
{
    while let Some(event) = rx.recv().await {
        match event {
            AppEvent::Payload(payload) => match decode_zone_event(&payload) {
                Ok(ZoneEvent::Snapshot(zones)) => controller.on_zone_snapshot(zones),
                Ok(ZoneEvent::Seek(updates)) => controller.on_seek(updates),
                Err(err) => tracing::warn!(%err, "event payload dropped"),
            },
            AppEvent::SourceConnected => controller.on_source_connected(),
            AppEvent::SourceLost => controller.on_source_lost(),
            AppEvent::TimerFired { kind, epoch } => controller.on_timer_fired(kind, epoch),
            AppEvent::ArtworkReady { key, result } => controller.on_artwork_ready(&key, result),
        }
    }

    tracing::info!("event loop stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use display_core::{
        DisplayPowerState, PlaybackState, PowerTimeouts, SeekDisplay, TrackFields, Zone, ZoneId,
    };

    use crate::scheduler::TokioScheduler;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Paused(bool),
        Power(bool),
        TrackFields,
        Seek,
        Artwork,
        ArtRequest,
        Connecting(bool),
    }

    #[derive(Clone, Default)]
    struct SharedRecorder {
        calls: Arc<Mutex<Vec<Call>>>,
    }

    impl SharedRecorder {
        fn push(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }

        fn count(&self, call: &Call) -> usize {
            self.calls.lock().unwrap().iter().filter(|c| *c == call).count()
        }
    }

    impl PresentationSurface for SharedRecorder {
        fn set_track_fields(&mut self, _fields: &TrackFields) {
            self.push(Call::TrackFields);
        }
        fn set_seek(&mut self, _seek: &SeekDisplay) {
            self.push(Call::Seek);
        }
        fn render_artwork(&mut self, _image: &ArtworkImage, _into: display_core::FaceSlot) {
            self.push(Call::Artwork);
        }
        fn set_paused_visual(&mut self, visible: bool) {
            self.push(Call::Paused(visible));
        }
        fn set_connecting_visual(&mut self, visible: bool) {
            self.push(Call::Connecting(visible));
        }
    }

    impl PowerSwitch for SharedRecorder {
        fn set_power(&mut self, on: bool) {
            self.push(Call::Power(on));
        }
    }

    impl ArtworkSource for SharedRecorder {
        fn request(&mut self, _key: &str) {
            self.push(Call::ArtRequest);
        }
    }

    type Ctl = DisplayController<SharedRecorder, SharedRecorder, SharedRecorder, TokioScheduler>;

    fn office(state: PlaybackState) -> Zone {
        Zone {
            id: ZoneId::new("1"),
            display_name: "Office".to_string(),
            playback_state: state,
            now_playing: None,
        }
    }

    fn build(
        rec: &SharedRecorder,
    ) -> (Ctl, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let controller = DisplayController::new(
            "Office",
            PowerTimeouts {
                pause_timeout: Duration::from_secs(30),
                display_off_timeout: Duration::from_secs(60),
            },
            rec.clone(),
            rec.clone(),
            rec.clone(),
            TokioScheduler::new(tx),
        );
        (controller, rx)
    }

    /// Dispatch any stale timer fires sitting in the channel; the epoch
    /// guard must make them no-ops.
    fn drain_fires(controller: &mut Ctl, rx: &mut mpsc::UnboundedReceiver<AppEvent>) {
        while let Ok(event) = rx.try_recv() {
            if let AppEvent::TimerFired { kind, epoch } = event {
                controller.on_timer_fired(kind, epoch);
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_unattended_pause_powers_off_after_both_grace_periods() {
        let rec = SharedRecorder::default();
        let (mut controller, mut rx) = build(&rec);

        controller.on_zone_snapshot(vec![office(PlaybackState::Paused)]);
        assert_eq!(controller.power_state(), DisplayPowerState::PendingIdle);

        // Paused clock auto-advances to the idle deadline (t0+30s).
        match rx.recv().await {
            Some(AppEvent::TimerFired { kind, epoch }) => controller.on_timer_fired(kind, epoch),
            other => panic!("expected idle fire, got {:?}", other),
        }
        assert_eq!(controller.power_state(), DisplayPowerState::PendingOff);
        assert_eq!(rec.count(&Call::Paused(true)), 1);
        assert_eq!(rec.count(&Call::Power(false)), 0);

        // ...then to the power-off deadline (t0+90s).
        match rx.recv().await {
            Some(AppEvent::TimerFired { kind, epoch }) => controller.on_timer_fired(kind, epoch),
            other => panic!("expected power-off fire, got {:?}", other),
        }
        assert_eq!(controller.power_state(), DisplayPowerState::Off);
        assert_eq!(rec.count(&Call::Power(false)), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_brief_pause_never_shows_visual_or_cuts_power() {
        let rec = SharedRecorder::default();
        let (mut controller, mut rx) = build(&rec);

        controller.on_zone_snapshot(vec![office(PlaybackState::Playing)]);
        controller.on_zone_snapshot(vec![office(PlaybackState::Paused)]);

        // Resume just inside the grace period.
        tokio::time::advance(Duration::from_secs(29)).await;
        controller.on_zone_snapshot(vec![office(PlaybackState::Playing)]);
        assert_eq!(controller.power_state(), DisplayPowerState::Active);

        tokio::time::advance(Duration::from_secs(300)).await;
        tokio::task::yield_now().await;
        drain_fires(&mut controller, &mut rx);

        assert_eq!(controller.power_state(), DisplayPowerState::Active);
        assert_eq!(rec.count(&Call::Paused(true)), 0);
        assert_eq!(rec.count(&Call::Power(false)), 0);
        assert_eq!(rec.count(&Call::Power(true)), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_resume_after_paused_visual_never_cuts_power() {
        let rec = SharedRecorder::default();
        let (mut controller, mut rx) = build(&rec);

        controller.on_zone_snapshot(vec![office(PlaybackState::Paused)]);
        match rx.recv().await {
            Some(AppEvent::TimerFired { kind, epoch }) => controller.on_timer_fired(kind, epoch),
            other => panic!("expected idle fire, got {:?}", other),
        }
        assert_eq!(controller.power_state(), DisplayPowerState::PendingOff);

        // Resume while the power-off timer is armed. The switch must never
        // be told to cut power, even after the armed power-off duration
        // elapses.
        controller.on_zone_snapshot(vec![office(PlaybackState::Playing)]);
        assert_eq!(controller.power_state(), DisplayPowerState::Active);
        assert_eq!(rec.count(&Call::Paused(false)), 1);

        tokio::time::advance(Duration::from_secs(600)).await;
        tokio::task::yield_now().await;
        drain_fires(&mut controller, &mut rx);

        assert_eq!(controller.power_state(), DisplayPowerState::Active);
        assert_eq!(rec.count(&Call::Power(false)), 0);
    }
}
