//! Display controller
//!
//! Composition root of the core: bridges raw zone events to the reconciler
//! and the power state machine, and issues render, power, and timer
//! commands through the outbound ports. Owns the single tracked zone and
//! the crossfade face slot.

use crate::error::ArtworkFetchError;
use crate::model::{NowPlaying, SeekUpdate, Zone};
use crate::ports::{
    ArtworkImage, ArtworkSource, FaceSlot, PowerSwitch, PresentationSurface, SeekDisplay,
    TimerScheduler, TrackFields,
};
use crate::power::{DisplayPowerState, PowerCommand, PowerStateMachine, PowerTimeouts, TimerKind};
use crate::reconciler;

/// Drives one display from one tracked zone
pub struct DisplayController<S, P, A, T>
where
    S: PresentationSurface,
    P: PowerSwitch,
    A: ArtworkSource,
    T: TimerScheduler,
{
    target_name: String,
    surface: S,
    power: P,
    artwork: A,
    scheduler: T,
    machine: PowerStateMachine,
    /// The tracked zone; only replaced by snapshots that resolve the target
    zone: Option<Zone>,
    visible_face: FaceSlot,
    /// Key of the most recently requested artwork fetch; completions for
    /// any other key are stale and discarded
    requested_artwork: Option<String>,
}

impl<S, P, A, T> DisplayController<S, P, A, T>
where
    S: PresentationSurface,
    P: PowerSwitch,
    A: ArtworkSource,
    T: TimerScheduler,
{
    pub fn new(
        target_name: impl Into<String>,
        timeouts: PowerTimeouts,
        surface: S,
        power: P,
        artwork: A,
        scheduler: T,
    ) -> Self {
        Self {
            target_name: target_name.into(),
            surface,
            power,
            artwork,
            scheduler,
            machine: PowerStateMachine::new(timeouts),
            zone: None,
            visible_face: FaceSlot::Front,
            requested_artwork: None,
        }
    }

    /// The currently tracked zone, if any
    pub fn zone(&self) -> Option<&Zone> {
        self.zone.as_ref()
    }

    pub fn power_state(&self) -> DisplayPowerState {
        self.machine.state()
    }

    pub fn visible_face(&self) -> FaceSlot {
        self.visible_face
    }

    /// Handle a full zone snapshot
    ///
    /// A snapshot that does not contain the target zone is logged and
    /// dropped without touching any state; the display only clears on an
    /// explicit no-zone signal.
    pub fn on_zone_snapshot(&mut self, candidates: Vec<Zone>) {
        let found = match reconciler::resolve_snapshot(&candidates, &self.target_name) {
            Ok(zone) => zone.clone(),
            Err(err) => {
                tracing::warn!(%err, "zone snapshot skipped, check target zone config");
                return;
            }
        };

        // Diff against the zone we were tracking before replacing it.
        let art_changed = reconciler::artwork_changed(self.zone.as_ref(), &found);

        let commands = self.machine.on_playback(found.playback_state);
        self.apply_commands(commands);

        self.zone = Some(found);

        let Some(np) = self.zone.as_ref().and_then(|z| z.now_playing.clone()) else {
            tracing::debug!("snapshot has no track loaded, nothing to render");
            return;
        };

        if art_changed {
            if let Some(key) = np.artwork_key.clone() {
                // Track fields render on completion, after the face flip,
                // so artwork and text update together.
                tracing::debug!(key, "artwork changed, fetching");
                self.requested_artwork = Some(key.clone());
                self.artwork.request(&key);
                return;
            }
            // Artwork disappeared; there is nothing to fetch and any
            // in-flight completion is now stale.
            self.requested_artwork = None;
        }

        self.render_track(&np);
    }

    /// Handle a seek-only event
    ///
    /// Renders only the seek line and progress; never touches track fields
    /// or artwork.
    pub fn on_seek(&mut self, updates: Vec<SeekUpdate>) {
        let Some(zone) = self.zone.as_mut() else {
            tracing::debug!("seek event with no tracked zone, dropped");
            return;
        };

        let position = match reconciler::resolve_seek_target(&updates, &zone.id) {
            Ok(position) => position,
            Err(err) => {
                tracing::debug!(%err, "seek update dropped");
                return;
            }
        };

        let Some(np) = zone.now_playing.as_mut() else {
            tracing::debug!("seek update for zone with no track loaded, dropped");
            return;
        };

        np.seek_position_seconds = Some(position);
        let seek = seek_display(position, np.length_seconds);
        self.surface.set_seek(&seek);
    }

    /// Handle an artwork fetch completion re-entering the event loop
    pub fn on_artwork_ready(&mut self, key: &str, result: Result<ArtworkImage, ArtworkFetchError>) {
        if self.requested_artwork.as_deref() != Some(key) {
            tracing::debug!(key, "stale artwork completion discarded");
            return;
        }
        self.requested_artwork = None;

        let Some(np) = self.zone.as_ref().and_then(|z| z.now_playing.clone()) else {
            return;
        };

        match result {
            Ok(image) => {
                let target = self.visible_face.hidden();
                self.surface.render_artwork(&image, target);
                self.visible_face = target;
            }
            Err(err) => {
                // Track fields must still render without the artwork.
                tracing::warn!(%err, "artwork fetch failed");
            }
        }

        self.render_track(&np);
    }

    /// Handle a timer fire re-entering the event loop
    pub fn on_timer_fired(&mut self, kind: TimerKind, epoch: u64) {
        let commands = self.machine.on_timer_fired(kind, epoch);
        self.apply_commands(commands);
    }

    /// The upstream connection is established
    pub fn on_source_connected(&mut self) {
        self.surface.set_connecting_visual(false);
    }

    /// The upstream connection is gone, the explicit no-zone signal
    ///
    /// Clears the tracked zone and shows the connecting visual. Power-off
    /// is never invoked from here; only the machine's own timers may cut
    /// power.
    pub fn on_source_lost(&mut self) {
        tracing::info!("event source lost, clearing display");
        self.zone = None;
        self.requested_artwork = None;
        self.surface.set_connecting_visual(true);
    }

    fn apply_commands(&mut self, commands: Vec<PowerCommand>) {
        for command in commands {
            match command {
                PowerCommand::ArmTimer { kind, epoch, after } => {
                    self.scheduler.arm(kind, epoch, after)
                }
                PowerCommand::CancelTimer => self.scheduler.cancel(),
                PowerCommand::ShowPausedVisual(visible) => self.surface.set_paused_visual(visible),
                PowerCommand::SetPower(on) => self.power.set_power(on),
            }
        }
    }

    fn render_track(&mut self, np: &NowPlaying) {
        let fields = TrackFields {
            title: np.track_title.clone().unwrap_or_default(),
            artist_line: np.artist_line.clone().unwrap_or_default(),
            album_line: np.album_line.clone().unwrap_or_default(),
            total_time: format_time(np.length_seconds),
        };
        self.surface.set_track_fields(&fields);

        if let Some(position) = np.seek_position_seconds {
            let seek = seek_display(position, np.length_seconds);
            self.surface.set_seek(&seek);
        }
    }
}

/// Format seconds as `m:ss`
fn format_time(total_seconds: u64) -> String {
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

fn seek_display(position: u64, length_seconds: u64) -> SeekDisplay {
    let percent = if length_seconds == 0 {
        0.0
    } else {
        (position as f32 / length_seconds as f32 * 100.0).clamp(0.0, 100.0)
    };
    SeekDisplay {
        elapsed: format_time(position),
        percent,
    }
}
