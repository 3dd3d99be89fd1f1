//! Outbound ports of the display core
//!
//! The controller emits every side effect through one of these traits, so
//! the core can be driven in tests by recording fakes and in production by
//! the real surface, switch, fetcher, and scheduler adapters.

use std::time::Duration;

use bytes::Bytes;

use crate::power::TimerKind;

/// Which artwork buffer is currently visible
///
/// Flips on every completed artwork render so the new image fades in over
/// the old one instead of replacing it with a blank frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceSlot {
    Front,
    Back,
}

impl FaceSlot {
    /// The slot that is currently hidden
    pub fn hidden(&self) -> FaceSlot {
        match self {
            FaceSlot::Front => FaceSlot::Back,
            FaceSlot::Back => FaceSlot::Front,
        }
    }
}

/// Track metadata lines for the surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackFields {
    pub title: String,
    pub artist_line: String,
    pub album_line: String,
    /// Total duration, preformatted as `m:ss`
    pub total_time: String,
}

/// Seek line and progress for the surface
#[derive(Debug, Clone, PartialEq)]
pub struct SeekDisplay {
    /// Elapsed time, preformatted as `m:ss`
    pub elapsed: String,
    /// Progress through the track, 0.0 to 100.0
    pub percent: f32,
}

/// A fetched artwork image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtworkImage {
    pub data: Bytes,
    pub content_type: String,
}

/// Render commands consumed by the physical or virtual display
pub trait PresentationSurface {
    fn set_track_fields(&mut self, fields: &TrackFields);
    fn set_seek(&mut self, seek: &SeekDisplay);
    /// Render artwork into the given (currently hidden) face slot
    fn render_artwork(&mut self, image: &ArtworkImage, into: FaceSlot);
    fn set_paused_visual(&mut self, visible: bool);
    fn set_connecting_visual(&mut self, visible: bool);
}

/// Backlight power switch, fire-and-forget
pub trait PowerSwitch {
    fn set_power(&mut self, on: bool);
}

/// Asynchronous artwork provider
///
/// `request` fires a fetch and returns immediately; the completion re-enters
/// the event loop as a message carrying the key and the result.
pub trait ArtworkSource {
    fn request(&mut self, key: &str);
}

/// Single-shot timer scheduler
///
/// At most one timer is outstanding at a time; arming replaces any previous
/// one. Fires must echo the epoch they were armed with.
pub trait TimerScheduler {
    fn arm(&mut self, kind: TimerKind, epoch: u64, after: Duration);
    fn cancel(&mut self);
}
