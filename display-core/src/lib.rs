//! Playback-to-display reconciliation engine
//!
//! The core of zone-display: consumes a stream of player/zone events,
//! decides what the display should show, and drives a cascading,
//! cancellable timeout state machine that powers the backlight off after a
//! period of inactivity and back on when playback resumes.
//!
//! # Architecture
//!
//! ```text
//! Raw payloads → Decoder → DisplayController → PresentationSurface
//!                              │    │              PowerSwitch
//!                        Reconciler │              ArtworkSource
//!                                   │              TimerScheduler
//!                          PowerStateMachine
//! ```
//!
//! All side effects leave through the port traits in [`ports`]; the
//! reconciler and state machine are pure decision logic, so the whole core
//! runs deterministically under test with recording fakes.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use display_core::{decode_zone_event, DisplayController, PowerTimeouts, ZoneEvent};
//!
//! let mut controller = DisplayController::new(
//!     "Office",
//!     PowerTimeouts::default(),
//!     surface,
//!     power_switch,
//!     artwork_source,
//!     scheduler,
//! );
//!
//! match decode_zone_event(&payload)? {
//!     ZoneEvent::Snapshot(zones) => controller.on_zone_snapshot(zones),
//!     ZoneEvent::Seek(updates) => controller.on_seek(updates),
//! }
//! ```
//!
//! # Concurrency model
//!
//! The controller is not re-entrant: every event (zone snapshots, seek
//! updates, timer fires, artwork completions) must be serialized onto one
//! event loop. Timer fires carry the epoch they were armed with, and the
//! state machine ignores stale epochs, so a fire that lost the race against
//! cancellation is harmless.

pub mod controller;
pub mod decoder;
pub mod error;
pub mod model;
pub mod ports;
pub mod power;
pub mod reconciler;

pub use controller::DisplayController;
pub use decoder::{decode_zone_event, ZoneEvent};
pub use error::{ArtworkFetchError, DecodeError, ReconcileError};
pub use model::{NowPlaying, PlaybackState, SeekUpdate, Zone, ZoneId};
pub use ports::{
    ArtworkImage, ArtworkSource, FaceSlot, PowerSwitch, PresentationSurface, SeekDisplay,
    TimerScheduler, TrackFields,
};
pub use power::{
    DisplayPowerState, PowerCommand, PowerStateMachine, PowerTimeouts, TimerKind,
};
