//! Seek-only update type

use serde::{Deserialize, Serialize};

use super::ZoneId;

/// Lightweight playback-position update for an already-known zone
///
/// Carried by the seek-only event; must never trigger artwork or
/// track-field re-rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeekUpdate {
    /// Zone the position belongs to
    pub zone_id: ZoneId,
    /// Current position in seconds
    pub seek_position_seconds: u64,
}
