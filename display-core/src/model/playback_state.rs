//! Playback state enumeration

use serde::{Deserialize, Serialize};

/// Current playback state of a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// Currently playing audio
    Playing,
    /// Playback is paused
    Paused,
    /// Playback is stopped
    Stopped,
    /// A track is being loaded or buffered
    Loading,
}

impl PlaybackState {
    /// Parse from the player's transport state string
    ///
    /// Handles the wire values the player reports:
    /// - "playing"
    /// - "paused"
    /// - "stopped"
    /// - "loading"
    ///
    /// Unknown values map to `Stopped`.
    pub fn from_state_str(state: &str) -> Self {
        match state.to_lowercase().as_str() {
            "playing" => PlaybackState::Playing,
            "paused" => PlaybackState::Paused,
            "loading" => PlaybackState::Loading,
            _ => PlaybackState::Stopped,
        }
    }

    /// Whether audio is actively playing
    pub fn is_playing(&self) -> bool {
        matches!(self, PlaybackState::Playing)
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        PlaybackState::Stopped
    }
}
