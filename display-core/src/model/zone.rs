//! Zone snapshot type

use serde::{Deserialize, Deserializer, Serialize};

use super::{NowPlaying, PlaybackState, ZoneId};

/// Externally-reported state of a playback zone
///
/// A zone is replaced wholesale on every snapshot event; there is no field
/// merging beyond last-write-wins per message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// Stable zone identifier
    #[serde(alias = "zone_id")]
    pub id: ZoneId,
    /// Human-readable name, matched against the configured target zone
    pub display_name: String,
    /// Current transport state
    #[serde(alias = "state", deserialize_with = "lenient_playback_state", default)]
    pub playback_state: PlaybackState,
    /// Currently loaded track, absent when nothing is loaded
    #[serde(default)]
    pub now_playing: Option<NowPlaying>,
}

impl Zone {
    /// Artwork key of the loaded track, if any
    pub fn artwork_key(&self) -> Option<&str> {
        self.now_playing
            .as_ref()
            .and_then(|np| np.artwork_key.as_deref())
    }
}

/// Accept any transport string the player might report, mapping unknown
/// values to `Stopped` rather than rejecting the whole snapshot.
fn lenient_playback_state<'de, D>(deserializer: D) -> Result<PlaybackState, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(PlaybackState::from_state_str(&raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_wire_shape() {
        let zone: Zone = serde_json::from_str(
            r#"{
                "zone_id": "16010f",
                "display_name": "Office",
                "state": "playing",
                "now_playing": {
                    "track_title": "So What",
                    "artist_line": "Miles Davis",
                    "album_line": "Kind of Blue",
                    "artwork_key": "art-1",
                    "length_seconds": 562,
                    "seek_position_seconds": 14
                }
            }"#,
        )
        .unwrap();

        assert_eq!(zone.id, ZoneId::new("16010f"));
        assert_eq!(zone.display_name, "Office");
        assert_eq!(zone.playback_state, PlaybackState::Playing);
        assert_eq!(zone.artwork_key(), Some("art-1"));
    }

    #[test]
    fn test_deserialize_unknown_state_is_stopped() {
        let zone: Zone = serde_json::from_str(
            r#"{"zone_id": "z", "display_name": "Office", "state": "warbling"}"#,
        )
        .unwrap();
        assert_eq!(zone.playback_state, PlaybackState::Stopped);
        assert!(zone.now_playing.is_none());
    }

    #[test]
    fn test_artwork_key_absent_without_track() {
        let zone: Zone =
            serde_json::from_str(r#"{"zone_id": "z", "display_name": "Office", "state": "stopped"}"#)
                .unwrap();
        assert_eq!(zone.artwork_key(), None);
    }
}
