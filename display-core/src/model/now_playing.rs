//! Now-playing track metadata

use serde::{Deserialize, Serialize};

/// Metadata for the track currently loaded in a zone
///
/// Replaced wholesale with the rest of the zone on every snapshot event.
/// Only `seek_position_seconds` is also updated in isolation, via the
/// lighter seek-only event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NowPlaying {
    /// Track title display line
    pub track_title: Option<String>,
    /// Artist display line
    pub artist_line: Option<String>,
    /// Album display line
    pub album_line: Option<String>,
    /// Opaque artwork identifier; equal keys imply identical artwork
    pub artwork_key: Option<String>,
    /// Total track duration in seconds
    #[serde(default)]
    pub length_seconds: u64,
    /// Current position in seconds, absent until the first seek report
    pub seek_position_seconds: Option<u64>,
}

impl NowPlaying {
    /// Create NowPlaying with a title
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            track_title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Check whether there is any content worth rendering
    pub fn is_empty(&self) -> bool {
        self.track_title.is_none() && self.artist_line.is_none() && self.album_line.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_title() {
        let np = NowPlaying::with_title("Blue in Green");
        assert_eq!(np.track_title, Some("Blue in Green".to_string()));
        assert!(!np.is_empty());
    }

    #[test]
    fn test_is_empty() {
        assert!(NowPlaying::default().is_empty());
    }
}
