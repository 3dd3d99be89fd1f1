//! Console presentation surface
//!
//! A development stand-in for the physical panel: every render command is
//! written to the log, so the full pipeline can run on a workstation with
//! no display hardware attached. The appliance build swaps in a real
//! surface behind the same trait.

use display_core::{ArtworkImage, FaceSlot, PresentationSurface, SeekDisplay, TrackFields};

pub struct ConsoleSurface {
    /// Carried through from config; a real surface uses it to overlay a
    /// dithering texture on artwork
    dithering: bool,
}

impl ConsoleSurface {
    pub fn new(dithering: bool) -> Self {
        Self { dithering }
    }
}

impl PresentationSurface for ConsoleSurface {
    fn set_track_fields(&mut self, fields: &TrackFields) {
        tracing::info!(
            title = %fields.title,
            artist = %fields.artist_line,
            album = %fields.album_line,
            total = %fields.total_time,
            "track fields",
        );
    }

    fn set_seek(&mut self, seek: &SeekDisplay) {
        tracing::debug!(elapsed = %seek.elapsed, percent = seek.percent, "seek");
    }

    fn render_artwork(&mut self, image: &ArtworkImage, into: FaceSlot) {
        tracing::info!(
            bytes = image.data.len(),
            content_type = %image.content_type,
            face = ?into,
            dithering = self.dithering,
            "artwork",
        );
    }

    fn set_paused_visual(&mut self, visible: bool) {
        tracing::info!(visible, "paused visual");
    }

    fn set_connecting_visual(&mut self, visible: bool) {
        tracing::info!(visible, "connecting visual");
    }
}
