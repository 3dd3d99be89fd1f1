//! Data model types for the display core

mod now_playing;
mod playback_state;
mod seek;
mod zone;
mod zone_id;

pub use now_playing::NowPlaying;
pub use playback_state::PlaybackState;
pub use seek::SeekUpdate;
pub use zone::Zone;
pub use zone_id::ZoneId;
