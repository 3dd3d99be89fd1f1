//! Zone reconciliation
//!
//! Pure functions that map incoming event payloads to the single tracked
//! zone and detect the content changes that matter for rendering. No hidden
//! state; callers decide what to do with a miss.

use crate::error::ReconcileError;
use crate::model::{SeekUpdate, Zone, ZoneId};

/// Select the zone whose display name matches the configured target
///
/// Returns the first match. A miss leaves the previously tracked zone
/// untouched at the caller: the display is only cleared on an explicit
/// no-zone signal, never on a transient mismatch.
pub fn resolve_snapshot<'a>(
    candidates: &'a [Zone],
    target_name: &str,
) -> Result<&'a Zone, ReconcileError> {
    candidates
        .iter()
        .find(|zone| zone.display_name == target_name)
        .ok_or_else(|| ReconcileError::ZoneNotFound {
            target: target_name.to_string(),
            candidates: candidates.len(),
        })
}

/// Select the seek position belonging to the tracked zone
pub fn resolve_seek_target(
    updates: &[SeekUpdate],
    tracked: &ZoneId,
) -> Result<u64, ReconcileError> {
    updates
        .iter()
        .find(|update| update.zone_id == *tracked)
        .map(|update| update.seek_position_seconds)
        .ok_or_else(|| ReconcileError::SeekTargetUnknown {
            tracked: tracked.clone(),
        })
}

/// Whether the artwork differs between the previous and current snapshot
///
/// True when there is no previous zone, the previous zone had no track
/// loaded, or the artwork keys differ, including one side being absent
/// while the other is present.
pub fn artwork_changed(previous: Option<&Zone>, current: &Zone) -> bool {
    match previous.and_then(|zone| zone.now_playing.as_ref()) {
        None => true,
        Some(prev_np) => prev_np.artwork_key.as_deref() != current.artwork_key(),
    }
}
