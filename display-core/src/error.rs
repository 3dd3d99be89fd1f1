//! Error types for the display core

use thiserror::Error;

use crate::model::ZoneId;

/// Errors from zone resolution and diffing
///
/// None of these are fatal: the caller logs and leaves the display state
/// untouched.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The configured target zone name did not match any candidate
    #[error("target zone \"{target}\" not found in snapshot of {candidates} zone(s)")]
    ZoneNotFound { target: String, candidates: usize },

    /// A seek event carried no entry for the tracked zone
    #[error("seek update does not reference tracked zone {tracked}")]
    SeekTargetUnknown { tracked: ZoneId },
}

/// A failed artwork fetch
///
/// Logged only: track fields still render and power state is unaffected.
#[derive(Debug, Error)]
#[error("artwork fetch for key \"{key}\" failed: {reason}")]
pub struct ArtworkFetchError {
    pub key: String,
    pub reason: String,
}

/// Errors from decoding raw event payloads
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Payload matched neither the snapshot nor the seek shape
    #[error("payload matches no known event shape: {0}")]
    MalformedEvent(String),

    /// A recognized payload failed to deserialize
    #[error("failed to deserialize {shape} payload: {source}")]
    Deserialize {
        shape: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
