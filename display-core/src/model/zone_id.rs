//! Zone identity type

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, stable identifier for a playback zone
///
/// Reported by the player and treated as an opaque token; two events refer
/// to the same zone exactly when their ids compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZoneId(String);

impl ZoneId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ZoneId {
    fn from(s: &str) -> Self {
        ZoneId::new(s)
    }
}

impl From<String> for ZoneId {
    fn from(s: String) -> Self {
        ZoneId::new(s)
    }
}
