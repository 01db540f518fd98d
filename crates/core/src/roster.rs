//! Duty and bug-triage rosters.
//!
//! Rosters are read-only process-wide configuration, loaded once from a TOML
//! file at startup. Order is significant: it defines the rotation sequence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::OncallError;

/// One person eligible for a rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: u32,
    pub name: String,
}

/// Roster file contents: the primary duty roster and the smaller
/// bug-triage roster.
///
/// ```toml
/// [[duty]]
/// id = 1
/// name = "武恒"
///
/// [[bug]]
/// id = 1
/// name = "张笑笑"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterConfig {
    #[serde(default)]
    pub duty: Vec<Person>,
    #[serde(default)]
    pub bug: Vec<Person>,
}

impl RosterConfig {
    /// Load rosters from a TOML file.
    pub fn load(path: &Path) -> Result<Self, OncallError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            OncallError::Config(format!("cannot read roster file {}: {}", path.display(), e))
        })?;
        toml::from_str(&raw)
            .map_err(|e| OncallError::Config(format!("invalid roster file {}: {}", path.display(), e)))
    }

    /// Startup validation: an empty duty roster is fatal, an empty bug roster
    /// only disables the secondary rotation.
    pub fn validate(&self) -> Result<(), OncallError> {
        if self.duty.is_empty() {
            return Err(OncallError::EmptyRoster);
        }
        if self.bug.is_empty() {
            tracing::warn!("bug-triage roster is empty, assignment lookups will return nothing");
        }
        Ok(())
    }
}
