//! Signal and status types
//!
//! Wire types for the `/pulse` endpoint. `Signal` is the statically validated
//! request body; `PulseReceipt` is the response returned for every accepted
//! pulse.

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_SECTOR, PAIN_STATE};

/// A pulse reported by an agent
///
/// `sector` defaults to "general" when the body omits it. `agent_id` is an
/// opaque identifier; no uniqueness is enforced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    /// Opaque agent identifier
    pub agent_id: String,
    /// Free-form state label, e.g. HUNGER, DIZZY, PAIN
    pub state: String,
    /// Logical grouping key for the signal
    #[serde(default = "default_sector")]
    pub sector: String,
}

fn default_sector() -> String {
    DEFAULT_SECTOR.to_string()
}

impl Signal {
    /// Whether this signal qualifies for a window write (exact match)
    pub fn is_pain(&self) -> bool {
        self.state == PAIN_STATE
    }
}

/// Coarse sector classification derived from the pain level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HiveStatus {
    Calm,
    Panic,
}

impl std::fmt::Display for HiveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HiveStatus::Calm => write!(f, "CALM"),
            HiveStatus::Panic => write!(f, "PANIC"),
        }
    }
}

/// Response body for an accepted pulse
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PulseReceipt {
    /// Always "Received" for a 200 response
    pub your_status: String,
    /// Sector classification at read time
    pub hive_status: HiveStatus,
    /// Count of matching entries in the assessed window span
    pub pain_level: usize,
}

impl PulseReceipt {
    pub fn new(hive_status: HiveStatus, pain_level: usize) -> Self {
        Self {
            your_status: "Received".to_string(),
            hive_status,
            pain_level,
        }
    }
}
