//! Named sound cues

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sound cue types a backend knows how to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    /// UI click/tap
    Click,
    /// Action confirmed / answer accepted
    Confirm,
    /// Error / answer rejected
    Error,
    /// A tracked target came into view
    TargetAcquired,
    /// A tracked target left the view
    TargetLost,
}

impl Cue {
    pub fn name(&self) -> &'static str {
        match self {
            Cue::Click => "click",
            Cue::Confirm => "confirm",
            Cue::Error => "error",
            Cue::TargetAcquired => "target_acquired",
            Cue::TargetLost => "target_lost",
        }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
