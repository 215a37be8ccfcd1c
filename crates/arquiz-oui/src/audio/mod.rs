//! Audio feedback for the optical HUD
//!
//! Playback itself belongs to the backend; the HUD only names cues.

mod backend;
mod cue;

pub use backend::{AudioBackend, NullAudioBackend};
pub use cue::Cue;
