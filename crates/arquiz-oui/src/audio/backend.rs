//! Audio backend trait

use super::Cue;

/// Audio backend trait for the optical HUD
pub trait AudioBackend: Send {
    /// Fire a one-shot cue
    fn play(&mut self, cue: Cue);

    /// Set master volume (0.0 - 1.0)
    fn set_volume(&mut self, volume: f32);

    /// Check if audio output is available
    fn is_available(&self) -> bool;
}

/// Null audio backend (no-op)
pub struct NullAudioBackend;

impl AudioBackend for NullAudioBackend {
    fn play(&mut self, _cue: Cue) {}
    fn set_volume(&mut self, _volume: f32) {}
    fn is_available(&self) -> bool {
        false
    }
}
