//! Audio backends for the hosts.

use std::io::Write;

use arquiz_oui::{AudioBackend, Cue};
use tracing::info;

/// Rings the terminal bell for verdict cues
pub struct TerminalBell {
    volume: f32,
}

impl TerminalBell {
    pub fn new(volume: f32) -> Self {
        Self {
            volume: volume.clamp(0.0, 1.0),
        }
    }
}

impl AudioBackend for TerminalBell {
    fn play(&mut self, cue: Cue) {
        if self.volume <= 0.0 {
            return;
        }
        // one ring for a confirmation, two for anything else
        let rings = if cue == Cue::Confirm { "\x07" } else { "\x07\x07" };
        let mut stdout = std::io::stdout();
        let _ = stdout.write_all(rings.as_bytes());
        let _ = stdout.flush();
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Writes each cue to the log instead of playing it
#[derive(Default)]
pub struct LogAudio {
    volume: f32,
}

impl AudioBackend for LogAudio {
    fn play(&mut self, cue: Cue) {
        info!(cue = %cue, volume = self.volume, "Audio cue");
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn is_available(&self) -> bool {
        true
    }
}
