//! Frame context passed to widgets during update

use std::time::Duration;

/// Display context for the current frame
#[derive(Debug, Clone)]
pub struct DisplayContext {
    /// Time since app start
    pub time: Duration,
    /// Time since last frame
    pub delta_time: Duration,
    /// Current tick count
    pub tick: u64,
}

impl Default for DisplayContext {
    fn default() -> Self {
        Self {
            time: Duration::ZERO,
            delta_time: Duration::ZERO,
            tick: 0,
        }
    }
}

impl DisplayContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the context by one frame of length `dt`
    pub fn update(&mut self, dt: Duration) {
        self.delta_time = dt;
        self.time += dt;
        self.tick = self.tick.wrapping_add(1);
    }
}
