//! Unified optical input events

use crossterm::event::KeyEvent;

use crate::spatial::Pose;

/// Found/lost notification from whatever tracking technology is in use
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackingEvent {
    /// The target with this id came into view
    Found(String),
    /// The target with this id left the view
    Lost(String),
}

impl TrackingEvent {
    pub fn target_id(&self) -> &str {
        match self {
            TrackingEvent::Found(id) | TrackingEvent::Lost(id) => id,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, TrackingEvent::Found(_))
    }
}

/// Unified input event for the optical HUD
#[derive(Debug, Clone)]
pub enum OpticalEvent {
    /// Head position/orientation changed
    HeadPose { pose: Pose },

    /// Target tracking changed
    Tracking(TrackingEvent),

    /// Fallback keyboard input
    Key(KeyEvent),

    /// Regular frame tick
    Tick,

    /// Terminal/window resized
    Resize { width: u32, height: u32 },
}

impl OpticalEvent {
    pub fn is_tick(&self) -> bool {
        matches!(self, OpticalEvent::Tick)
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self, OpticalEvent::Tracking(_))
    }
}
