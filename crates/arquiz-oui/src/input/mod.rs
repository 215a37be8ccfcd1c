//! Input abstraction for the optical HUD
//!
//! Provides unified input events for:
//! - Head pose tracking
//! - Target tracking (found / lost) from the AR collaborator
//! - Fallback keyboard input (for terminal simulation)

mod event;
mod simulator;

pub use event::{OpticalEvent, TrackingEvent};
pub use simulator::InputSimulator;
