//! arquiz-oui: optical HUD toolkit for the arquiz AR quiz
//!
//! This crate provides the host-side plumbing the quiz runs on:
//! - Right-handed spatial primitives and viewer poses
//! - Audio cue backend abstraction
//! - Abstract render backend with a terminal simulation backend
//! - Input events for head pose and target tracking, plus a keyboard simulator
//! - HUD panels, world labels and world markers
//! - A tick-driven application runner

pub mod spatial;
pub mod audio;
pub mod renderer;
pub mod input;
pub mod widget;
pub mod context;
pub mod app;

// Re-export commonly used types
pub use spatial::{Pose, Rotation, Vec3};
pub use audio::{AudioBackend, Cue, NullAudioBackend};
pub use renderer::{Color, RenderBackend, RenderGlyph};
pub use input::{OpticalEvent, TrackingEvent};
pub use widget::OpticalWidget;
pub use context::DisplayContext;
pub use app::OpticalApp;
