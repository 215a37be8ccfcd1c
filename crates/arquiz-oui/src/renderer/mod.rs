//! Rendering backend abstraction for the optical HUD
//!
//! - Terminal backend for development/simulation
//! - AR device backends implement the same trait

mod backend;
mod color;
pub mod terminal;

pub use backend::{RenderBackend, RenderError, RenderGlyph};
pub use color::Color;
