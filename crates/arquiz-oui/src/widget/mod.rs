//! Widgets for the optical HUD
//!
//! - Screen-space panels
//! - World-anchored text labels
//! - World markers for placed 3D indicators

mod label;
mod marker;
mod panel;
mod traits;

pub use label::WorldLabel;
pub use marker::WorldMarker;
pub use panel::{fit_to_width, HudPanel};
pub use traits::OpticalWidget;
