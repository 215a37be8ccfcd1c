//! Application framework for optical HUD apps

mod framework;

pub use framework::{OpticalApp, OpticalAppRunner};
