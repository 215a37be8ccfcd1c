//! Terminal backend for developing the HUD without AR hardware

mod backend;
mod projection;

pub use backend::TerminalBackend;
pub use projection::{Projected, Projection};
