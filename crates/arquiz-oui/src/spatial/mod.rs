//! Spatial primitives for placing things around the viewer
//!
//! Uses a right-handed coordinate system:
//! - X: Right (+) / Left (-)
//! - Y: Up (+) / Down (-)
//! - Z: Forward (+) / Backward (-)

mod vector;
mod rotation;
mod pose;

pub use vector::Vec3;
pub use rotation::Rotation;
pub use pose::Pose;
