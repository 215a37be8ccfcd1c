//! Glyph marker standing in for a placed 3D model

use crate::renderer::{Color, RenderBackend, RenderGlyph};
use crate::spatial::Pose;
use crate::widget::OpticalWidget;

/// A symbol drawn at a world pose; hidden until placed
pub struct WorldMarker {
    id: String,
    symbol: String,
    color: Color,
    pose: Option<Pose>,
}

impl WorldMarker {
    pub fn new(id: impl Into<String>, symbol: impl Into<String>, color: Color) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into(),
            color,
            pose: None,
        }
    }

    /// Show the marker at `pose`, or hide it with `None`
    pub fn place(&mut self, pose: Option<Pose>) {
        self.pose = pose;
    }

    pub fn pose(&self) -> Option<Pose> {
        self.pose
    }
}

impl OpticalWidget for WorldMarker {
    fn id(&self) -> &str {
        &self.id
    }

    fn render(&self, backend: &mut dyn RenderBackend, camera: &Pose) {
        if let Some(pose) = self.pose {
            let glyph = RenderGlyph::new(self.symbol.clone(), pose.position).with_color(self.color);
            backend.draw_glyph(&glyph, camera);
        }
    }

    fn is_visible(&self) -> bool {
        self.pose.is_some()
    }

    fn set_visible(&mut self, visible: bool) {
        if !visible {
            self.pose = None;
        }
    }
}
