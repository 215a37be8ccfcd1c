//! World-anchored text label

use crate::renderer::{Color, RenderBackend};
use crate::spatial::{Pose, Vec3};
use crate::widget::OpticalWidget;

/// A text label anchored to a world position
pub struct WorldLabel {
    id: String,
    position: Vec3,
    text: String,
    color: Color,
    /// Beyond this distance from the camera the label is not drawn
    max_distance: f32,
    visible: bool,
}

impl WorldLabel {
    pub fn new(id: impl Into<String>, position: Vec3, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            position,
            text: text.into(),
            color: Color::White,
            max_distance: 50.0,
            visible: true,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }
}

impl OpticalWidget for WorldLabel {
    fn id(&self) -> &str {
        &self.id
    }

    fn render(&self, backend: &mut dyn RenderBackend, camera: &Pose) {
        if !self.visible || self.position.distance(&camera.position) > self.max_distance {
            return;
        }

        let Some((sx, sy)) = backend.project(self.position, camera) else {
            return;
        };

        let x = (sx + 1.0) / 2.0;
        let y = (1.0 - sy) / 2.0;
        backend.draw_hud_text(x, y, &self.text, self.color);
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}
