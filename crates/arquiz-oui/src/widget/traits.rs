//! Widget trait definitions for the optical HUD

use crate::context::DisplayContext;
use crate::renderer::RenderBackend;
use crate::spatial::Pose;

/// Core trait for optical widgets
pub trait OpticalWidget: Send {
    /// Unique identifier
    fn id(&self) -> &str;

    /// Update the widget state
    fn update(&mut self, _ctx: &DisplayContext) {}

    /// Render the widget to the backend
    fn render(&self, backend: &mut dyn RenderBackend, camera: &Pose);

    /// Whether the widget currently draws anything
    fn is_visible(&self) -> bool;

    fn set_visible(&mut self, visible: bool);
}
