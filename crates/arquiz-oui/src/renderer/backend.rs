//! Render backend trait definition

use crate::spatial::{Pose, Vec3};
use super::Color;

/// Error type for rendering operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum RenderError {
    /// Backend initialization failed
    #[error("Init error: {0}")]
    Init(String),
    /// Frame rendering failed
    #[error("Frame error: {0}")]
    Frame(String),
}

/// A glyph drawn at a world position
#[derive(Debug, Clone)]
pub struct RenderGlyph {
    pub symbol: String,
    pub position: Vec3,
    pub color: Color,
}

impl RenderGlyph {
    pub fn new(symbol: impl Into<String>, position: Vec3) -> Self {
        Self {
            symbol: symbol.into(),
            position,
            color: Color::White,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// Backend rendering trait for the optical HUD.
///
/// HUD coordinates are normalized: `(0, 0)` is top-left, `(1, 1)` bottom-right.
pub trait RenderBackend: Send {
    /// Begin a new render frame
    fn begin_frame(&mut self) -> Result<(), RenderError>;

    /// End frame and present to display
    fn end_frame(&mut self) -> Result<(), RenderError>;

    /// Render a glyph placed in world space, seen from `camera`
    fn draw_glyph(&mut self, glyph: &RenderGlyph, camera: &Pose);

    /// Render a screen-space rectangle outline
    fn draw_hud_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);

    /// Render text at a screen-space position
    fn draw_hud_text(&mut self, x: f32, y: f32, text: &str, color: Color);

    /// Project a world point to normalized device coordinates (-1..1)
    fn project(&self, point: Vec3, camera: &Pose) -> Option<(f32, f32)>;

    /// Current camera pose
    fn camera(&self) -> &Pose;

    /// Set camera pose
    fn set_camera(&mut self, camera: Pose);
}
