//! Screen-space HUD panel

use unicode_width::UnicodeWidthChar;

use crate::renderer::{Color, RenderBackend};
use crate::spatial::Pose;
use crate::widget::OpticalWidget;

/// A bordered HUD panel with an optional title and text lines
pub struct HudPanel {
    id: String,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    title: Option<String>,
    lines: Vec<(String, Color)>,
    border_color: Color,
    visible: bool,
}

impl HudPanel {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            x: 0.25,
            y: 0.1,
            width: 0.5,
            height: 0.2,
            title: None,
            lines: Vec::new(),
            border_color: Color::HUD_CYAN,
            visible: true,
        }
    }

    /// Set the top-left corner (normalized 0-1)
    pub fn position(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Set the panel size (normalized 0-1)
    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn border_color(mut self, color: Color) -> Self {
        self.border_color = color;
        self
    }

    pub fn set_border_color(&mut self, color: Color) {
        self.border_color = color;
    }

    /// Replace the content with a single line
    pub fn set_text(&mut self, text: impl Into<String>, color: Color) {
        self.lines = vec![(text.into(), color)];
    }

    pub fn set_lines(&mut self, lines: Vec<(String, Color)>) {
        self.lines = lines;
    }

    pub fn lines(&self) -> &[(String, Color)] {
        &self.lines
    }
}

/// Cut `text` so it spans at most `max_cols` terminal columns
pub fn fit_to_width(text: &str, max_cols: usize) -> String {
    let mut cols = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if cols + w > max_cols {
            if out.pop().is_some() {
                out.push('…');
            }
            break;
        }
        cols += w;
        out.push(ch);
    }
    out
}

impl OpticalWidget for HudPanel {
    fn id(&self) -> &str {
        &self.id
    }

    fn render(&self, backend: &mut dyn RenderBackend, _camera: &Pose) {
        if !self.visible {
            return;
        }

        backend.draw_hud_rect(self.x, self.y, self.width, self.height, self.border_color);

        // rough column budget: panels are sized relative to an 80-column screen
        let max_cols = ((self.width - 0.04) * 80.0).max(1.0) as usize;
        let mut current_y = self.y + 0.05;
        if let Some(ref title) = self.title {
            let title = fit_to_width(title, max_cols);
            backend.draw_hud_text(self.x + 0.02, current_y, &title, Color::GOLD);
            current_y += 0.05;
        }

        for (line, color) in &self.lines {
            backend.draw_hud_text(self.x + 0.02, current_y, &fit_to_width(line, max_cols), *color);
            current_y += 0.05;
        }
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}
