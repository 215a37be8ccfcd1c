//! Terminal backend with a depth-tested cell buffer

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{Print, SetBackgroundColor, SetForegroundColor},
    terminal,
};

use crate::renderer::{Color, RenderBackend, RenderError, RenderGlyph};
use crate::spatial::{Pose, Vec3};
use super::Projection;

#[derive(Clone, PartialEq)]
struct Cell {
    symbol: char,
    fg: Color,
    depth: f32,
}

impl Cell {
    fn blank() -> Self {
        Self {
            symbol: ' ',
            fg: Color::White,
            depth: f32::MAX,
        }
    }
}

/// Terminal rendering backend
pub struct TerminalBackend {
    width: u32,
    height: u32,
    buffer: Vec<Cell>,
    /// Previous frame, for diff rendering
    prev_buffer: Vec<Cell>,
    projection: Projection,
    camera: Pose,
    background: Color,
}

impl TerminalBackend {
    pub fn new() -> Result<Self, RenderError> {
        let (width, height) = terminal::size().map_err(|e| RenderError::Init(e.to_string()))?;
        Ok(Self::with_size(width as u32, height as u32))
    }

    /// Backend with a fixed grid, independent of the real terminal size
    pub fn with_size(width: u32, height: u32) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            width,
            height,
            buffer: vec![Cell::blank(); size],
            prev_buffer: Vec::new(),
            projection: Projection::for_grid(70.0, width, height),
            camera: Pose::identity(),
            background: Color::BACKDROP,
        }
    }

    /// Pick up the current terminal size. Returns true if it changed.
    fn refresh_size(&mut self) -> Result<bool, RenderError> {
        let (width, height) = terminal::size().map_err(|e| RenderError::Frame(e.to_string()))?;
        let (width, height) = (width as u32, height as u32);
        if width == self.width && height == self.height {
            return Ok(false);
        }

        self.width = width;
        self.height = height;
        self.projection.resize(width, height);
        Ok(true)
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if (x as u32) < self.width && (y as u32) < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Write a cell, keeping whatever is nearer. HUD writes use depth 0.
    fn set_cell(&mut self, x: u16, y: u16, symbol: char, fg: Color, depth: f32) {
        if let Some(idx) = self.index(x, y) {
            let cell = &mut self.buffer[idx];
            if depth <= cell.depth {
                *cell = Cell { symbol, fg, depth };
            }
        }
    }

    fn to_cell(&self, x: f32, y: f32) -> (u16, u16) {
        (
            (x.clamp(0.0, 1.0) * self.width as f32) as u16,
            (y.clamp(0.0, 1.0) * self.height as f32) as u16,
        )
    }

    /// Text content of one row, for inspection in tests
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width as u16)
            .filter_map(|x| self.index(x, y))
            .map(|idx| self.buffer[idx].symbol)
            .collect()
    }

    fn blank_buffer(&self) -> Vec<Cell> {
        vec![Cell::blank(); (self.width as usize) * (self.height as usize)]
    }
}

impl RenderBackend for TerminalBackend {
    fn begin_frame(&mut self) -> Result<(), RenderError> {
        let resized = self.refresh_size()?;
        let fresh = self.blank_buffer();
        let previous = std::mem::replace(&mut self.buffer, fresh);
        // an empty previous frame forces a full repaint
        self.prev_buffer = if resized { Vec::new() } else { previous };
        Ok(())
    }

    fn end_frame(&mut self) -> Result<(), RenderError> {
        let frame_err = |e: io::Error| RenderError::Frame(e.to_string());
        let mut stdout = io::stdout();

        queue!(stdout, cursor::Hide).map_err(frame_err)?;

        let full_repaint = self.prev_buffer.len() != self.buffer.len();
        for y in 0..self.height as u16 {
            for x in 0..self.width as u16 {
                let Some(idx) = self.index(x, y) else { continue };
                let cell = &self.buffer[idx];
                if !full_repaint && self.prev_buffer[idx] == *cell {
                    continue;
                }
                queue!(
                    stdout,
                    cursor::MoveTo(x, y),
                    SetForegroundColor(cell.fg.to_crossterm()),
                    SetBackgroundColor(self.background.to_crossterm()),
                    Print(cell.symbol)
                )
                .map_err(frame_err)?;
            }
        }

        queue!(stdout, cursor::Show).map_err(frame_err)?;
        stdout.flush().map_err(frame_err)?;

        Ok(())
    }

    fn draw_glyph(&mut self, glyph: &RenderGlyph, camera: &Pose) {
        let Some(projected) = self.projection.project(glyph.position, camera) else {
            return;
        };
        let (x, y) = Projection::cell(&projected, self.width, self.height);
        let depth = projected.depth;

        for (i, ch) in glyph.symbol.chars().enumerate() {
            // keep world glyphs behind HUD text
            self.set_cell(x.saturating_add(i as u16), y, ch, glyph.color, depth.max(f32::EPSILON));
        }
    }

    fn draw_hud_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        let (sx, sy) = self.to_cell(x, y);
        let sw = (width * self.width as f32) as u16;
        let sh = (height * self.height as f32) as u16;
        if sw < 2 || sh < 2 {
            return;
        }

        for dy in 0..sh {
            for dx in 0..sw {
                let top = dy == 0;
                let bottom = dy == sh - 1;
                let left = dx == 0;
                let right = dx == sw - 1;

                let symbol = match (top, bottom, left, right) {
                    (true, _, true, _) => '┌',
                    (true, _, _, true) => '┐',
                    (_, true, true, _) => '└',
                    (_, true, _, true) => '┘',
                    (true, _, _, _) | (_, true, _, _) => '─',
                    (_, _, true, _) | (_, _, _, true) => '│',
                    _ => ' ',
                };

                self.set_cell(sx + dx, sy + dy, symbol, color, 0.0);
            }
        }
    }

    fn draw_hud_text(&mut self, x: f32, y: f32, text: &str, color: Color) {
        let (sx, sy) = self.to_cell(x, y);
        for (i, ch) in text.chars().enumerate() {
            self.set_cell(sx.saturating_add(i as u16), sy, ch, color, 0.0);
        }
    }

    fn project(&self, point: Vec3, camera: &Pose) -> Option<(f32, f32)> {
        self.projection.project(point, camera).map(|p| (p.x, p.y))
    }

    fn camera(&self) -> &Pose {
        &self.camera
    }

    fn set_camera(&mut self, camera: Pose) {
        self.camera = camera;
    }
}
