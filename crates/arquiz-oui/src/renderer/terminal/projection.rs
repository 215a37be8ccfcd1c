//! Pinhole camera mapping world points onto the terminal grid

use crate::spatial::{Pose, Vec3};

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f32 = 2.0;

/// A world point after projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    /// Horizontal position, -1 (left edge) to 1 (right edge)
    pub x: f32,
    /// Vertical position, -1 (bottom) to 1 (top)
    pub y: f32,
    /// Distance along the view axis mapped to 0 (near) ..1 (far)
    pub depth: f32,
}

/// Perspective camera sized to a cell grid
#[derive(Debug, Clone)]
pub struct Projection {
    tan_half_fov: f32,
    aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    /// `fov_degrees` is the vertical field of view
    pub fn for_grid(fov_degrees: f32, width: u32, height: u32) -> Self {
        let mut projection = Self {
            tan_half_fov: (fov_degrees.to_radians() / 2.0).tan(),
            aspect: 1.0,
            near: 0.1,
            far: 1000.0,
        };
        projection.resize(width, height);
        projection
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / (height.max(1) as f32 * CELL_ASPECT);
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// `None` when the point falls outside the view frustum.
    pub fn project(&self, point: Vec3, camera: &Pose) -> Option<Projected> {
        let local = camera.to_local(point);
        if local.z <= self.near || local.z >= self.far {
            return None;
        }

        let half_height = local.z * self.tan_half_fov;
        let x = local.x / (half_height * self.aspect);
        let y = local.y / half_height;
        if x.abs() > 1.0 || y.abs() > 1.0 {
            return None;
        }

        Some(Projected {
            x,
            y,
            depth: (local.z - self.near) / (self.far - self.near),
        })
    }

    /// Cell holding a projected point on a `width` x `height` grid
    pub fn cell(p: &Projected, width: u32, height: u32) -> (u16, u16) {
        let col = ((p.x + 1.0) * 0.5 * width as f32).round() as u32;
        let row = ((1.0 - p.y) * 0.5 * height as f32).round() as u32;
        (
            col.min(width.saturating_sub(1)) as u16,
            row.min(height.saturating_sub(1)) as u16,
        )
    }
}
