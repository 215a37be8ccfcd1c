//! Unit quaternion rotation

use std::ops::Mul;

use super::Vec3;

/// A rotation stored as a unit quaternion.
///
/// `a * b` applies `b` first, then `a`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Rotation {
    /// No rotation
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    /// Rotation of `angle_radians` about `axis` (right-hand rule)
    pub fn from_axis_angle(axis: Vec3, angle_radians: f32) -> Self {
        let (sin_half, cos_half) = (angle_radians * 0.5).sin_cos();
        let axis = axis.normalize();

        Self {
            x: axis.x * sin_half,
            y: axis.y * sin_half,
            z: axis.z * sin_half,
            w: cos_half,
        }
    }

    /// Heading rotation about the up axis. Positive yaw turns forward toward +X.
    pub fn from_yaw(yaw: f32) -> Self {
        Self::from_axis_angle(Vec3::UP, yaw)
    }

    /// Yaw about up, then pitch about the yawed right axis.
    /// Positive pitch tilts forward toward -Y (looking down).
    pub fn from_yaw_pitch(yaw: f32, pitch: f32) -> Self {
        Self::from_yaw(yaw) * Self::from_axis_angle(Vec3::RIGHT, pitch)
    }

    /// Rotation whose forward axis points along `direction`.
    /// Returns `None` for a zero-length direction.
    pub fn looking_along(direction: Vec3) -> Option<Self> {
        let dir = direction.normalize();
        if dir.magnitude_squared() < 0.0001 {
            return None;
        }

        let yaw = dir.x.atan2(dir.z);
        let pitch = (-dir.y).clamp(-1.0, 1.0).asin();
        Some(Self::from_yaw_pitch(yaw, pitch))
    }

    pub fn normalize(&self) -> Self {
        let mag = (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt();
        if mag > 0.0 {
            Self {
                x: self.x / mag,
                y: self.y / mag,
                z: self.z / mag,
                w: self.w / mag,
            }
        } else {
            Self::IDENTITY
        }
    }

    /// Inverse of a unit rotation
    pub fn inverse(&self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: self.w,
        }
    }

    /// Rotate a vector by this rotation
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        let q = Vec3::new(self.x, self.y, self.z);
        let uv = q.cross(&v);
        let uuv = q.cross(&uv);
        v + (uv * self.w + uuv) * 2.0
    }

    pub fn forward(&self) -> Vec3 {
        self.rotate(Vec3::FORWARD)
    }

    pub fn right(&self) -> Vec3 {
        self.rotate(Vec3::RIGHT)
    }

    pub fn up(&self) -> Vec3 {
        self.rotate(Vec3::UP)
    }

    /// Heading in degrees, 0..360, measured from +Z toward +X
    pub fn heading_degrees(&self) -> f32 {
        let f = self.forward();
        let heading = f.x.atan2(f.z).to_degrees();
        if heading < 0.0 {
            heading + 360.0
        } else {
            heading
        }
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Rotation {
    type Output = Rotation;

    fn mul(self, rhs: Self) -> Self::Output {
        Rotation {
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            z: self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        }
    }
}
