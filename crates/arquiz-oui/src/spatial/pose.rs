//! Position plus orientation of a viewer or a placed object

use std::f32::consts::PI;

use super::{Rotation, Vec3};

/// A rigid pose in world space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Rotation,
}

impl Pose {
    /// Origin, looking down +Z
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn new(position: Vec3, rotation: Rotation) -> Self {
        Self { position, rotation }
    }

    /// Pose at `position` with no rotation
    pub fn at(position: Vec3) -> Self {
        Self::new(position, Rotation::IDENTITY)
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation.forward()
    }

    pub fn right(&self) -> Vec3 {
        self.rotation.right()
    }

    pub fn up(&self) -> Vec3 {
        self.rotation.up()
    }

    /// Point `distance` units along the forward axis
    pub fn ahead(&self, distance: f32) -> Vec3 {
        self.position + self.forward() * distance
    }

    /// Turn so the forward axis points at `target`. No-op when `target`
    /// coincides with the current position.
    pub fn look_at(&mut self, target: Vec3) {
        if let Some(rotation) = Rotation::looking_along(target - self.position) {
            self.rotation = rotation;
        }
    }

    /// Apply `rotation` in this pose's local frame
    pub fn rotate_local(&mut self, rotation: Rotation) {
        self.rotation = (self.rotation * rotation).normalize();
    }

    /// Pose for an object floated `distance` in front of `viewer`.
    ///
    /// The object looks at the viewer and is then turned half a revolution
    /// about its own up axis, so its forward axis ends up pointing the way the
    /// viewer looks.
    pub fn in_front_of(viewer: &Pose, distance: f32) -> Self {
        let mut pose = Pose::at(viewer.ahead(distance));
        pose.look_at(viewer.position);
        pose.rotate_local(Rotation::from_axis_angle(Vec3::UP, PI));
        pose
    }

    /// Transform a point from this pose's local frame into world space
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation.rotate(local)
    }

    /// Transform a world point into this pose's local frame
    pub fn to_local(&self, world: Vec3) -> Vec3 {
        self.rotation.inverse().rotate(world - self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 0.001;

    #[test]
    fn test_in_front_of_identity_viewer() {
        let placed = Pose::in_front_of(&Pose::identity(), 1.5);
        assert!(placed.position.approx_eq(&Vec3::new(0.0, 0.0, 1.5), EPS));
        assert!(placed.forward().approx_eq(&Vec3::FORWARD, EPS));
    }

    #[test]
    fn test_in_front_of_turned_viewer() {
        let viewer = Pose::new(Vec3::new(1.0, 0.0, 0.0), Rotation::from_yaw(FRAC_PI_2));
        let placed = Pose::in_front_of(&viewer, 1.5);
        assert!(placed.position.approx_eq(&Vec3::new(2.5, 0.0, 0.0), EPS));
        assert!(placed.forward().approx_eq(&Vec3::RIGHT, EPS));
    }

    #[test]
    fn test_look_at_same_point_keeps_rotation() {
        let mut pose = Pose::new(Vec3::ZERO, Rotation::from_yaw(0.3));
        let before = pose.rotation;
        pose.look_at(Vec3::ZERO);
        assert_eq!(pose.rotation, before);
    }

    #[test]
    fn test_local_world_round_trip() {
        let pose = Pose::new(Vec3::new(5.0, 1.0, -2.0), Rotation::from_yaw_pitch(0.4, 0.2));
        let world = Vec3::new(3.0, 2.0, 7.0);
        assert!(pose.to_world(pose.to_local(world)).approx_eq(&world, EPS));
    }
}
