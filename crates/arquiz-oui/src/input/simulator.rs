//! Input simulator for terminal development
//!
//! Maps keyboard input to head pose and target tracking so the quiz can be
//! played without AR hardware.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::spatial::{Pose, Rotation, Vec3};
use super::{OpticalEvent, TrackingEvent};

/// Simulates spatial input from the keyboard
pub struct InputSimulator {
    head_yaw: f32,
    head_pitch: f32,
    head_speed: f32,
    /// Eye height of the simulated viewer
    eye_height: f32,
    /// Targets bound to the number keys 1-9, with their tracked flag
    targets: Vec<(String, bool)>,
}

impl Default for InputSimulator {
    fn default() -> Self {
        Self {
            head_yaw: 0.0,
            head_pitch: 0.0,
            head_speed: 0.1,
            eye_height: 1.6,
            targets: Vec::new(),
        }
    }
}

impl InputSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind target ids to the number keys, in order (at most nine)
    pub fn with_targets<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.targets = targets
            .into_iter()
            .take(9)
            .map(|id| (id.into(), false))
            .collect();
        self
    }

    /// Target ids bound to keys 1..=9
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.targets.iter().map(|(id, _)| id.as_str())
    }

    /// Process a keyboard event and generate simulated optical events
    pub fn process_key(&mut self, key: KeyEvent) -> Vec<OpticalEvent> {
        if key.kind != KeyEventKind::Press {
            return Vec::new();
        }

        match key.code {
            // WASD: head rotation
            KeyCode::Char('w') | KeyCode::Char('W') => self.turn_head(0.0, -self.head_speed),
            KeyCode::Char('s') | KeyCode::Char('S') => self.turn_head(0.0, self.head_speed),
            KeyCode::Char('a') | KeyCode::Char('A') => self.turn_head(-self.head_speed, 0.0),
            KeyCode::Char('d') | KeyCode::Char('D') => self.turn_head(self.head_speed, 0.0),

            // 1-9: toggle tracking of the bound target
            KeyCode::Char(c @ '1'..='9') => {
                let slot = c as usize - '1' as usize;
                self.toggle_target(slot)
                    .map(|event| vec![OpticalEvent::Tracking(event)])
                    .unwrap_or_default()
            }

            _ => vec![OpticalEvent::Key(key)],
        }
    }

    fn turn_head(&mut self, yaw: f32, pitch: f32) -> Vec<OpticalEvent> {
        self.head_yaw += yaw;
        self.head_pitch = (self.head_pitch + pitch).clamp(-1.2, 1.2);
        vec![OpticalEvent::HeadPose {
            pose: self.head_pose(),
        }]
    }

    /// Flip the tracked flag of the target in `slot`
    pub fn toggle_target(&mut self, slot: usize) -> Option<TrackingEvent> {
        let (id, tracked) = self.targets.get_mut(slot)?;
        *tracked = !*tracked;
        Some(if *tracked {
            TrackingEvent::Found(id.clone())
        } else {
            TrackingEvent::Lost(id.clone())
        })
    }

    /// Current simulated head pose
    pub fn head_pose(&self) -> Pose {
        Pose::new(
            Vec3::new(0.0, self.eye_height, 0.0),
            Rotation::from_yaw_pitch(self.head_yaw, self.head_pitch),
        )
    }

    pub fn reset(&mut self) {
        self.head_yaw = 0.0;
        self.head_pitch = 0.0;
        for (_, tracked) in &mut self.targets {
            *tracked = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::empty())
    }

    #[test]
    fn test_head_turn() {
        let mut sim = InputSimulator::new();
        let events = sim.process_key(press('d'));

        match &events[0] {
            OpticalEvent::HeadPose { pose } => assert!(pose.forward().x > 0.0),
            other => panic!("Expected HeadPose event, got {other:?}"),
        }
    }

    #[test]
    fn test_number_key_toggles_tracking() {
        let mut sim = InputSimulator::new().with_targets(["Ball", "Box"]);

        let found = sim.process_key(press('2'));
        assert!(matches!(
            &found[0],
            OpticalEvent::Tracking(TrackingEvent::Found(id)) if id == "Box"
        ));

        let lost = sim.process_key(press('2'));
        assert!(matches!(
            &lost[0],
            OpticalEvent::Tracking(TrackingEvent::Lost(id)) if id == "Box"
        ));
    }

    #[test]
    fn test_unbound_number_key_is_ignored() {
        let mut sim = InputSimulator::new().with_targets(["Ball"]);
        assert!(sim.process_key(press('5')).is_empty());
    }

    #[test]
    fn test_other_keys_pass_through() {
        let mut sim = InputSimulator::new();
        let events = sim.process_key(press('n'));
        assert!(matches!(&events[0], OpticalEvent::Key(_)));
    }
}
