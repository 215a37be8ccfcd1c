//! Per-target found/lost tracking.

use std::time::Duration;

use tracing::{debug, info};

/// Short-lived visual shown on a target when it is detected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetEffect {
    pub duration: Duration,
    pub on_correct: bool,
    pub on_incorrect: bool,
}

impl Default for TargetEffect {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(1),
            on_correct: true,
            on_incorrect: true,
        }
    }
}

impl TargetEffect {
    pub fn lasting(duration: Duration) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    pub fn shows(&self, verdict: crate::Verdict) -> bool {
        match verdict {
            crate::Verdict::Correct => self.on_correct,
            crate::Verdict::Incorrect => self.on_incorrect,
        }
    }
}

/// Watches one tracked target and reports its false→true transition.
///
/// Validators are owned by a [`SessionController`](crate::SessionController)
/// once registered; the controller routes tracking events to them and acts on
/// the transitions they report.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetValidator {
    id: String,
    tracking: bool,
    effect: Option<TargetEffect>,
}

impl TargetValidator {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tracking: false,
            effect: None,
        }
    }

    /// Validator for a scene object, using `id` when given and the object's
    /// own name otherwise.
    pub fn named(instance_name: &str, id: Option<&str>) -> Self {
        match id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => Self::new(id),
            None => Self::new(instance_name),
        }
    }

    pub fn with_effect(mut self, effect: TargetEffect) -> Self {
        self.effect = Some(effect);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    pub fn effect(&self) -> Option<&TargetEffect> {
        self.effect.as_ref()
    }

    /// Record the target as found. Returns `true` only on the transition.
    pub fn mark_found(&mut self) -> bool {
        if self.tracking {
            debug!(target_id = %self.id, "Target still tracked");
            return false;
        }
        self.tracking = true;
        info!(target_id = %self.id, "Target detected");
        true
    }

    /// Record the target as lost. Returns `true` only on the transition.
    pub fn mark_lost(&mut self) -> bool {
        if !self.tracking {
            return false;
        }
        self.tracking = false;
        debug!(target_id = %self.id, "Target lost");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_defaults_to_instance_name() {
        assert_eq!(TargetValidator::named("BallCard", None).id(), "BallCard");
        assert_eq!(TargetValidator::named("BallCard", Some("")).id(), "BallCard");
        assert_eq!(TargetValidator::named("BallCard", Some("Ball")).id(), "Ball");
    }

    #[test]
    fn test_transitions_fire_once() {
        let mut v = TargetValidator::new("Ball");
        assert!(!v.is_tracking());
        assert!(!v.mark_lost());

        assert!(v.mark_found());
        assert!(!v.mark_found());
        assert!(v.is_tracking());

        assert!(v.mark_lost());
        assert!(!v.mark_lost());
        assert!(v.mark_found());
    }

    #[test]
    fn test_effect_defaults() {
        let effect = TargetEffect::default();
        assert_eq!(effect.duration, Duration::from_secs(1));
        assert!(effect.shows(crate::Verdict::Correct));
        assert!(effect.shows(crate::Verdict::Incorrect));
        assert!(TargetValidator::new("Ball").effect().is_none());
    }
}
