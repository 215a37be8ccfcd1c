//! Configuration structs and their conversions into session types.

use std::collections::HashSet;
use std::time::Duration;

use arquiz_core::{
    Named, Question, QuestionBank, SessionSettings, SoundBank, TargetEffect, TargetValidator,
};
use arquiz_oui::{Cue, Pose, Rotation, Vec3};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;

/// Top-level arquiz configuration.
///
/// `QuizConfig::default()` is the built-in sample game. Keys omitted from a
/// file take their per-field defaults; omitted `targets` and `questions` are
/// empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizConfig {
    #[serde(default)]
    pub session: SessionSection,
    #[serde(default)]
    pub feedback: FeedbackSection,
    #[serde(default)]
    pub audio: AudioSection,
    #[serde(default)]
    pub viewer: ViewerSection,
    #[serde(default)]
    pub targets: Vec<TargetConfig>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSection {
    /// Seconds between start and the first question
    #[serde(default = "default_start_delay")]
    pub start_delay_secs: f64,
    /// Seconds feedback stays up before the next question
    #[serde(default = "default_feedback_delay")]
    pub feedback_delay_secs: f64,
    /// Fixed RNG seed for a repeatable question order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_start_delay() -> f64 {
    1.0
}
fn default_feedback_delay() -> f64 {
    2.0
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            start_delay_secs: default_start_delay(),
            feedback_delay_secs: default_feedback_delay(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackSection {
    /// Metres in front of the viewer at which indicators appear
    #[serde(default = "default_model_distance")]
    pub model_distance: f32,
    #[serde(default = "default_true")]
    pub correct_indicator: bool,
    #[serde(default = "default_true")]
    pub incorrect_indicator: bool,
}

fn default_model_distance() -> f32 {
    1.5
}
fn default_true() -> bool {
    true
}

impl Default for FeedbackSection {
    fn default() -> Self {
        Self {
            model_distance: default_model_distance(),
            correct_indicator: true,
            incorrect_indicator: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioSection {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_correct_cue")]
    pub correct: Cue,
    #[serde(default = "default_incorrect_cue")]
    pub incorrect: Cue,
    /// Master volume, 0.0 to 1.0
    #[serde(default = "default_volume")]
    pub volume: f32,
}

fn default_correct_cue() -> Cue {
    Cue::Confirm
}
fn default_incorrect_cue() -> Cue {
    Cue::Error
}
fn default_volume() -> f32 {
    0.8
}

impl Default for AudioSection {
    fn default() -> Self {
        Self {
            enabled: true,
            correct: default_correct_cue(),
            incorrect: default_incorrect_cue(),
            volume: default_volume(),
        }
    }
}

impl AudioSection {
    pub fn sounds(&self) -> SoundBank {
        if self.enabled {
            SoundBank {
                correct: Some(self.correct),
                incorrect: Some(self.incorrect),
            }
        } else {
            SoundBank::silent()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerSection {
    /// Camera used for indicator placement until the host reports a head pose
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_camera: Option<CameraConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_eye_position")]
    pub position: [f32; 3],
    #[serde(default)]
    pub yaw_degrees: f32,
    #[serde(default)]
    pub pitch_degrees: f32,
}

fn default_eye_position() -> [f32; 3] {
    [0.0, 1.6, 0.0]
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: default_eye_position(),
            yaw_degrees: 0.0,
            pitch_degrees: 0.0,
        }
    }
}

impl CameraConfig {
    pub fn pose(&self) -> Pose {
        Pose::new(
            Vec3::from_array(self.position),
            Rotation::from_yaw_pitch(
                self.yaw_degrees.to_radians(),
                self.pitch_degrees.to_radians(),
            ),
        )
    }
}

/// One trackable target.
///
/// `id` is what questions answer with; when omitted it is the same as `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Show a transient effect for this many seconds on detection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect_secs: Option<f64>,
}

impl TargetConfig {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            name: None,
            id: Some(id.into()),
            effect_secs: None,
        }
    }

    pub fn with_effect(mut self, secs: f64) -> Self {
        self.effect_secs = Some(secs);
        self
    }

    pub fn validator(&self) -> TargetValidator {
        let validator = TargetValidator::named(self.display_name(), self.id.as_deref());
        match self.effect_secs {
            Some(secs) => validator.with_effect(TargetEffect::lasting(seconds(secs))),
            None => validator,
        }
    }

    /// Id the tracker reports for this target
    pub fn target_id(&self) -> &str {
        self.id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| self.display_name())
    }
}

/// Seconds from config as a `Duration`, clamped into range. `validate`
/// rejects anything that would need clamping.
fn seconds(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs).unwrap_or(if secs > 0.0 {
        Duration::MAX
    } else {
        Duration::ZERO
    })
}

fn check_seconds(key: &str, secs: f64) -> Result<(), ConfigError> {
    Duration::try_from_secs_f64(secs)
        .map(|_| ())
        .map_err(|_| {
            ConfigError::Invalid(format!(
                "{key} must be a non-negative number of seconds, got {secs}"
            ))
        })
}

impl Named for TargetConfig {
    fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or_default()
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        let sample = |text: &str, answer: &str| {
            Question::new(text, answer, ["Ball", "Box", "Cube", "Cone"])
        };
        let questions = [
            sample("What is round?", "Ball"),
            sample("What can hold things inside?", "Box"),
            sample("Which one has six equal square faces?", "Cube"),
            sample("Which one has a point on top?", "Cone"),
        ]
        .into_iter()
        .filter_map(Result::ok)
        .collect();

        Self {
            session: SessionSection::default(),
            feedback: FeedbackSection::default(),
            audio: AudioSection::default(),
            viewer: ViewerSection {
                main_camera: Some(CameraConfig::default()),
            },
            targets: vec![
                TargetConfig::with_id("Ball").with_effect(1.0),
                TargetConfig::with_id("Box"),
                TargetConfig::with_id("Cube"),
                TargetConfig::with_id("Cone"),
            ],
            questions,
        }
    }
}

impl QuizConfig {
    /// Parse and validate TOML. `origin` names the source in errors.
    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: QuizConfig =
            toml::from_str(content).map_err(|source| ConfigError::Parse {
                origin: origin.to_string(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values a session cannot run with.
    ///
    /// Questions whose answer names no configured target are allowed but
    /// logged, since they can never be answered correctly.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let delays = [
            ("session.start_delay_secs", self.session.start_delay_secs),
            ("session.feedback_delay_secs", self.session.feedback_delay_secs),
        ];
        for (key, value) in delays {
            check_seconds(key, value)?;
        }

        let distance = self.feedback.model_distance;
        if !distance.is_finite() || distance <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "feedback.model_distance must be positive, got {distance}"
            )));
        }

        if !(0.0..=1.0).contains(&self.audio.volume) {
            return Err(ConfigError::Invalid(format!(
                "audio.volume must be between 0.0 and 1.0, got {}",
                self.audio.volume
            )));
        }

        let mut seen = HashSet::new();
        for (index, target) in self.targets.iter().enumerate() {
            let id = target.target_id();
            if id.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "targets[{index}] needs a name or an id"
                )));
            }
            if !seen.insert(id.to_lowercase()) {
                return Err(ConfigError::Invalid(format!("duplicate target id `{id}`")));
            }
            if let Some(secs) = target.effect_secs {
                check_seconds(&format!("targets[{index}].effect_secs"), secs)?;
            }
        }

        if !self.targets.is_empty() {
            for question in &self.questions {
                if !seen.contains(&question.answer().to_lowercase()) {
                    warn!(
                        question = %question.text(),
                        answer = %question.answer(),
                        "Question answer does not match any configured target"
                    );
                }
            }
        }

        Ok(())
    }

    pub fn question_bank(&self) -> QuestionBank {
        QuestionBank::new(self.questions.clone())
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            start_delay: seconds(self.session.start_delay_secs),
            feedback_delay: seconds(self.session.feedback_delay_secs),
            model_distance: self.feedback.model_distance,
            main_camera: self.viewer.main_camera.as_ref().map(CameraConfig::pose),
            seed: self.session.seed,
            sounds: self.audio.sounds(),
        }
    }

    /// Targets the tracker can report.
    ///
    /// With no `[[targets]]` configured, every distinct question answer
    /// becomes a target, sorted and compared without case.
    pub fn trackable_targets(&self) -> Vec<TargetConfig> {
        if !self.targets.is_empty() {
            return self.targets.clone();
        }
        let mut answers: Vec<&str> = self.questions.iter().map(Question::answer).collect();
        answers.sort_by_key(|a| a.to_lowercase());
        answers.dedup_by(|a, b| a.to_lowercase() == b.to_lowercase());
        answers.into_iter().map(TargetConfig::with_id).collect()
    }

    pub fn validators(&self) -> Vec<TargetValidator> {
        self.trackable_targets()
            .iter()
            .map(TargetConfig::validator)
            .collect()
    }

    pub fn target(&self, target_id: &str) -> Option<TargetConfig> {
        self.trackable_targets()
            .into_iter()
            .find(|t| t.target_id() == target_id)
    }
}
