//! Host-side quiz state shared by the terminal and headless runners

use std::time::Duration;

use arquiz_config::{QuizConfig, TargetConfig};
use arquiz_core::{LabelPresenter, QuizPresenter, Readiness, SessionController, Verdict};
use arquiz_oui::{AudioBackend, Pose, TrackingEvent, Vec3};

/// Running tally of judged answers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub correct: u32,
    pub incorrect: u32,
}

impl Score {
    pub fn record(&mut self, verdict: Verdict) {
        if verdict.is_correct() {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
    }

    pub fn total(&self) -> u32 {
        self.correct + self.incorrect
    }
}

/// One quiz session plus the bits of host state around it
pub struct QuizState<P> {
    pub session: SessionController<P>,
    pub score: Score,
    /// Name of the most recently found target
    pub label: Option<LabelPresenter<TargetConfig>>,
    pub viewer: Pose,
    pub status: Option<String>,
    targets: Vec<TargetConfig>,
}

impl<P: QuizPresenter> QuizState<P> {
    pub fn new(config: &QuizConfig, presenter: P, audio: Option<Box<dyn AudioBackend>>) -> Self {
        let mut session =
            SessionController::new(config.question_bank(), config.session_settings(), presenter);
        if let Some(mut audio) = audio {
            audio.set_volume(config.audio.volume);
            session = session.with_audio(audio);
        }
        for validator in config.validators() {
            session.register_validator(validator);
        }

        Self {
            session,
            score: Score::default(),
            label: None,
            viewer: Pose::identity(),
            status: None,
            targets: config.trackable_targets(),
        }
    }

    pub fn start(&mut self) -> Readiness {
        let readiness = self.session.start();
        if let Readiness::Missing(missing) = &readiness {
            self.status = Some(format!("Not ready: missing {}", missing.join(", ")));
        }
        readiness
    }

    pub fn set_viewer(&mut self, pose: Pose) {
        self.viewer = pose;
        self.session.set_viewer_pose(pose);
    }

    /// Route a tracking notification into the session and the name label.
    pub fn apply_tracking(&mut self, event: &TrackingEvent) -> Option<Verdict> {
        match event {
            TrackingEvent::Found(id) => {
                let verdict = self.session.target_found(id);
                if let Some(verdict) = verdict {
                    self.score.record(verdict);
                }
                self.show_label(id);
                verdict
            }
            TrackingEvent::Lost(id) => {
                self.session.target_lost(id);
                if let Some(label) = self.label.as_mut() {
                    if label.entity().target_id() == id {
                        label.clear();
                    }
                }
                None
            }
        }
    }

    /// Configured targets, in config order
    pub fn targets(&self) -> &[TargetConfig] {
        &self.targets
    }

    pub fn update(&mut self, dt: Duration) {
        self.session.update(dt);
    }

    fn show_label(&mut self, target_id: &str) {
        let Some(target) = self.targets.iter().find(|t| t.target_id() == target_id) else {
            return;
        };
        // just below eye line, a little further out than the indicators
        let anchor = self.viewer.ahead(2.5) - Vec3::UP * 0.4;

        match self.label.as_mut() {
            Some(label) => label.rebind(target.clone()),
            None => {
                self.label = Some(LabelPresenter::anchored(target.clone(), "target-name", anchor));
            }
        }
        if let Some(label) = self.label.as_mut() {
            label.label_mut().set_position(anchor);
            label.present();
        }
    }
}
