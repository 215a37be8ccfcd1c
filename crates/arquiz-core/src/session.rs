//! Quiz session controller.
//!
//! One controller runs one quiz: it owns the question bank, the registered
//! target validators and a [`Timeline`] of pending transitions. The host calls
//! [`SessionController::update`] every frame and forwards tracking events;
//! everything else happens in response to those two inputs.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use arquiz_oui::{AudioBackend, Pose};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::bank::QuestionBank;
use crate::feedback::{feedback_message, SoundBank};
use crate::presenter::{Panel, QuizPresenter};
use crate::question::{Question, Verdict};
use crate::timeline::{Timeline, TimerId};
use crate::validator::{TargetEffect, TargetValidator};

/// Where the session is in its question cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    AwaitingAnswer,
    ShowingFeedback,
}

/// Result of [`SessionController::start`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    /// The session stays idle; lists what has to be supplied first
    Missing(Vec<&'static str>),
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready)
    }
}

/// Tunables for a session
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Pause between `start` and the first question
    pub start_delay: Duration,
    /// How long feedback stays up before the next question
    pub feedback_delay: Duration,
    /// Distance in front of the viewer at which indicators are placed
    pub model_distance: f32,
    /// Viewer pose used until the host reports one
    pub main_camera: Option<Pose>,
    /// Fixed seed for a reproducible question order
    pub seed: Option<u64>,
    pub sounds: SoundBank,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            start_delay: Duration::from_secs(1),
            feedback_delay: Duration::from_secs(2),
            model_distance: 1.5,
            main_camera: Some(Pose::identity()),
            seed: None,
            sounds: SoundBank::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum SessionTask {
    ShowQuestion,
    NextQuestion,
    HideEffect { target_id: String, verdict: Verdict },
}

/// Drives the question → detection → feedback → next question cycle.
pub struct SessionController<P> {
    bank: QuestionBank,
    settings: SessionSettings,
    presenter: P,
    audio: Option<Box<dyn AudioBackend>>,
    rng: StdRng,
    timeline: Timeline<SessionTask>,
    validators: BTreeMap<String, TargetValidator>,
    viewer: Option<Pose>,
    current: Option<usize>,
    phase: Phase,
    started: bool,
    /// Pending "show a question" transition, start or post-feedback
    pending_question: Option<TimerId>,
    effect_timers: HashMap<String, TimerId>,
}

impl<P: QuizPresenter> SessionController<P> {
    pub fn new(bank: QuestionBank, settings: SessionSettings, presenter: P) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            bank,
            settings,
            presenter,
            audio: None,
            rng,
            timeline: Timeline::new(),
            validators: BTreeMap::new(),
            viewer: None,
            current: None,
            phase: Phase::Idle,
            started: false,
            pending_question: None,
            effect_timers: HashMap::new(),
        }
    }

    /// Attach an audio backend for verdict cues
    pub fn with_audio(mut self, audio: Box<dyn AudioBackend>) -> Self {
        self.audio = Some(audio);
        self
    }

    /// Reset panels and indicators, check that the session can run, and
    /// schedule the first question.
    ///
    /// Missing required surfaces or an empty bank leave the session idle.
    pub fn start(&mut self) -> Readiness {
        if self.started {
            debug!("Session already started");
            return Readiness::Ready;
        }

        self.set_panel(Panel::Question, false);
        self.set_panel(Panel::Feedback, false);
        self.hide_indicators();

        let mut missing = self.presenter.capabilities().missing_required();
        if self.bank.is_empty() {
            missing.push("questions");
        }
        if !missing.is_empty() {
            warn!(missing = ?missing, "Quiz session not started, missing required setup");
            return Readiness::Missing(missing);
        }

        self.started = true;
        let id = self
            .timeline
            .schedule(self.settings.start_delay, SessionTask::ShowQuestion);
        self.pending_question = Some(id);
        info!(
            questions = self.bank.len(),
            delay_ms = self.settings.start_delay.as_millis() as u64,
            "Quiz session started"
        );
        Readiness::Ready
    }

    /// Pick a question at random and put it on screen.
    ///
    /// Does nothing when the bank is empty. Any pending question transition
    /// is cancelled so the new question is not replaced moments later.
    pub fn show_random_question(&mut self) -> Option<&Question> {
        let index = self.bank.pick_index(&mut self.rng)?;

        if let Some(pending) = self.pending_question.take() {
            self.timeline.cancel(pending);
        }

        self.current = Some(index);
        self.phase = Phase::AwaitingAnswer;

        let question = self.bank.get(index)?;
        let caps = self.presenter.capabilities();
        if caps.question_text {
            self.presenter.set_question_text(question.text());
        }
        if caps.question_panel {
            self.presenter.set_panel_visible(Panel::Question, true);
        }
        if caps.feedback_panel {
            self.presenter.set_panel_visible(Panel::Feedback, false);
        }

        info!(question = %question.text(), "Question shown");
        Some(question)
    }

    /// Manual advance, same as [`show_random_question`](Self::show_random_question)
    pub fn force_new_question(&mut self) -> Option<&Question> {
        self.show_random_question()
    }

    /// Judge a detected target against the current question.
    ///
    /// Only the first detection while awaiting an answer is accepted; later
    /// ones return `None` until the next question is shown.
    pub fn on_target_detected(&mut self, target_id: &str) -> Option<Verdict> {
        if self.phase != Phase::AwaitingAnswer {
            debug!(target_id, "Detection ignored, not awaiting an answer");
            return None;
        }
        let verdict = self.current_question()?.judge(target_id);

        info!(target_id, ?verdict, "Answer judged");
        self.phase = Phase::ShowingFeedback;
        self.present_feedback(verdict, target_id);
        self.play_cue(verdict);

        if let Some(pending) = self.pending_question.take() {
            self.timeline.cancel(pending);
        }
        let id = self
            .timeline
            .schedule(self.settings.feedback_delay, SessionTask::NextQuestion);
        self.pending_question = Some(id);

        Some(verdict)
    }

    /// Take ownership of a validator. Returns `false` if its id is already
    /// registered; the existing validator is kept.
    pub fn register_validator(&mut self, validator: TargetValidator) -> bool {
        if self.validators.contains_key(validator.id()) {
            debug!(target_id = validator.id(), "Validator already registered");
            return false;
        }
        debug!(target_id = validator.id(), "Validator registered");
        self.validators
            .insert(validator.id().to_string(), validator);
        true
    }

    /// Tracking reported `target_id` as found.
    ///
    /// Returns the verdict when the detection answered the current question.
    pub fn target_found(&mut self, target_id: &str) -> Option<Verdict> {
        let Some(validator) = self.validators.get_mut(target_id) else {
            warn!(target_id, "Tracking event for unregistered target");
            return None;
        };
        if !validator.mark_found() {
            return None;
        }
        let effect = validator.effect().copied();

        let verdict = self.on_target_detected(target_id);
        if let Some(effect) = effect {
            self.show_effect(target_id, effect);
        }
        verdict
    }

    /// Tracking reported `target_id` as lost
    pub fn target_lost(&mut self, target_id: &str) {
        match self.validators.get_mut(target_id) {
            Some(validator) => {
                validator.mark_lost();
            }
            None => warn!(target_id, "Tracking event for unregistered target"),
        }
    }

    /// Advance session time by one frame and run whatever became due.
    pub fn update(&mut self, dt: Duration) {
        for task in self.timeline.advance(dt) {
            self.run(task);
        }
    }

    pub fn set_viewer_pose(&mut self, pose: Pose) {
        self.viewer = Some(pose);
    }

    pub fn add_question(&mut self, question: Question) {
        self.bank.push(question);
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current.and_then(|i| self.bank.get(i))
    }

    pub fn awaiting_answer(&self) -> bool {
        self.phase == Phase::AwaitingAnswer
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn validator(&self, target_id: &str) -> Option<&TargetValidator> {
        self.validators.get(target_id)
    }

    pub fn validator_count(&self) -> usize {
        self.validators.len()
    }

    pub fn validators(&self) -> impl Iterator<Item = &TargetValidator> {
        self.validators.values()
    }

    /// Time until the next question appears, if one is pending
    pub fn next_question_in(&self) -> Option<Duration> {
        self.pending_question
            .and_then(|id| self.timeline.remaining(id))
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    fn run(&mut self, task: SessionTask) {
        match task {
            SessionTask::ShowQuestion => {
                self.pending_question = None;
                self.show_random_question();
            }
            SessionTask::NextQuestion => {
                self.pending_question = None;
                self.hide_indicators();
                self.show_random_question();
            }
            SessionTask::HideEffect { target_id, verdict } => {
                self.effect_timers.remove(&target_id);
                self.presenter.set_effect_visible(&target_id, verdict, false);
            }
        }
    }

    fn present_feedback(&mut self, verdict: Verdict, target_id: &str) {
        let caps = self.presenter.capabilities();
        if caps.feedback_text {
            self.presenter
                .set_feedback_text(&feedback_message(verdict, target_id));
        }
        self.set_panel(Panel::Feedback, true);
        self.set_panel(Panel::Question, false);
        self.hide_indicators();

        if !caps.indicator(verdict) {
            return;
        }
        match self.viewer.or(self.settings.main_camera) {
            Some(viewer) => {
                let pose = Pose::in_front_of(&viewer, self.settings.model_distance);
                self.presenter.place_indicator(verdict, pose);
            }
            None => debug!("No viewer pose, indicator keeps its last placement"),
        }
        self.presenter.set_indicator_active(verdict, true);
    }

    fn play_cue(&mut self, verdict: Verdict) {
        let Some(cue) = self.settings.sounds.cue_for(verdict) else {
            return;
        };
        if let Some(audio) = self.audio.as_mut().filter(|a| a.is_available()) {
            audio.play(cue);
        }
    }

    fn show_effect(&mut self, target_id: &str, effect: TargetEffect) {
        let Some(question) = self.current_question() else {
            return;
        };
        let verdict = question.judge(target_id);
        if !effect.shows(verdict) {
            return;
        }

        if let Some(previous) = self.effect_timers.remove(target_id) {
            self.timeline.cancel(previous);
        }
        self.presenter.set_effect_visible(target_id, verdict, true);
        let id = self.timeline.schedule(
            effect.duration,
            SessionTask::HideEffect {
                target_id: target_id.to_string(),
                verdict,
            },
        );
        self.effect_timers.insert(target_id.to_string(), id);
    }

    fn set_panel(&mut self, panel: Panel, visible: bool) {
        if self.presenter.capabilities().panel(panel) {
            self.presenter.set_panel_visible(panel, visible);
        }
    }

    fn hide_indicators(&mut self) {
        let caps = self.presenter.capabilities();
        for verdict in [Verdict::Correct, Verdict::Incorrect] {
            if caps.indicator(verdict) {
                self.presenter.set_indicator_active(verdict, false);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::PresenterCapabilities;

    #[derive(Default)]
    struct Screen {
        question: String,
        feedback: String,
        question_panel: bool,
        feedback_panel: bool,
    }

    impl QuizPresenter for Screen {
        fn capabilities(&self) -> PresenterCapabilities {
            PresenterCapabilities::text_only()
        }
        fn set_question_text(&mut self, text: &str) {
            self.question = text.to_string();
        }
        fn set_feedback_text(&mut self, text: &str) {
            self.feedback = text.to_string();
        }
        fn set_panel_visible(&mut self, panel: Panel, visible: bool) {
            match panel {
                Panel::Question => self.question_panel = visible,
                Panel::Feedback => self.feedback_panel = visible,
            }
        }
        fn place_indicator(&mut self, _verdict: Verdict, _pose: Pose) {}
        fn set_indicator_active(&mut self, _verdict: Verdict, _active: bool) {}
    }

    fn session(answers: &[&str]) -> SessionController<Screen> {
        let bank = answers
            .iter()
            .map(|a| Question::new(format!("Find the {a}"), *a, [*a]).unwrap())
            .collect::<Vec<_>>();
        let settings = SessionSettings {
            seed: Some(3),
            ..SessionSettings::default()
        };
        SessionController::new(bank.into(), settings, Screen::default())
    }

    #[test]
    fn test_first_question_after_start_delay() {
        let mut s = session(&["Ball"]);
        assert!(s.start().is_ready());
        assert_eq!(s.phase(), Phase::Idle);

        s.update(Duration::from_millis(999));
        assert!(s.current_question().is_none());

        s.update(Duration::from_millis(1));
        assert!(s.awaiting_answer());
        assert_eq!(s.presenter().question, "Find the Ball");
        assert!(s.presenter().question_panel);
        assert!(!s.presenter().feedback_panel);
    }

    #[test]
    fn test_start_twice_schedules_once() {
        let mut s = session(&["Ball"]);
        s.start();
        s.start();
        s.update(Duration::from_secs(1));
        assert_eq!(s.next_question_in(), None);
        assert!(s.timeline.is_empty());
    }

    #[test]
    fn test_empty_bank_keeps_session_idle() {
        let mut s = session(&[]);
        assert_eq!(s.start(), Readiness::Missing(vec!["questions"]));
        assert!(s.show_random_question().is_none());
        s.update(Duration::from_secs(5));
        assert_eq!(s.phase(), Phase::Idle);
        assert!(!s.presenter().question_panel);
    }

    #[test]
    fn test_detection_ignored_while_idle() {
        let mut s = session(&["Ball"]);
        assert_eq!(s.on_target_detected("Ball"), None);
        assert_eq!(s.presenter().feedback, "");
    }

    #[test]
    fn test_feedback_then_next_question() {
        let mut s = session(&["Ball"]);
        s.show_random_question();

        assert_eq!(s.on_target_detected("box"), Some(Verdict::Incorrect));
        assert_eq!(s.phase(), Phase::ShowingFeedback);
        assert_eq!(s.presenter().feedback, "Incorrect. That's a: box");
        assert!(s.presenter().feedback_panel);
        assert!(!s.presenter().question_panel);
        assert_eq!(s.next_question_in(), Some(Duration::from_secs(2)));

        s.update(Duration::from_secs(2));
        assert!(s.awaiting_answer());
        assert!(s.presenter().question_panel);
        assert!(!s.presenter().feedback_panel);
    }

    #[test]
    fn test_unavailable_audio_is_skipped() {
        let mut s = session(&["Ball"]).with_audio(Box::new(arquiz_oui::NullAudioBackend));
        s.show_random_question();
        assert_eq!(s.on_target_detected("Ball"), Some(Verdict::Correct));
        assert_eq!(s.presenter().feedback, "Correct!");
    }

    #[test]
    fn test_unregistered_target_is_ignored() {
        let mut s = session(&["Ball"]);
        s.show_random_question();
        assert_eq!(s.target_found("Ball"), None);
        assert!(s.awaiting_answer());
    }
}
