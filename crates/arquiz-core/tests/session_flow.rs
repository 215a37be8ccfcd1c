use std::sync::{Arc, Mutex};
use std::time::Duration;

use arquiz_core::{
    Panel, Phase, PresenterCapabilities, Question, QuestionBank, QuizPresenter, Readiness,
    SessionController, SessionSettings, SoundBank, TargetEffect, TargetValidator, Verdict,
};
use arquiz_oui::{AudioBackend, Cue, Pose, Rotation, Vec3};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    QuestionText(String),
    FeedbackText(String),
    Panel(Panel, bool),
    Place(Verdict, Pose),
    Indicator(Verdict, bool),
    Effect(String, Verdict, bool),
}

struct Recorder {
    caps: PresenterCapabilities,
    calls: Vec<Call>,
}

impl Recorder {
    fn with(caps: PresenterCapabilities) -> Self {
        Self {
            caps,
            calls: Vec::new(),
        }
    }

    fn take(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }

    fn last_place(&self) -> Option<(Verdict, Pose)> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::Place(v, p) => Some((*v, *p)),
            _ => None,
        })
    }
}

impl QuizPresenter for Recorder {
    fn capabilities(&self) -> PresenterCapabilities {
        self.caps
    }
    fn set_question_text(&mut self, text: &str) {
        self.calls.push(Call::QuestionText(text.to_string()));
    }
    fn set_feedback_text(&mut self, text: &str) {
        self.calls.push(Call::FeedbackText(text.to_string()));
    }
    fn set_panel_visible(&mut self, panel: Panel, visible: bool) {
        self.calls.push(Call::Panel(panel, visible));
    }
    fn place_indicator(&mut self, verdict: Verdict, pose: Pose) {
        self.calls.push(Call::Place(verdict, pose));
    }
    fn set_indicator_active(&mut self, verdict: Verdict, active: bool) {
        self.calls.push(Call::Indicator(verdict, active));
    }
    fn set_effect_visible(&mut self, target_id: &str, verdict: Verdict, visible: bool) {
        self.calls
            .push(Call::Effect(target_id.to_string(), verdict, visible));
    }
}

#[derive(Clone, Default)]
struct RecordingAudio {
    played: Arc<Mutex<Vec<Cue>>>,
}

impl AudioBackend for RecordingAudio {
    fn play(&mut self, cue: Cue) {
        self.played.lock().unwrap().push(cue);
    }
    fn set_volume(&mut self, _volume: f32) {}
    fn is_available(&self) -> bool {
        true
    }
}

fn question(answer: &str) -> Question {
    Question::new(format!("Where is the {answer}?"), answer, ["Ball", "Box", "Cube"]).unwrap()
}

fn settings() -> SessionSettings {
    SessionSettings {
        seed: Some(11),
        ..SessionSettings::default()
    }
}

fn quiz(caps: PresenterCapabilities) -> SessionController<Recorder> {
    let bank = QuestionBank::new(vec![question("Ball")]);
    let mut session = SessionController::new(bank, settings(), Recorder::with(caps));
    for id in ["Ball", "Box"] {
        session.register_validator(TargetValidator::new(id));
    }
    session
}

fn ready(caps: PresenterCapabilities) -> SessionController<Recorder> {
    let mut session = quiz(caps);
    assert_eq!(session.start(), Readiness::Ready);
    session.update(Duration::from_secs(1));
    assert!(session.awaiting_answer());
    session.presenter_mut().take();
    session
}

#[test]
fn correct_detection_shows_correct_feedback() {
    let mut session = ready(PresenterCapabilities::full());

    assert_eq!(session.target_found("Ball"), Some(Verdict::Correct));
    assert!(!session.awaiting_answer());

    let calls = session.presenter_mut().take();
    assert_eq!(calls[0], Call::FeedbackText("Correct!".into()));
    assert_eq!(calls[1], Call::Panel(Panel::Feedback, true));
    assert_eq!(calls[2], Call::Panel(Panel::Question, false));
    assert_eq!(calls[3], Call::Indicator(Verdict::Correct, false));
    assert_eq!(calls[4], Call::Indicator(Verdict::Incorrect, false));
    assert!(matches!(calls[5], Call::Place(Verdict::Correct, _)));
    assert_eq!(calls[6], Call::Indicator(Verdict::Correct, true));
    assert_eq!(calls.len(), 7);
}

#[test]
fn answer_matching_ignores_case() {
    let bank = QuestionBank::new(vec![question("Cube")]);
    let mut session =
        SessionController::new(bank, settings(), Recorder::with(PresenterCapabilities::full()));
    session.show_random_question();

    assert_eq!(session.on_target_detected("cube"), Some(Verdict::Correct));
}

#[test]
fn incorrect_detection_names_the_target() {
    let mut session = ready(PresenterCapabilities::full());

    assert_eq!(session.target_found("Box"), Some(Verdict::Incorrect));
    let calls = session.presenter_mut().take();
    assert!(calls.contains(&Call::FeedbackText("Incorrect. That's a: Box".into())));
    assert!(calls.contains(&Call::Indicator(Verdict::Incorrect, true)));
    assert!(!calls.contains(&Call::Indicator(Verdict::Correct, true)));
}

#[test]
fn only_first_detection_is_judged() {
    let mut session = ready(PresenterCapabilities::full());

    assert_eq!(session.target_found("Box"), Some(Verdict::Incorrect));
    session.presenter_mut().take();

    assert_eq!(session.target_found("Ball"), None);
    assert_eq!(session.on_target_detected("Ball"), None);
    assert!(session.presenter().calls.is_empty());
}

#[test]
fn next_question_follows_feedback_delay() {
    let mut session = ready(PresenterCapabilities::full());
    session.target_found("Ball");
    session.presenter_mut().take();

    session.update(Duration::from_millis(1_999));
    assert_eq!(session.phase(), Phase::ShowingFeedback);
    assert!(session.presenter().calls.is_empty());

    session.update(Duration::from_millis(1));
    assert!(session.awaiting_answer());
    let calls = session.presenter_mut().take();
    assert_eq!(
        calls,
        vec![
            Call::Indicator(Verdict::Correct, false),
            Call::Indicator(Verdict::Incorrect, false),
            Call::QuestionText("Where is the Ball?".into()),
            Call::Panel(Panel::Question, true),
            Call::Panel(Panel::Feedback, false),
        ]
    );
}

#[test]
fn forcing_a_question_cancels_pending_advance() {
    let mut session = ready(PresenterCapabilities::full());
    session.target_found("Ball");

    session.update(Duration::from_secs(1));
    assert!(session.force_new_question().is_some());
    assert!(session.awaiting_answer());
    assert_eq!(session.next_question_in(), None);
    session.presenter_mut().take();

    session.update(Duration::from_secs(5));
    assert!(session.presenter().calls.is_empty());
}

#[test]
fn regained_target_needs_new_question() {
    let mut session = ready(PresenterCapabilities::full());
    assert!(session.target_found("Ball").is_some());
    session.target_lost("Ball");
    assert!(!session.validator("Ball").unwrap().is_tracking());

    // found again during the feedback delay
    assert_eq!(session.target_found("Ball"), None);
    assert!(session.validator("Ball").unwrap().is_tracking());
}

#[test]
fn staying_tracked_does_not_rejudge() {
    let mut session = ready(PresenterCapabilities::full());
    session.target_found("Box");
    session.update(Duration::from_secs(2));
    assert!(session.awaiting_answer());

    // Box never left view, so no new transition
    assert_eq!(session.target_found("Box"), None);
    assert!(session.awaiting_answer());

    session.target_lost("Box");
    assert_eq!(session.target_found("Box"), Some(Verdict::Incorrect));
}

#[test]
fn missing_panels_keep_session_idle() {
    let caps = PresenterCapabilities {
        feedback_panel: false,
        ..PresenterCapabilities::full()
    };
    let mut session = quiz(caps);

    assert_eq!(session.start(), Readiness::Missing(vec!["feedback panel"]));
    session.update(Duration::from_secs(10));
    assert_eq!(session.phase(), Phase::Idle);
    assert!(session.current_question().is_none());
    assert!(!session.is_started());
}

#[test]
fn start_hides_everything_first() {
    let mut session = quiz(PresenterCapabilities::full());
    session.start();
    assert_eq!(
        session.presenter_mut().take(),
        vec![
            Call::Panel(Panel::Question, false),
            Call::Panel(Panel::Feedback, false),
            Call::Indicator(Verdict::Correct, false),
            Call::Indicator(Verdict::Incorrect, false),
        ]
    );
}

#[test]
fn missing_indicators_are_skipped() {
    let mut session = ready(PresenterCapabilities::text_only());
    assert_eq!(session.target_found("Ball"), Some(Verdict::Correct));

    let calls = session.presenter_mut().take();
    assert!(calls
        .iter()
        .all(|c| !matches!(c, Call::Place(..) | Call::Indicator(..))));
    assert!(calls.contains(&Call::FeedbackText("Correct!".into())));
}

#[test]
fn indicator_placed_in_front_of_viewer() {
    let mut session = ready(PresenterCapabilities::full());
    session.set_viewer_pose(Pose::identity());
    session.target_found("Ball");

    let (verdict, pose) = session.presenter().last_place().unwrap();
    assert_eq!(verdict, Verdict::Correct);
    assert!(pose.position.approx_eq(&Vec3::new(0.0, 0.0, 1.5), 1e-4));
    assert!(pose.forward().approx_eq(&Vec3::FORWARD, 1e-4));
}

#[test]
fn indicator_follows_turned_viewer() {
    let mut session = ready(PresenterCapabilities::full());
    let viewer = Pose::new(
        Vec3::new(0.0, 1.6, 0.0),
        Rotation::from_yaw(std::f32::consts::FRAC_PI_2),
    );
    session.set_viewer_pose(viewer);
    session.target_found("Box");

    let (_, pose) = session.presenter().last_place().unwrap();
    assert!(pose.position.approx_eq(&Vec3::new(1.5, 1.6, 0.0), 1e-4));
    assert!(pose.forward().approx_eq(&Vec3::RIGHT, 1e-4));
}

#[test]
fn no_viewer_activates_without_placing() {
    let bank = QuestionBank::new(vec![question("Ball")]);
    let settings = SessionSettings {
        main_camera: None,
        ..settings()
    };
    let mut session =
        SessionController::new(bank, settings, Recorder::with(PresenterCapabilities::full()));
    session.show_random_question();
    session.on_target_detected("Ball");

    let calls = &session.presenter().calls;
    assert!(session.presenter().last_place().is_none());
    assert!(calls.contains(&Call::Indicator(Verdict::Correct, true)));
}

#[test]
fn cues_follow_verdict() {
    let audio = RecordingAudio::default();
    let played = audio.played.clone();
    let bank = QuestionBank::new(vec![question("Ball")]);
    let mut session =
        SessionController::new(bank, settings(), Recorder::with(PresenterCapabilities::full()))
            .with_audio(Box::new(audio));

    session.show_random_question();
    session.on_target_detected("Ball");
    session.update(Duration::from_secs(2));
    session.on_target_detected("Box");

    assert_eq!(*played.lock().unwrap(), vec![Cue::Confirm, Cue::Error]);
}

#[test]
fn silent_verdicts_play_nothing() {
    let audio = RecordingAudio::default();
    let played = audio.played.clone();
    let bank = QuestionBank::new(vec![question("Ball")]);
    let settings = SessionSettings {
        sounds: SoundBank {
            correct: Some(Cue::Confirm),
            incorrect: None,
        },
        ..settings()
    };
    let mut session =
        SessionController::new(bank, settings, Recorder::with(PresenterCapabilities::full()))
            .with_audio(Box::new(audio));

    session.show_random_question();
    session.on_target_detected("Box");
    assert!(played.lock().unwrap().is_empty());
}

#[test]
fn duplicate_registration_is_noop() {
    let mut session = quiz(PresenterCapabilities::full());
    assert_eq!(session.validator_count(), 2);
    assert!(!session.register_validator(TargetValidator::new("Ball")));
    assert_eq!(session.validator_count(), 2);
    assert!(session.register_validator(TargetValidator::named("CubeCard", None)));
    assert!(session.validator("CubeCard").is_some());
}

#[test]
fn effect_shows_then_hides() {
    let bank = QuestionBank::new(vec![question("Ball")]);
    let mut session =
        SessionController::new(bank, settings(), Recorder::with(PresenterCapabilities::full()));
    session.register_validator(
        TargetValidator::new("Box").with_effect(TargetEffect::lasting(Duration::from_millis(500))),
    );
    session.show_random_question();
    session.presenter_mut().take();

    assert_eq!(session.target_found("Box"), Some(Verdict::Incorrect));
    let calls = session.presenter_mut().take();
    assert_eq!(
        calls.last(),
        Some(&Call::Effect("Box".into(), Verdict::Incorrect, true))
    );

    session.update(Duration::from_millis(500));
    assert_eq!(
        session.presenter_mut().take(),
        vec![Call::Effect("Box".into(), Verdict::Incorrect, false)]
    );
}

#[test]
fn effect_classified_even_when_not_awaiting() {
    let bank = QuestionBank::new(vec![question("Ball")]);
    let mut session =
        SessionController::new(bank, settings(), Recorder::with(PresenterCapabilities::full()));
    session.register_validator(TargetValidator::new("Ball").with_effect(TargetEffect::default()));
    session.register_validator(TargetValidator::new("Box"));
    session.show_random_question();
    session.target_found("Box");
    session.presenter_mut().take();

    assert_eq!(session.target_found("Ball"), None);
    assert_eq!(
        session.presenter_mut().take(),
        vec![Call::Effect("Ball".into(), Verdict::Correct, true)]
    );
}

#[test]
fn runtime_questions_join_the_bank() {
    let mut session = SessionController::new(
        QuestionBank::default(),
        settings(),
        Recorder::with(PresenterCapabilities::full()),
    );
    assert!(session.show_random_question().is_none());

    session.add_question(question("Cube"));
    let shown = session.show_random_question().map(|q| q.answer().to_string());
    assert_eq!(shown.as_deref(), Some("Cube"));
    assert_eq!(session.bank().len(), 1);
}
