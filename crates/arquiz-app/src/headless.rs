//! Headless host: no screen, presentation goes to the log.

use std::time::Duration;

use arquiz_config::{FeedbackSection, QuizConfig};
use arquiz_core::{Panel, PresenterCapabilities, QuizPresenter, Verdict};
use arquiz_oui::{AudioBackend, Pose, TrackingEvent};
use tokio::sync::mpsc::{self, error::TryRecvError};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::audio::LogAudio;
use crate::state::{QuizState, Score};

/// Presenter that logs every change and remembers the latest texts
#[derive(Debug)]
pub struct LogPresenter {
    pub question: String,
    pub feedback: String,
    pub questions_shown: u32,
    capabilities: PresenterCapabilities,
}

impl Default for LogPresenter {
    fn default() -> Self {
        Self::new(&FeedbackSection::default())
    }
}

impl LogPresenter {
    /// Advertise only the indicators `feedback` enables.
    pub fn new(feedback: &FeedbackSection) -> Self {
        Self {
            question: String::new(),
            feedback: String::new(),
            questions_shown: 0,
            capabilities: PresenterCapabilities {
                correct_indicator: feedback.correct_indicator,
                incorrect_indicator: feedback.incorrect_indicator,
                ..PresenterCapabilities::text_only()
            },
        }
    }
}

impl QuizPresenter for LogPresenter {
    fn capabilities(&self) -> PresenterCapabilities {
        self.capabilities
    }

    fn set_question_text(&mut self, text: &str) {
        self.questions_shown += 1;
        self.question = text.to_string();
    }

    fn set_feedback_text(&mut self, text: &str) {
        info!(feedback = %text, "Feedback");
        self.feedback = text.to_string();
    }

    fn set_panel_visible(&mut self, panel: Panel, visible: bool) {
        debug!(?panel, visible, "Panel visibility");
    }

    fn place_indicator(&mut self, verdict: Verdict, pose: Pose) {
        let p = pose.position;
        debug!(?verdict, x = p.x, y = p.y, z = p.z, "Indicator placed");
    }

    fn set_indicator_active(&mut self, verdict: Verdict, active: bool) {
        debug!(?verdict, active, "Indicator");
    }

    fn set_effect_visible(&mut self, target_id: &str, verdict: Verdict, visible: bool) {
        debug!(target_id, ?verdict, visible, "Target effect");
    }
}

/// What a headless run got through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadlessSummary {
    pub questions_shown: u32,
    pub score: Score,
}

/// Drive a session from `feed` until `duration` elapses, or until the feed
/// has closed and the last feedback has played out.
pub async fn run_headless(
    config: &QuizConfig,
    mut feed: mpsc::UnboundedReceiver<TrackingEvent>,
    duration: Option<Duration>,
    tick: Duration,
) -> HeadlessSummary {
    let presenter = LogPresenter::new(&config.feedback);
    let audio: Box<dyn AudioBackend> = Box::new(LogAudio::default());
    let mut state = QuizState::new(config, presenter, Some(audio));
    if let Some(camera) = config.session_settings().main_camera {
        state.set_viewer(camera);
    }
    debug!(
        questions = state.session.bank().len(),
        targets = state.targets().len(),
        "Headless session prepared"
    );

    let started_at = Instant::now();
    if !state.start().is_ready() {
        warn!("Headless session could not start");
    }

    let drain_grace = config.session_settings().feedback_delay + tick;
    let mut feed_closed_at: Option<Instant> = None;

    let mut interval = tokio::time::interval(tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last = Instant::now();

    loop {
        interval.tick().await;
        let now = Instant::now();
        let dt = now - last;
        last = now;

        loop {
            match feed.try_recv() {
                Ok(event) => {
                    state.apply_tracking(&event);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    feed_closed_at.get_or_insert(now);
                    break;
                }
            }
        }

        state.update(dt);

        if duration.is_some_and(|d| now - started_at >= d) {
            debug!("Headless duration reached");
            break;
        }
        if feed_closed_at.is_some_and(|closed| now - closed >= drain_grace) {
            debug!("Tracking feed finished");
            break;
        }
    }

    let summary = HeadlessSummary {
        questions_shown: state.session.presenter().questions_shown,
        score: state.score,
    };
    info!(
        questions = summary.questions_shown,
        correct = summary.score.correct,
        incorrect = summary.score.incorrect,
        "Headless session finished"
    );
    summary
}
