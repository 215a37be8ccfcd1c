//! HUD-backed presenter for the terminal host

use std::collections::BTreeMap;

use arquiz_config::FeedbackSection;
use arquiz_core::{Panel, PresenterCapabilities, QuizPresenter, Verdict};
use arquiz_oui::widget::{HudPanel, WorldMarker};
use arquiz_oui::{Color, OpticalWidget, Pose, RenderBackend};

/// Quiz panels and indicator markers drawn on the optical HUD
pub struct HudPresenter {
    question: HudPanel,
    feedback: HudPanel,
    correct: Option<Indicator>,
    incorrect: Option<Indicator>,
    effects: BTreeMap<String, Verdict>,
}

/// A marker plus the placement it returns to when re-activated
struct Indicator {
    marker: WorldMarker,
    placement: Option<Pose>,
}

impl Indicator {
    fn new(id: &str, symbol: &str, color: Color) -> Self {
        Self {
            marker: WorldMarker::new(id, symbol, color),
            placement: None,
        }
    }
}

impl HudPresenter {
    pub fn new(feedback: &FeedbackSection) -> Self {
        let question = HudPanel::new("question")
            .position(0.15, 0.06)
            .size(0.7, 0.18)
            .title("QUESTION")
            .border_color(Color::HUD_CYAN);
        let feedback_panel = HudPanel::new("feedback")
            .position(0.25, 0.06)
            .size(0.5, 0.14)
            .title("RESULT")
            .border_color(Color::GOLD);

        Self {
            question,
            feedback: feedback_panel,
            correct: feedback
                .correct_indicator
                .then(|| Indicator::new("indicator-correct", "✔", Color::STATUS_GREEN)),
            incorrect: feedback
                .incorrect_indicator
                .then(|| Indicator::new("indicator-incorrect", "✘", Color::ALERT_RED)),
            effects: BTreeMap::new(),
        }
    }

    fn indicator_mut(&mut self, verdict: Verdict) -> Option<&mut Indicator> {
        match verdict {
            Verdict::Correct => self.correct.as_mut(),
            Verdict::Incorrect => self.incorrect.as_mut(),
        }
    }

    pub fn panel_visible(&self, panel: Panel) -> bool {
        match panel {
            Panel::Question => self.question.is_visible(),
            Panel::Feedback => self.feedback.is_visible(),
        }
    }

    pub fn question_text(&self) -> Option<&str> {
        self.question.lines().first().map(|(text, _)| text.as_str())
    }

    pub fn feedback_text(&self) -> Option<&str> {
        self.feedback.lines().first().map(|(text, _)| text.as_str())
    }

    pub fn indicator_pose(&self, verdict: Verdict) -> Option<Pose> {
        let indicator = match verdict {
            Verdict::Correct => self.correct.as_ref(),
            Verdict::Incorrect => self.incorrect.as_ref(),
        };
        indicator.and_then(|i| i.marker.pose())
    }

    /// Targets currently showing an effect
    pub fn effects(&self) -> impl Iterator<Item = (&str, Verdict)> {
        self.effects.iter().map(|(id, v)| (id.as_str(), *v))
    }

    pub fn render(&self, backend: &mut dyn RenderBackend) {
        let camera = *backend.camera();
        self.question.render(backend, &camera);
        self.feedback.render(backend, &camera);
        for indicator in [&self.correct, &self.incorrect].into_iter().flatten() {
            indicator.marker.render(backend, &camera);
        }
    }
}

impl QuizPresenter for HudPresenter {
    fn capabilities(&self) -> PresenterCapabilities {
        PresenterCapabilities {
            correct_indicator: self.correct.is_some(),
            incorrect_indicator: self.incorrect.is_some(),
            ..PresenterCapabilities::text_only()
        }
    }

    fn set_question_text(&mut self, text: &str) {
        self.question.set_text(text, Color::White);
    }

    fn set_feedback_text(&mut self, text: &str) {
        self.feedback.set_text(text, Color::White);
    }

    fn set_panel_visible(&mut self, panel: Panel, visible: bool) {
        match panel {
            Panel::Question => self.question.set_visible(visible),
            Panel::Feedback => self.feedback.set_visible(visible),
        }
    }

    fn place_indicator(&mut self, verdict: Verdict, pose: Pose) {
        if let Some(indicator) = self.indicator_mut(verdict) {
            indicator.placement = Some(pose);
            if indicator.marker.is_visible() {
                indicator.marker.place(Some(pose));
            }
        }
    }

    fn set_indicator_active(&mut self, verdict: Verdict, active: bool) {
        let color = match verdict {
            Verdict::Correct => Color::STATUS_GREEN,
            Verdict::Incorrect => Color::ALERT_RED,
        };
        if active {
            self.feedback.set_border_color(color);
        }
        if let Some(indicator) = self.indicator_mut(verdict) {
            let pose = if active { indicator.placement } else { None };
            indicator.marker.place(pose);
        }
    }

    fn set_effect_visible(&mut self, target_id: &str, verdict: Verdict, visible: bool) {
        if visible {
            self.effects.insert(target_id.to_string(), verdict);
        } else if self.effects.get(target_id) == Some(&verdict) {
            self.effects.remove(target_id);
        }
    }
}
