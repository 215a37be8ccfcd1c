//! Outbound presentation port.
//!
//! The session controller never touches widgets directly. Everything it wants
//! the player to see goes through a [`QuizPresenter`], and the presenter says
//! up front which surfaces it actually has.

use arquiz_oui::Pose;

use crate::question::Verdict;

/// The two HUD panels the quiz toggles between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Question,
    Feedback,
}

/// Which presentation surfaces a presenter provides.
///
/// Text and panels are required before a session may start; indicators are
/// optional and skipped when absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PresenterCapabilities {
    pub question_text: bool,
    pub feedback_text: bool,
    pub question_panel: bool,
    pub feedback_panel: bool,
    pub correct_indicator: bool,
    pub incorrect_indicator: bool,
}

impl PresenterCapabilities {
    /// Every surface present
    pub fn full() -> Self {
        Self {
            question_text: true,
            feedback_text: true,
            question_panel: true,
            feedback_panel: true,
            correct_indicator: true,
            incorrect_indicator: true,
        }
    }

    /// Text and panels only
    pub fn text_only() -> Self {
        Self {
            correct_indicator: false,
            incorrect_indicator: false,
            ..Self::full()
        }
    }

    pub fn panel(&self, panel: Panel) -> bool {
        match panel {
            Panel::Question => self.question_panel,
            Panel::Feedback => self.feedback_panel,
        }
    }

    pub fn indicator(&self, verdict: Verdict) -> bool {
        match verdict {
            Verdict::Correct => self.correct_indicator,
            Verdict::Incorrect => self.incorrect_indicator,
        }
    }

    /// Names of the required surfaces this presenter lacks
    pub fn missing_required(&self) -> Vec<&'static str> {
        [
            (self.question_text, "question text"),
            (self.feedback_text, "feedback text"),
            (self.question_panel, "question panel"),
            (self.feedback_panel, "feedback panel"),
        ]
        .into_iter()
        .filter(|(present, _)| !present)
        .map(|(_, name)| name)
        .collect()
    }
}

/// Presentation sink for a quiz session.
///
/// The controller only calls a method when [`capabilities`](Self::capabilities)
/// reports the matching surface, so implementations may treat calls for
/// absent surfaces as unreachable no-ops.
pub trait QuizPresenter {
    fn capabilities(&self) -> PresenterCapabilities;

    fn set_question_text(&mut self, text: &str);

    fn set_feedback_text(&mut self, text: &str);

    fn set_panel_visible(&mut self, panel: Panel, visible: bool);

    /// Move an indicator. It keeps this placement until moved again.
    fn place_indicator(&mut self, verdict: Verdict, pose: Pose);

    fn set_indicator_active(&mut self, verdict: Verdict, active: bool);

    /// Show or hide the transient effect attached to a target
    fn set_effect_visible(&mut self, _target_id: &str, _verdict: Verdict, _visible: bool) {}
}
