//! Feedback wording and sound selection.

use arquiz_oui::Cue;

use crate::question::Verdict;

/// Text shown after a detection
pub fn feedback_message(verdict: Verdict, detected_id: &str) -> String {
    match verdict {
        Verdict::Correct => "Correct!".to_string(),
        Verdict::Incorrect => format!("Incorrect. That's a: {detected_id}"),
    }
}

/// Cues played for each verdict. `None` stays silent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundBank {
    pub correct: Option<Cue>,
    pub incorrect: Option<Cue>,
}

impl Default for SoundBank {
    fn default() -> Self {
        Self {
            correct: Some(Cue::Confirm),
            incorrect: Some(Cue::Error),
        }
    }
}

impl SoundBank {
    pub fn silent() -> Self {
        Self {
            correct: None,
            incorrect: None,
        }
    }

    pub fn cue_for(&self, verdict: Verdict) -> Option<Cue> {
        match verdict {
            Verdict::Correct => self.correct,
            Verdict::Incorrect => self.incorrect,
        }
    }
}
