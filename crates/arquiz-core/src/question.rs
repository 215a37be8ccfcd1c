//! Questions and answer judging.

use serde::{Deserialize, Serialize};

use crate::error::QuestionError;

/// Outcome of comparing a detected target against the expected answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl Verdict {
    pub fn from_match(matched: bool) -> Self {
        if matched {
            Verdict::Correct
        } else {
            Verdict::Incorrect
        }
    }

    pub fn is_correct(&self) -> bool {
        matches!(self, Verdict::Correct)
    }
}

/// One quiz question: the prompt, the target id that answers it, and the
/// targets the player may plausibly point at.
///
/// Immutable once built. Deserializing goes through [`Question::new`], so a
/// loaded question is always playable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionRecord")]
pub struct Question {
    text: String,
    answer: String,
    choices: Vec<String>,
}

/// Wire shape of a question before validation.
#[derive(Deserialize)]
struct QuestionRecord {
    text: String,
    answer: String,
    #[serde(default)]
    choices: Vec<String>,
}

impl TryFrom<QuestionRecord> for Question {
    type Error = QuestionError;

    fn try_from(record: QuestionRecord) -> Result<Self, Self::Error> {
        Question::new(record.text, record.answer, record.choices)
    }
}

impl Question {
    /// Build a question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the text or the answer is blank.
    pub fn new<I, S>(
        text: impl Into<String>,
        answer: impl Into<String>,
        choices: I,
    ) -> Result<Self, QuestionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let text = text.into();
        let answer = answer.into();

        if text.trim().is_empty() {
            return Err(QuestionError::BlankText);
        }
        if answer.trim().is_empty() {
            return Err(QuestionError::BlankAnswer(text));
        }

        Ok(Self {
            text,
            answer,
            choices: choices.into_iter().map(Into::into).collect(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Target id that answers this question
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Targets offered for this question, in order
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    /// Case-insensitive comparison of `target_id` against the answer.
    pub fn is_answered_by(&self, target_id: &str) -> bool {
        eq_ignore_case(&self.answer, target_id)
    }

    pub fn judge(&self, target_id: &str) -> Verdict {
        Verdict::from_match(self.is_answered_by(target_id))
    }
}

/// Unicode-aware case-insensitive equality.
pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube() -> Question {
        Question::new("Which one has six faces?", "Cube", ["Cube", "Ball"]).unwrap()
    }

    #[test]
    fn test_answer_ignores_case() {
        let q = cube();
        for id in ["cube", "CUBE", "Cube", "cUbE"] {
            assert_eq!(q.judge(id), Verdict::Correct, "{id} should match");
        }
        assert_eq!(q.judge("Cubes"), Verdict::Incorrect);
        assert_eq!(q.judge("Ball"), Verdict::Incorrect);
    }

    #[test]
    fn test_non_ascii_case_folding() {
        let q = Question::new("¿Qué es esto?", "Árbol", Vec::<String>::new()).unwrap();
        assert!(q.is_answered_by("árbol"));
        assert!(q.is_answered_by("ÁRBOL"));
    }

    #[test]
    fn test_blank_fields_rejected() {
        assert_eq!(
            Question::new("  ", "Ball", Vec::<String>::new()),
            Err(QuestionError::BlankText)
        );
        assert!(matches!(
            Question::new("What is round?", "", Vec::<String>::new()),
            Err(QuestionError::BlankAnswer(_))
        ));
    }

    #[test]
    fn test_choices_keep_order() {
        let q = cube();
        assert_eq!(q.choices(), ["Cube".to_string(), "Ball".to_string()]);
    }
}
