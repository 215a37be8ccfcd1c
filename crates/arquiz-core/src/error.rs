//! Error types for quiz content.

/// A question record that cannot be played.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionError {
    #[error("question text is blank")]
    BlankText,

    #[error("question `{0}` has a blank answer target")]
    BlankAnswer(String),
}
