//! Core quiz logic for arquiz.
//!
//! A [`SessionController`] holds the [`QuestionBank`], picks a random
//! question, and waits for a tracked target to be reported. Each recognisable
//! marker is a [`TargetValidator`] registered with the controller; when the
//! tracking collaborator reports it found, the controller compares it against
//! the current question, presents feedback through a [`QuizPresenter`], and
//! schedules the next question on its [`Timeline`].
//!
//! ```ignore
//! use arquiz_core::{Question, QuestionBank, SessionController, SessionSettings, TargetValidator};
//!
//! let bank = QuestionBank::new(vec![Question::new("What is round?", "Ball", ["Ball", "Box"])?]);
//! let mut session = SessionController::new(bank, SessionSettings::default(), presenter);
//! session.register_validator(TargetValidator::new("Ball"));
//! session.start();
//!
//! // every frame
//! session.update(dt);
//! // from the tracker
//! session.target_found("Ball");
//! ```

pub mod bank;
pub mod error;
pub mod feedback;
pub mod label;
pub mod presenter;
pub mod question;
pub mod session;
pub mod timeline;
pub mod validator;

pub use bank::QuestionBank;
pub use error::QuestionError;
pub use feedback::{feedback_message, SoundBank};
pub use label::{LabelPresenter, Named, LABEL_PLACEHOLDER};
pub use presenter::{Panel, PresenterCapabilities, QuizPresenter};
pub use question::{Question, Verdict};
pub use session::{Phase, Readiness, SessionController, SessionSettings};
pub use timeline::{Timeline, TimerId};
pub use validator::{TargetEffect, TargetValidator};
