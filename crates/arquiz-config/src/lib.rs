//! TOML configuration for arquiz.
//!
//! A [`QuizConfig`] carries everything a session needs: the questions, the
//! targets the tracker knows, timings, audio cues and the fallback camera.
//! [`load`] walks the usual locations and falls back to the built-in sample.

pub mod error;
pub mod loader;
pub mod model;

pub use error::ConfigError;
pub use loader::{
    load, load_from_path, resolve, user_config_path, ConfigSource, CONFIG_ENV, LOCAL_CONFIG,
};
pub use model::{
    AudioSection, CameraConfig, FeedbackSection, QuizConfig, SessionSection, TargetConfig,
    ViewerSection,
};
