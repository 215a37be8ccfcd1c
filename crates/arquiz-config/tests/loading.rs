use std::fs;
use std::path::Path;

use arquiz_config::{load, load_from_path, ConfigError, ConfigSource, QuizConfig, CONFIG_ENV};
use serial_test::serial;
use tempfile::TempDir;

const SMALL: &str = r#"
[session]
feedback_delay_secs = 3.5
seed = 9

[[targets]]
id = "Ball"

[[questions]]
text = "What is round?"
answer = "Ball"
choices = ["Ball", "Box"]
"#;

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

struct CwdGuard(std::path::PathBuf);

impl CwdGuard {
    fn enter(dir: &Path) -> Self {
        let previous = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir).unwrap();
        Self(previous)
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.0);
    }
}

#[test]
#[serial]
fn explicit_path_wins() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "quiz.toml", SMALL);
    let other = write(&dir, "other.toml", "");
    std::env::set_var(CONFIG_ENV, &other);

    let (config, source) = load(Some(&path)).unwrap();
    std::env::remove_var(CONFIG_ENV);

    assert_eq!(source, ConfigSource::Explicit(path));
    assert_eq!(config.session.feedback_delay_secs, 3.5);
    assert_eq!(config.session.seed, Some(9));
    assert_eq!(config.questions[0].choices().len(), 2);
}

#[test]
#[serial]
fn missing_explicit_path_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = load(Some(&dir.path().join("nope.toml"))).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(_)));
}

#[test]
#[serial]
fn env_var_is_used_before_local_file() {
    let dir = TempDir::new().unwrap();
    let from_env = write(&dir, "env.toml", SMALL);
    write(&dir, "arquiz.toml", "[session]\nstart_delay_secs = 4.0\n");
    let _cwd = CwdGuard::enter(dir.path());

    std::env::set_var(CONFIG_ENV, &from_env);
    let result = load(None);
    std::env::remove_var(CONFIG_ENV);

    let (config, source) = result.unwrap();
    assert_eq!(source, ConfigSource::Env(from_env));
    assert_eq!(config.session.start_delay_secs, 1.0);
}

#[test]
#[serial]
fn local_file_is_found() {
    let dir = TempDir::new().unwrap();
    write(&dir, "arquiz.toml", "[session]\nstart_delay_secs = 4.0\n");
    let _cwd = CwdGuard::enter(dir.path());
    std::env::remove_var(CONFIG_ENV);

    let (config, source) = load(None).unwrap();
    assert!(matches!(source, ConfigSource::Local(_)));
    assert_eq!(config.session.start_delay_secs, 4.0);
    assert!(config.questions.is_empty());
}

#[test]
fn invalid_toml_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "broken.toml", "[session\nstart_delay_secs = ");
    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn blank_answer_is_rejected() {
    let toml_str = r#"
[[questions]]
text = "What is round?"
answer = "  "
"#;
    let err = QuizConfig::from_toml_str(toml_str, "inline").unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("blank answer"), "{err}");
}

#[test]
fn negative_delay_is_invalid() {
    let err = QuizConfig::from_toml_str("[session]\nfeedback_delay_secs = -1.0\n", "inline")
        .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn sample_survives_serialization() {
    let sample = QuizConfig::default();
    let text = sample.to_toml_string().unwrap();
    let parsed = QuizConfig::from_toml_str(&text, "sample").unwrap();
    assert_eq!(parsed, sample);
}
