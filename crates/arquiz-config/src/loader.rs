//! Config file discovery and loading.

use std::fmt;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::model::QuizConfig;

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "ARQUIZ_CONFIG";

/// Config file picked up from the working directory
pub const LOCAL_CONFIG: &str = "arquiz.toml";

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `--config` on the command line
    Explicit(PathBuf),
    /// `$ARQUIZ_CONFIG`
    Env(PathBuf),
    /// `./arquiz.toml`
    Local(PathBuf),
    /// Per-user config directory
    User(PathBuf),
    BuiltIn,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::Explicit(p)
            | ConfigSource::Env(p)
            | ConfigSource::Local(p)
            | ConfigSource::User(p) => Some(p),
            ConfigSource::BuiltIn => None,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path() {
            Some(path) => write!(f, "{}", path.display()),
            None => f.write_str("built-in sample"),
        }
    }
}

/// `<config dir>/config.toml` for the current user, if a home directory exists
pub fn user_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "arquiz").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Decide which file to load.
///
/// Search order:
/// 1. `explicit` (from `--config`)
/// 2. `$ARQUIZ_CONFIG`
/// 3. `arquiz.toml` in the current directory
/// 4. the per-user config directory
///
/// A path given explicitly or through the environment must exist.
pub fn resolve(explicit: Option<&Path>) -> Result<ConfigSource, ConfigError> {
    if let Some(path) = explicit {
        return existing(path).map(ConfigSource::Explicit);
    }

    if let Some(value) = std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
        return existing(Path::new(&value)).map(ConfigSource::Env);
    }

    let local = PathBuf::from(LOCAL_CONFIG);
    if local.is_file() {
        return Ok(ConfigSource::Local(local));
    }

    match user_config_path() {
        Some(user) if user.is_file() => Ok(ConfigSource::User(user)),
        _ => Ok(ConfigSource::BuiltIn),
    }
}

fn existing(path: &Path) -> Result<PathBuf, ConfigError> {
    if path.is_file() {
        Ok(path.to_path_buf())
    } else {
        Err(ConfigError::NotFound(path.to_path_buf()))
    }
}

/// Load the effective configuration and report where it came from.
pub fn load(explicit: Option<&Path>) -> Result<(QuizConfig, ConfigSource), ConfigError> {
    let source = resolve(explicit)?;
    let config = match source.path() {
        Some(path) => load_from_path(path)?,
        None => {
            debug!("No config file found, using built-in sample");
            QuizConfig::default()
        }
    };
    info!(
        source = %source,
        questions = config.questions.len(),
        targets = config.targets.len(),
        "Configuration loaded"
    );
    Ok((config, source))
}

pub fn load_from_path(path: &Path) -> Result<QuizConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    QuizConfig::from_toml_str(&content, &path.display().to_string())
}
