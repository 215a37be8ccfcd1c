//! Scripted tracking feed.
//!
//! Stands in for a real image tracker: a list of steps is replayed on a tokio
//! task and each found/lost event is pushed into an unbounded channel that the
//! host drains once per tick.
//!
//! Script format, one step per line:
//!
//! ```text
//! # comments and blank lines are ignored
//! wait 1.5
//! found Ball
//! lost Ball
//! ```

use std::time::Duration;

use arquiz_oui::TrackingEvent;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum ScriptStep {
    Wait(Duration),
    Track(TrackingEvent),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScriptError {
    #[error("line {line}: unknown command `{command}`")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: `{command}` needs a target id")]
    MissingTarget { line: usize, command: String },

    #[error("line {line}: `{value}` is not a number of seconds")]
    InvalidWait { line: usize, value: String },
}

pub fn parse_script(source: &str) -> Result<Vec<ScriptStep>, ScriptError> {
    let mut steps = Vec::new();

    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }

        let (command, rest) = match text.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (text, ""),
        };

        let step = match command.to_ascii_lowercase().as_str() {
            "wait" => {
                let secs: f64 = rest.parse().map_err(|_| ScriptError::InvalidWait {
                    line,
                    value: rest.to_string(),
                })?;
                if !secs.is_finite() || secs < 0.0 {
                    return Err(ScriptError::InvalidWait {
                        line,
                        value: rest.to_string(),
                    });
                }
                ScriptStep::Wait(Duration::from_secs_f64(secs))
            }
            "found" | "lost" => {
                if rest.is_empty() {
                    return Err(ScriptError::MissingTarget {
                        line,
                        command: command.to_string(),
                    });
                }
                let id = rest.to_string();
                if command.eq_ignore_ascii_case("found") {
                    ScriptStep::Track(TrackingEvent::Found(id))
                } else {
                    ScriptStep::Track(TrackingEvent::Lost(id))
                }
            }
            _ => {
                return Err(ScriptError::UnknownCommand {
                    line,
                    command: command.to_string(),
                })
            }
        };
        steps.push(step);
    }

    Ok(steps)
}

/// Show each target in turn, `rounds` times, leaving `gap` before each one.
pub fn demo_script(targets: &[String], rounds: usize, gap: Duration) -> Vec<ScriptStep> {
    let hold = Duration::from_millis(500);
    targets
        .iter()
        .cycle()
        .take(targets.len() * rounds)
        .flat_map(|id| {
            [
                ScriptStep::Wait(gap),
                ScriptStep::Track(TrackingEvent::Found(id.clone())),
                ScriptStep::Wait(hold),
                ScriptStep::Track(TrackingEvent::Lost(id.clone())),
            ]
        })
        .collect()
}

/// Replay `steps` on a background task.
///
/// The receiver reports `Disconnected` once the script has finished.
pub fn spawn_feed(
    steps: Vec<ScriptStep>,
) -> (JoinHandle<()>, mpsc::UnboundedReceiver<TrackingEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();

    let handle = tokio::spawn(async move {
        for step in steps {
            match step {
                ScriptStep::Wait(delay) => tokio::time::sleep(delay).await,
                ScriptStep::Track(event) => {
                    debug!(?event, "Scripted tracking event");
                    if tx.send(event).is_err() {
                        break;
                    }
                }
            }
        }
        debug!("Tracking script finished");
    });

    (handle, rx)
}
