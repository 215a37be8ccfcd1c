//! arquiz: point the camera at the right target
//!
//! Usage:
//!   arquiz                          # terminal HUD with the keyboard as tracker
//!   arquiz --config quiz.toml       # use a specific question set
//!   arquiz --headless               # log-only run with a demo tracking feed
//!   arquiz --headless --script s.txt --duration 30
//!   arquiz --print-config           # dump the effective configuration

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use arquiz_app::feed::{demo_script, parse_script, spawn_feed};
use arquiz_app::headless::run_headless;
use arquiz_app::{demo_targets, run_terminal};

#[derive(Parser)]
#[command(name = "arquiz", version, about = "Augmented-reality quiz: point at the right target")]
struct Cli {
    /// Config file path
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Run without a screen, logging to stderr
    #[arg(long)]
    headless: bool,

    /// Tracking script to replay (see `feed` module docs for the format)
    #[arg(long)]
    script: Option<PathBuf>,

    /// Stop a headless run after this many seconds
    #[arg(long)]
    duration: Option<f64>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Frame interval in milliseconds
    #[arg(long, default_value = "100")]
    tick_ms: u64,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.log_file.as_deref(), cli.headless)?;

    let (config, source) =
        arquiz_config::load(cli.config.as_deref()).context("failed to load configuration")?;
    if cli.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }
    info!(%source, "Using configuration");

    let tick = Duration::from_millis(cli.tick_ms.max(1));
    let duration = cli
        .duration
        .map(Duration::try_from_secs_f64)
        .transpose()
        .context("--duration must be a non-negative number of seconds")?;

    let script = match &cli.script {
        Some(path) => {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read tracking script {}", path.display()))?;
            let steps = parse_script(&source)
                .with_context(|| format!("invalid tracking script {}", path.display()))?;
            Some(steps)
        }
        None => None,
    };

    if cli.headless {
        let steps = script.unwrap_or_else(|| {
            let gap = config
                .session_settings()
                .feedback_delay
                .saturating_add(Duration::from_secs(1));
            demo_script(&demo_targets(&config), 2, gap)
        });
        let (feed_task, feed) = spawn_feed(steps);
        let summary = run_headless(&config, feed, duration, tick).await;
        feed_task.abort();

        println!(
            "{} questions shown, {} correct, {} incorrect",
            summary.questions_shown, summary.score.correct, summary.score.incorrect
        );
        return Ok(());
    }

    let (feed_task, feed) = match script {
        Some(steps) => {
            let (task, feed) = spawn_feed(steps);
            (Some(task), Some(feed))
        }
        None => (None, None),
    };
    let result = tokio::task::block_in_place(|| run_terminal(config, feed, tick));
    if let Some(task) = feed_task {
        task.abort();
    }
    result.context("terminal session failed")
}

/// Logs go to `log_file` when given, else to stderr in headless mode. The
/// terminal HUD owns the screen, so without a file it logs nowhere.
fn init_tracing(log_file: Option<&Path>, headless: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,arquiz=info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
        None if headless => builder.with_writer(std::io::stderr).try_init(),
        None => return Ok(()),
    };
    result.map_err(|e| anyhow!(e))
}
