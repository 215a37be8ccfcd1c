//! arquiz-app: hosts for the arquiz AR quiz
//!
//! Two ways to play:
//!
//! - Terminal: an optical HUD in the terminal. WASD moves the simulated head,
//!   the number keys show and hide targets in front of the "camera".
//! - Headless: no screen; a scripted tracking feed reports targets and all
//!   presentation goes to the log.

pub mod audio;
pub mod feed;
mod handlers;
pub mod headless;
pub mod hud;
pub mod state;
mod ui;

use std::time::Duration;

use arquiz_config::QuizConfig;
use arquiz_oui::app::OpticalAppRunner;
use arquiz_oui::input::InputSimulator;
use arquiz_oui::{
    AudioBackend, DisplayContext, OpticalApp, OpticalEvent, RenderBackend, TrackingEvent,
};
use tokio::sync::mpsc;
use tracing::info;

use audio::TerminalBell;
use handlers::handle_event;
use hud::HudPresenter;
use state::QuizState;
use ui::render_quiz;

/// The quiz as a terminal optical app
pub struct QuizApp {
    config: QuizConfig,
}

impl QuizApp {
    pub fn new(config: QuizConfig) -> Self {
        Self { config }
    }
}

impl OpticalApp for QuizApp {
    type State = QuizState<HudPresenter>;

    fn init(&mut self) -> Self::State {
        let volume = self.config.audio.volume;
        let audio = self
            .config
            .audio
            .enabled
            .then(|| Box::new(TerminalBell::new(volume)) as Box<dyn AudioBackend>);
        let presenter = HudPresenter::new(&self.config.feedback);

        let mut state = QuizState::new(&self.config, presenter, audio);
        state.start();
        state
    }

    fn handle_event(&mut self, event: OpticalEvent, state: &mut Self::State) -> bool {
        handle_event(event, state)
    }

    fn update(&mut self, state: &mut Self::State, ctx: &DisplayContext) {
        state.update(ctx.delta_time);
    }

    fn render(&self, state: &Self::State, backend: &mut dyn RenderBackend) {
        render_quiz(state, backend);
    }
}

/// Run the terminal host until the player quits.
///
/// Targets are bound to the number keys in config order; `feed` adds an
/// external tracking source on top of the keyboard.
pub fn run_terminal(
    config: QuizConfig,
    feed: Option<mpsc::UnboundedReceiver<TrackingEvent>>,
    tick_rate: Duration,
) -> std::io::Result<()> {
    let targets = demo_targets(&config);
    info!(targets = targets.len(), "Starting terminal quiz");
    let simulator = InputSimulator::new().with_targets(targets);

    let mut runner = OpticalAppRunner::new(QuizApp::new(config))
        .with_tick_rate(tick_rate)
        .with_simulator(simulator);
    if let Some(feed) = feed {
        runner = runner.with_tracking_feed(feed);
    }

    runner.run()
}

/// Ids the demo feed and the keyboard simulator cycle through
pub fn demo_targets(config: &QuizConfig) -> Vec<String> {
    config
        .trackable_targets()
        .iter()
        .map(|t| t.target_id().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_targets_fall_back_to_answers() {
        let mut config = QuizConfig::default();
        assert_eq!(demo_targets(&config), ["Ball", "Box", "Cube", "Cone"]);

        config.targets.clear();
        assert_eq!(demo_targets(&config), ["Ball", "Box", "Cone", "Cube"]);
    }
}
