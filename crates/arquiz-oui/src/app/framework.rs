//! Optical application framework

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event as CrosstermEvent, KeyCode, KeyModifiers},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use tokio::sync::mpsc;

use crate::context::DisplayContext;
use crate::input::{InputSimulator, OpticalEvent, TrackingEvent};
use crate::renderer::{terminal::TerminalBackend, RenderBackend};

/// Optical application trait
pub trait OpticalApp {
    /// Application state type
    type State;

    /// Initialize application state
    fn init(&mut self) -> Self::State;

    /// Handle an optical event, return true to continue, false to quit
    fn handle_event(&mut self, event: OpticalEvent, state: &mut Self::State) -> bool;

    /// Advance application state by one frame
    fn update(&mut self, state: &mut Self::State, ctx: &DisplayContext);

    /// Render the application
    fn render(&self, state: &Self::State, backend: &mut dyn RenderBackend);
}

/// Leaves raw mode and the alternate screen however `run` exits
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Terminal runner for optical apps
pub struct OpticalAppRunner<A: OpticalApp> {
    app: A,
    input_simulator: InputSimulator,
    tracking: Option<mpsc::UnboundedReceiver<TrackingEvent>>,
    context: DisplayContext,
    tick_rate: Duration,
}

impl<A: OpticalApp> OpticalAppRunner<A> {
    pub fn new(app: A) -> Self {
        Self {
            app,
            input_simulator: InputSimulator::new(),
            tracking: None,
            context: DisplayContext::default(),
            tick_rate: Duration::from_millis(100),
        }
    }

    pub fn with_tick_rate(mut self, rate: Duration) -> Self {
        self.tick_rate = rate;
        self
    }

    pub fn with_simulator(mut self, simulator: InputSimulator) -> Self {
        self.input_simulator = simulator;
        self
    }

    /// Drain tracking notifications from an external collaborator every tick
    pub fn with_tracking_feed(mut self, feed: mpsc::UnboundedReceiver<TrackingEvent>) -> Self {
        self.tracking = Some(feed);
        self
    }

    /// Run until the app asks to quit or Ctrl+Q is pressed
    pub fn run(&mut self) -> io::Result<()> {
        let mut backend = TerminalBackend::new().map_err(|e| io::Error::other(e.to_string()))?;
        let _guard = TerminalGuard::enter()?;

        let mut state = self.app.init();
        let mut last_tick = Instant::now();

        // Hand the starting head pose to the app before the first frame
        let pose = self.input_simulator.head_pose();
        self.app.handle_event(OpticalEvent::HeadPose { pose }, &mut state);

        loop {
            let timeout = self
                .tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or_default();

            if event::poll(timeout)? {
                match event::read()? {
                    CrosstermEvent::Key(key) => {
                        if key.code == KeyCode::Char('q')
                            && key.modifiers.contains(KeyModifiers::CONTROL)
                        {
                            return Ok(());
                        }

                        for event in self.input_simulator.process_key(key) {
                            if !self.app.handle_event(event, &mut state) {
                                return Ok(());
                            }
                        }
                    }
                    CrosstermEvent::Resize(width, height) => {
                        let event = OpticalEvent::Resize {
                            width: width as u32,
                            height: height as u32,
                        };
                        self.app.handle_event(event, &mut state);
                    }
                    _ => {}
                }
            }

            if let Some(feed) = self.tracking.as_mut() {
                while let Ok(tracking) = feed.try_recv() {
                    if !self.app.handle_event(OpticalEvent::Tracking(tracking), &mut state) {
                        return Ok(());
                    }
                }
            }

            if last_tick.elapsed() >= self.tick_rate {
                self.context.update(last_tick.elapsed());
                last_tick = Instant::now();

                self.app.update(&mut state, &self.context);

                backend.set_camera(self.input_simulator.head_pose());
                backend
                    .begin_frame()
                    .map_err(|e| io::Error::other(e.to_string()))?;
                self.app.render(&state, &mut backend);
                backend
                    .end_frame()
                    .map_err(|e| io::Error::other(e.to_string()))?;

                if !self.app.handle_event(OpticalEvent::Tick, &mut state) {
                    return Ok(());
                }
            }
        }
    }
}
