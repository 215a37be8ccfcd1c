//! Terminal host event handling

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use arquiz_oui::OpticalEvent;
use tracing::debug;

use crate::hud::HudPresenter;
use crate::state::QuizState;

/// Returns false to quit
pub fn handle_event(event: OpticalEvent, state: &mut QuizState<HudPresenter>) -> bool {
    match event {
        OpticalEvent::HeadPose { pose } => {
            state.set_viewer(pose);
            true
        }
        OpticalEvent::Tracking(tracking) => {
            state.apply_tracking(&tracking);
            true
        }
        OpticalEvent::Key(key) => handle_key(key, state),
        OpticalEvent::Resize { width, height } => {
            debug!(width, height, "Terminal resized");
            true
        }
        OpticalEvent::Tick => true,
    }
}

fn handle_key(key: KeyEvent, state: &mut QuizState<HudPresenter>) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return false;
    }
    match key.code {
        KeyCode::Esc => return false,
        KeyCode::Char('n') | KeyCode::Char('N') => {
            if state.session.force_new_question().is_some() {
                state.status = None;
            }
        }
        _ => {}
    }
    true
}
