//! Terminal HUD layout
//!
//! - Top: question or result panel
//! - World: indicator markers and the found target's name
//! - Bottom: effects, score, countdown and key help

use arquiz_core::{Phase, Verdict};
use arquiz_oui::{Color, OpticalWidget, RenderBackend};

use crate::hud::HudPresenter;
use crate::state::QuizState;

pub fn render_quiz(state: &QuizState<HudPresenter>, backend: &mut dyn RenderBackend) {
    let camera = *backend.camera();
    state.session.presenter().render(backend);

    if let Some(label) = &state.label {
        label.label().render(backend, &camera);
    }

    render_effects(state, backend);
    render_status(state, backend);
    render_help(state, backend);
}

fn render_effects(state: &QuizState<HudPresenter>, backend: &mut dyn RenderBackend) {
    let mut x = 0.02;
    for (target_id, verdict) in state.session.presenter().effects() {
        let (mark, color) = match verdict {
            Verdict::Correct => ("✦", Color::STATUS_GREEN),
            Verdict::Incorrect => ("✧", Color::ALERT_RED),
        };
        let text = format!("{mark} {target_id}");
        backend.draw_hud_text(x, 0.82, &text, color);
        x += 0.02 + text.chars().count() as f32 / 80.0;
    }
}

fn render_status(state: &QuizState<HudPresenter>, backend: &mut dyn RenderBackend) {
    let score = state.score;
    let line = format!("✔ {}  ✘ {}", score.correct, score.incorrect);
    backend.draw_hud_text(0.02, 0.88, &line, Color::Grey);

    let phase = match state.session.phase() {
        Phase::Idle if state.session.is_started() => "Get ready…".to_string(),
        Phase::Idle => state.status.clone().unwrap_or_else(|| "Idle".to_string()),
        Phase::AwaitingAnswer => "Point at the answer".to_string(),
        Phase::ShowingFeedback => match state.session.next_question_in() {
            Some(left) => format!("Next question in {:.1}s", left.as_secs_f32()),
            None => String::new(),
        },
    };
    backend.draw_hud_text(0.25, 0.88, &phase, Color::HUD_CYAN);

    let heading = format!("{:>3.0}°", state.viewer.rotation.heading_degrees());
    backend.draw_hud_text(0.9, 0.88, &heading, Color::DarkGrey);
}

fn render_help(state: &QuizState<HudPresenter>, backend: &mut dyn RenderBackend) {
    // same order as the number-key bindings
    let targets = state
        .targets()
        .iter()
        .take(9)
        .enumerate()
        .map(|(i, target)| {
            let id = target.target_id();
            let tracked = state.session.validator(id).is_some_and(|v| v.is_tracking());
            let mark = if tracked { "●" } else { "○" };
            format!("{}{mark}{id}", i + 1)
        })
        .collect::<Vec<_>>()
        .join(" ");
    backend.draw_hud_text(0.02, 0.92, &targets, Color::Grey);
    backend.draw_hud_text(
        0.02,
        0.96,
        "WASD: look  1-9: show/hide target  N: next question  Esc: quit",
        Color::Rgb(45, 50, 55),
    );
}
