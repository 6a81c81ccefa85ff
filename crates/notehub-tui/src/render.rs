//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame`, and never
//! mutate state or return effects.

use ratatui::Frame;

use crate::state::{AppState, Screen};
use crate::{auth, browser};

/// Spinner frames for loading indicators.
pub const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Ticks per spinner frame.
const SPINNER_SPEED_DIVISOR: usize = 4;

pub fn spinner(frame: usize) -> &'static str {
    SPINNER_FRAMES[(frame / SPINNER_SPEED_DIVISOR) % SPINNER_FRAMES.len()]
}

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let state = &app.tui;

    match state.screen() {
        Screen::Auth => auth::render_auth(state, frame, area),
        Screen::Browser => browser::render_browser(state, frame, area),
    }

    // Overlay last, so it appears on top
    if let Some(overlay) = &app.overlay {
        overlay.render(frame, area, state);
    }
}
