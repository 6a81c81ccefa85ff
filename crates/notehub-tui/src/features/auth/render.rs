//! Auth screen view.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::state::{AuthMode, AuthState};
use crate::common::TextField;
use crate::overlays::render_utils::{
    InputHint, calculate_overlay_area, hint_line, render_field, render_overlay_container,
};
use crate::render::spinner;
use crate::state::TuiState;

const FORM_WIDTH: u16 = 56;

/// Renders the login or register form centered in `area`.
pub fn render_auth(tui: &TuiState, frame: &mut Frame, area: Rect) {
    let auth = &tui.auth;
    let fields = form_fields(auth);
    // notice + blank + fields + blank + status + hints
    let height = fields.len() as u16 + 7;
    let popup = calculate_overlay_area(area, FORM_WIDTH, height);

    let title = match auth.mode {
        AuthMode::Login => "Notehub · Login",
        AuthMode::Register => "Notehub · Register",
    };
    render_overlay_container(frame, popup, title, Color::Cyan);

    let inner = Rect::new(
        popup.x + 2,
        popup.y + 1,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(2),
    );

    if let Some(notice) = &auth.notice {
        frame.render_widget(
            Paragraph::new(Span::styled(notice.as_str(), Style::default().fg(Color::Yellow)))
                .alignment(Alignment::Center),
            Rect::new(inner.x, inner.y, inner.width, 1),
        );
    }

    for (i, (label, field)) in fields.iter().enumerate() {
        let row = Rect::new(inner.x, inner.y + 2 + i as u16, inner.width, 1);
        render_field(frame, row, label, field, i == auth.focus, Color::Cyan);
    }

    let status_y = inner.y + 3 + fields.len() as u16;
    if let Some(status) = busy_line(tui) {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                status,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )))
            .alignment(Alignment::Center),
            Rect::new(inner.x, status_y, inner.width, 1),
        );
    }

    let hints = match auth.mode {
        AuthMode::Login => [
            InputHint::new("Enter", "login"),
            InputHint::new("Ctrl+R", "register"),
            InputHint::new("Ctrl+C", "quit"),
        ],
        AuthMode::Register => [
            InputHint::new("Enter", "register"),
            InputHint::new("Esc", "back to login"),
            InputHint::new("Ctrl+C", "quit"),
        ],
    };
    frame.render_widget(
        Paragraph::new(hint_line(&hints, Color::Cyan)).alignment(Alignment::Center),
        Rect::new(
            inner.x,
            inner.y + inner.height.saturating_sub(1),
            inner.width,
            1,
        ),
    );
}

fn form_fields(auth: &AuthState) -> Vec<(&'static str, &TextField)> {
    match auth.mode {
        AuthMode::Login => vec![
            ("Email", &auth.login.email),
            ("Password", &auth.login.password),
        ],
        AuthMode::Register => vec![
            ("Name", &auth.register.name),
            ("Email", &auth.register.email),
            ("Password", &auth.register.password),
            ("Confirm", &auth.register.confirm_password),
        ],
    }
}

fn busy_line(tui: &TuiState) -> Option<String> {
    let spinner = spinner(tui.spinner_frame);
    if tui.tasks.login.is_running() {
        Some(format!("{spinner} Logging in..."))
    } else if tui.tasks.register.is_running() {
        Some(format!("{spinner} Registering..."))
    } else {
        None
    }
}
