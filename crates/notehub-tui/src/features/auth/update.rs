//! Auth feature reducer.
//!
//! Handles form editing and submission. Results are applied by the top-level
//! reducer, which owns the session.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use notehub_core::api::ApiError;
use notehub_core::api::auth::validate_registration;

use super::state::AuthMode;
use crate::effects::UiEffect;
use crate::features::KeyOutcome;
use crate::overlays::{AlertState, Overlay};
use crate::state::TuiState;

pub fn handle_key(tui: &mut TuiState, key: KeyEvent) -> KeyOutcome {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('c' | 'q') if ctrl => KeyOutcome::effect(UiEffect::Quit),
        KeyCode::Char('r') if ctrl => {
            let next = match tui.auth.mode {
                AuthMode::Login => AuthMode::Register,
                AuthMode::Register => AuthMode::Login,
            };
            tui.auth.switch_mode(next);
            KeyOutcome::none()
        }
        KeyCode::Esc if tui.auth.mode == AuthMode::Register => {
            tui.auth.switch_mode(AuthMode::Login);
            KeyOutcome::none()
        }
        KeyCode::Tab | KeyCode::Down => {
            tui.auth.focus_next();
            KeyOutcome::none()
        }
        KeyCode::BackTab | KeyCode::Up => {
            tui.auth.focus_prev();
            KeyOutcome::none()
        }
        KeyCode::Enter if !tui.auth.is_last_field() => {
            tui.auth.focus_next();
            KeyOutcome::none()
        }
        KeyCode::Enter => match tui.auth.mode {
            AuthMode::Login => submit_login(tui),
            AuthMode::Register => submit_register(tui),
        },
        _ => {
            tui.auth.notice = None;
            tui.auth.focused_field_mut().handle_key(key);
            KeyOutcome::none()
        }
    }
}

fn submit_login(tui: &mut TuiState) -> KeyOutcome {
    if tui.tasks.login.is_running() {
        return KeyOutcome::none();
    }
    let email = tui.auth.login.email.value().trim().to_string();
    let password = tui.auth.login.password.value().to_string();
    if email.is_empty() || password.is_empty() {
        return KeyOutcome::overlay(Overlay::Alert(AlertState::error(
            "Please enter your email and password",
        )));
    }

    KeyOutcome::effect(UiEffect::Login {
        task: tui.task_seq.next_id(),
        email,
        password,
    })
}

fn submit_register(tui: &mut TuiState) -> KeyOutcome {
    if tui.tasks.register.is_running() {
        return KeyOutcome::none();
    }
    let registration = tui.auth.register.to_registration();
    if registration.name.is_empty() || registration.email.is_empty() {
        return KeyOutcome::overlay(Overlay::Alert(AlertState::error(
            "Please fill in all fields",
        )));
    }
    if let Err(e) = validate_registration(&registration) {
        return KeyOutcome::overlay(Overlay::Alert(AlertState::error(e.to_string())));
    }

    KeyOutcome::effect(UiEffect::Register {
        task: tui.task_seq.next_id(),
        registration,
    })
}

/// Alert text for a failed login.
pub fn login_failure_message(error: &ApiError) -> String {
    match error {
        ApiError::InvalidCredentials | ApiError::Validation(_) => error.to_string(),
        _ => "Login failed. Please try again.".to_string(),
    }
}

/// Alert text for a failed registration.
pub fn register_failure_message(error: &ApiError) -> String {
    match error {
        ApiError::Registration { .. } | ApiError::Validation(_) => error.to_string(),
        _ => "Registration failed. Please try again.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::AuthMode;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(tui: &mut TuiState, text: &str) {
        for c in text.chars() {
            handle_key(tui, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_login_submits_after_last_field() {
        let mut tui = TuiState::new(None);
        type_text(&mut tui, "ada@example.com");
        let first = handle_key(&mut tui, key(KeyCode::Enter));
        assert!(first.effects.is_empty());
        type_text(&mut tui, "secret");

        let outcome = handle_key(&mut tui, key(KeyCode::Enter));
        assert!(matches!(
            outcome.effects.as_slice(),
            [UiEffect::Login { email, password, .. }]
                if email == "ada@example.com" && password == "secret"
        ));
    }

    #[test]
    fn test_register_mismatch_alerts_without_request() {
        let mut tui = TuiState::new(None);
        handle_key(
            &mut tui,
            KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL),
        );
        assert_eq!(tui.auth.mode, AuthMode::Register);

        type_text(&mut tui, "Ada");
        handle_key(&mut tui, key(KeyCode::Tab));
        type_text(&mut tui, "ada@example.com");
        handle_key(&mut tui, key(KeyCode::Tab));
        type_text(&mut tui, "abcd");
        handle_key(&mut tui, key(KeyCode::Tab));
        type_text(&mut tui, "abce");

        let outcome = handle_key(&mut tui, key(KeyCode::Enter));
        assert!(outcome.effects.is_empty());
        assert!(matches!(
            outcome.overlay,
            Some(Overlay::Alert(ref a)) if a.message == "Passwords do not match!"
        ));
    }

    #[test]
    fn test_register_short_password_alerts_without_request() {
        let mut tui = TuiState::new(None);
        tui.auth.switch_mode(AuthMode::Register);
        tui.auth.register.name.set("Ada");
        tui.auth.register.email.set("ada@example.com");
        tui.auth.register.password.set("abc");
        tui.auth.register.confirm_password.set("abc");
        tui.auth.focus = 3;

        let outcome = handle_key(&mut tui, key(KeyCode::Enter));
        assert!(outcome.effects.is_empty());
        assert!(matches!(
            outcome.overlay,
            Some(Overlay::Alert(ref a))
                if a.message == "Password must be at least 4 characters long"
        ));
    }

    #[test]
    fn test_failure_messages() {
        assert_eq!(
            login_failure_message(&ApiError::InvalidCredentials),
            "Login failed. Please check your credentials."
        );
        assert_eq!(
            login_failure_message(&ApiError::Transport("refused".to_string())),
            "Login failed. Please try again."
        );
        assert_eq!(
            register_failure_message(&ApiError::Registration {
                message: "taken".to_string()
            }),
            "Registration failed: taken"
        );
    }
}
