//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use std::path::PathBuf;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use notehub_core::api::ApiError;
use notehub_core::api::nodes::Listing;
use notehub_core::hierarchy::{Cursor, Level};
use notehub_core::session::Session;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::auth::AuthMode;
use crate::overlays::{self, AlertState, Overlay, OverlayAction, OverlayTransition, OverlayUpdate};
use crate::state::{AppState, Screen};
use crate::{auth, browser};

/// Effects to run once at startup (fetch streams when already logged in).
pub fn init(app: &mut AppState) -> Vec<UiEffect> {
    if app.tui.session.is_some() {
        vec![browser::navigate(&mut app.tui, Cursor::AtStreams, None)]
    } else {
        vec![]
    }
}

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.tui.spinner_frame = app.tui.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::LoginFinished(result) => handle_login_result(app, result),
        UiEvent::RegisterFinished(result) => handle_register_result(app, result),
        UiEvent::ListLoaded { cursor, result } => handle_list_loaded(app, cursor, result),
        UiEvent::Created { cursor, result } => handle_created(app, cursor, result),
        UiEvent::Deleted {
            level,
            refresh,
            result,
        } => handle_deleted(app, level, refresh, result),
        UiEvent::Downloaded(result) => handle_downloaded(app, result),
        UiEvent::Notice(message) => {
            app.tui.status = Some(message);
            vec![]
        }
        UiEvent::TaskStarted { kind, started } => {
            app.tui.tasks.state_mut(kind).on_started(&started);
            vec![]
        }
        UiEvent::TaskCompleted { kind, completed } => {
            if app.tui.tasks.state_mut(kind).finish_if_active(completed.id) {
                update(app, *completed.result)
            } else {
                tracing::debug!(?kind, id = completed.id.0, "Dropping superseded task result");
                vec![]
            }
        }
    }
}

// ============================================================================
// Terminal Event Handlers
// ============================================================================

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Paste(text) => {
            if let Some(overlay) = app.overlay.as_mut() {
                overlay.handle_paste(&text);
            } else if app.tui.screen() == Screen::Auth {
                app.tui.auth.focused_field_mut().insert_str(&text);
            }
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if let Some(update) = overlays::handle_overlay_key(&app.tui, &mut app.overlay, key) {
        return apply_overlay_update(app, update);
    }

    let outcome = match app.tui.screen() {
        Screen::Auth => auth::handle_key(&mut app.tui, key),
        Screen::Browser => {
            app.tui.status = None;
            if key.code == KeyCode::Char('L') {
                tracing::info!("Logged out");
                return logout(app, None);
            }
            browser::handle_key(&mut app.tui, key)
        }
    };

    if let Some(overlay) = outcome.overlay {
        app.overlay = Some(overlay);
    }
    outcome.effects
}

fn apply_overlay_update(app: &mut AppState, update: OverlayUpdate) -> Vec<UiEffect> {
    match update.transition {
        OverlayTransition::Stay => {}
        OverlayTransition::Close => app.overlay = None,
        OverlayTransition::Replace(next) => app.overlay = Some(*next),
    }

    match update.action {
        None => vec![],
        Some(OverlayAction::Create { cursor, node }) => vec![UiEffect::CreateNode {
            task: app.tui.task_seq.next_id(),
            cursor,
            node,
        }],
        Some(OverlayAction::Delete { target, refresh }) => vec![UiEffect::DeleteNode {
            task: app.tui.task_seq.next_id(),
            level: target.level,
            id: target.id,
            refresh,
        }],
    }
}

// ============================================================================
// Auth Results
// ============================================================================

fn handle_login_result(app: &mut AppState, result: Result<Session, ApiError>) -> Vec<UiEffect> {
    match result {
        Ok(session) => {
            tracing::info!(role = %session.role, "Logged in");
            app.tui.session = Some(session.clone());
            app.tui.auth.reset(None);
            app.tui.browser.reset();
            app.tui.status = None;
            app.overlay = None;
            vec![
                UiEffect::PersistSession { session },
                browser::navigate(&mut app.tui, Cursor::AtStreams, None),
            ]
        }
        Err(e) => {
            if e != ApiError::InvalidCredentials {
                tracing::warn!(error = %e, "Login request failed");
            }
            show_error(app, auth::login_failure_message(&e));
            vec![]
        }
    }
}

fn handle_register_result(app: &mut AppState, result: Result<(), ApiError>) -> Vec<UiEffect> {
    match result {
        Ok(()) => {
            let email = app.tui.auth.register.email.value().trim().to_string();
            app.tui.auth.reset(None);
            app.tui.auth.switch_mode(AuthMode::Login);
            app.tui.auth.login.email.set(email);
            app.tui.auth.focus = 1;
            app.overlay = Some(Overlay::Alert(AlertState::info(
                "Registration successful! Please login.",
            )));
            vec![]
        }
        Err(e) => {
            tracing::warn!(error = %e, "Registration failed");
            show_error(app, auth::register_failure_message(&e));
            vec![]
        }
    }
}

// ============================================================================
// Browser Results
// ============================================================================

fn handle_list_loaded(
    app: &mut AppState,
    cursor: Cursor,
    result: Result<Listing, ApiError>,
) -> Vec<UiEffect> {
    if app.tui.session.is_none() || cursor != app.tui.browser.cursor {
        tracing::debug!(level = %cursor.level(), "Dropping list for inactive cursor");
        return vec![];
    }

    match result {
        Ok(listing) => {
            app.tui.browser.apply_listing(listing);
            vec![]
        }
        Err(e) => handle_api_error(app, e, |app, e| {
            tracing::warn!(level = %cursor.level(), error = %e, "List fetch failed");
            app.tui.browser.list = browser::ListState::Failed;
        }),
    }
}

fn handle_created(
    app: &mut AppState,
    cursor: Cursor,
    result: Result<(), ApiError>,
) -> Vec<UiEffect> {
    match result {
        Ok(()) => {
            tracing::info!(level = %cursor.level(), "Created");
            if is_saving_form(app.overlay.as_ref(), cursor) {
                app.overlay = None;
            }
            if app.tui.session.is_some() && cursor == app.tui.browser.cursor {
                vec![browser::fetch_current(&mut app.tui)]
            } else {
                vec![]
            }
        }
        Err(e) => handle_api_error(app, e, |app, e| {
            tracing::warn!(level = %cursor.level(), error = %e, "Create failed");
            let mut alert = AlertState::error(create_failure_message(cursor.level()));
            // Whatever is open comes back after the alert; the saving form
            // is handed back untouched so the user can retry
            match app.overlay.take() {
                Some(Overlay::Create(mut form)) => {
                    if form.submitting && form.cursor == cursor {
                        form.submitting = false;
                    }
                    alert = alert.resuming(Overlay::Create(form));
                }
                Some(other) => alert = alert.resuming(other),
                None => {}
            }
            app.overlay = Some(Overlay::Alert(alert));
        }),
    }
}

/// True when `overlay` is the create form whose request for `cursor` is in flight.
fn is_saving_form(overlay: Option<&Overlay>, cursor: Cursor) -> bool {
    matches!(overlay, Some(Overlay::Create(form)) if form.submitting && form.cursor == cursor)
}

fn handle_deleted(
    app: &mut AppState,
    level: Level,
    refresh: Cursor,
    result: Result<(), ApiError>,
) -> Vec<UiEffect> {
    match result {
        Ok(()) => {
            tracing::info!(%level, "Deleted");
            // Only the list that held the node is refetched
            if app.tui.session.is_some() && refresh == app.tui.browser.cursor {
                vec![browser::fetch_current(&mut app.tui)]
            } else {
                vec![]
            }
        }
        Err(e) => handle_api_error(app, e, |app, e| {
            tracing::warn!(%level, error = %e, "Delete failed");
            show_error(app, "Failed to delete");
        }),
    }
}

fn handle_downloaded(app: &mut AppState, result: Result<PathBuf, ApiError>) -> Vec<UiEffect> {
    match result {
        Ok(path) => {
            app.tui.status = Some(format!("Saved to {}", path.display()));
            vec![]
        }
        Err(e) => handle_api_error(app, e, |app, e| {
            tracing::warn!(error = %e, "Download failed");
            app.tui.status = None;
            show_error(app, format!("Failed to download note: {e}"));
        }),
    }
}

fn create_failure_message(level: Level) -> String {
    match level {
        Level::Notes => "Failed to upload note".to_string(),
        other => format!("Failed to add {}", other.noun()),
    }
}

// ============================================================================
// Failure Funnel and Logout
// ============================================================================

/// Routes an API failure: an expired session forces a logout, anything else
/// goes to `otherwise`.
fn handle_api_error(
    app: &mut AppState,
    error: ApiError,
    otherwise: impl FnOnce(&mut AppState, &ApiError),
) -> Vec<UiEffect> {
    if error.is_session_expired() {
        tracing::info!("Session expired, logging out");
        return logout(app, Some(error.to_string()));
    }
    otherwise(app, &error);
    vec![]
}

/// Drops the session and returns to an empty login form.
fn logout(app: &mut AppState, notice: Option<String>) -> Vec<UiEffect> {
    app.tui.session = None;
    app.tui.browser.reset();
    app.tui.status = None;
    app.tui.auth.reset(notice.clone());
    app.overlay = notice.map(|message| Overlay::Alert(AlertState::error(message)));

    let mut effects = vec![UiEffect::ClearSession];
    effects.extend(
        app.tui
            .tasks
            .clear_all()
            .into_iter()
            .map(|token| UiEffect::CancelTask { token }),
    );
    effects
}

fn show_error(app: &mut AppState, message: impl Into<String>) {
    app.overlay = Some(Overlay::Alert(AlertState::error(message)));
}
