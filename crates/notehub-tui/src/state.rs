//! Application state composition.
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── session: Option<Session>  (None: auth screen, Some: browser)
//! │   ├── auth: AuthState           (login/register forms)
//! │   ├── browser: BrowserState     (cursor, active list, highlight)
//! │   ├── task_seq: TaskSeq         (async task id generator)
//! │   └── tasks: Tasks              (task lifecycle state)
//! └── overlay: Option<Overlay>      (modal overlays)
//! ```
//!
//! State is split between `TuiState` and `Option<Overlay>` so overlay
//! handlers can get `&mut self` and `&TuiState` at the same time.

use notehub_core::session::{Role, Session};

use crate::common::{TaskSeq, Tasks};
use crate::features::auth::AuthState;
use crate::features::browser::BrowserState;
use crate::overlays::Overlay;

/// Combined application state for the TUI.
pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    /// Starts on the browser when a stored session exists, else on login.
    pub fn new(session: Option<Session>) -> Self {
        Self {
            tui: TuiState::new(session),
            overlay: None,
        }
    }
}

/// Which top-level screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Auth,
    Browser,
}

/// TUI application state (non-overlay).
pub struct TuiState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    /// Current session; `None` means logged out.
    pub session: Option<Session>,
    pub auth: AuthState,
    pub browser: BrowserState,
    /// Task id sequence for async operations.
    pub task_seq: TaskSeq,
    /// Task lifecycle state for async operations.
    pub tasks: Tasks,
    /// Transient status bar message.
    pub status: Option<String>,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
}

impl TuiState {
    pub fn new(session: Option<Session>) -> Self {
        Self {
            should_quit: false,
            session,
            auth: AuthState::default(),
            browser: BrowserState::default(),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            status: None,
            spinner_frame: 0,
        }
    }

    pub fn screen(&self) -> Screen {
        if self.session.is_some() {
            Screen::Browser
        } else {
            Screen::Auth
        }
    }

    /// Role of the current session (`User` when logged out).
    pub fn role(&self) -> Role {
        self.session.as_ref().map_or(Role::User, |s| s.role)
    }
}
