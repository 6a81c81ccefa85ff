//! UI event types.
//!
//! All external inputs (terminal, async results) are converted to `UiEvent`
//! before being processed by the reducer.
//!
//! ## Task Lifecycle Events
//!
//! Async work uses a uniform lifecycle:
//! - The runtime emits `UiEvent::TaskStarted` once a task is actually spawned
//! - The runtime emits `UiEvent::TaskCompleted` with the result event when done
//! - The reducer is the only place that mutates `TaskState`, and drops
//!   completions of tasks that are no longer active

use std::path::PathBuf;

use crossterm::event::Event as CrosstermEvent;
use notehub_core::api::ApiError;
use notehub_core::api::nodes::Listing;
use notehub_core::hierarchy::{Cursor, Level};
use notehub_core::session::Session;

use crate::common::{TaskCompleted, TaskKind, TaskStarted};

/// Unified event enum for the TUI.
#[derive(Debug)]
pub enum UiEvent {
    /// Timer tick (spinner animation).
    Tick,

    /// Terminal input event (key, paste, resize).
    Terminal(CrosstermEvent),

    /// Login request finished.
    LoginFinished(Result<Session, ApiError>),

    /// Registration request finished.
    RegisterFinished(Result<(), ApiError>),

    /// A list fetch finished for `cursor`.
    ListLoaded {
        cursor: Cursor,
        result: Result<Listing, ApiError>,
    },

    /// A create request under `cursor` finished.
    Created {
        cursor: Cursor,
        result: Result<(), ApiError>,
    },

    /// A delete request finished; `refresh` is the list that held the node.
    Deleted {
        level: Level,
        refresh: Cursor,
        result: Result<(), ApiError>,
    },

    /// A note download finished.
    Downloaded(Result<PathBuf, ApiError>),

    /// One-line message for the status bar (e.g. runtime I/O failures).
    Notice(String),

    /// Task lifecycle: runtime started a task.
    TaskStarted {
        kind: TaskKind,
        started: TaskStarted,
    },

    /// Task lifecycle: runtime completed a task (wraps the result event).
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },
}
