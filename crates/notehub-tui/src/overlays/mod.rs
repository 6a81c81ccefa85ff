//! Overlay modules for the TUI.
//!
//! Overlays are modal UI components that temporarily take over keyboard input.
//! Each overlay owns its state, key handler, and render function.
//!
//! - `create.rs`: add stream/semester/subject, upload note
//! - `confirm_delete.rs`: delete confirmation
//! - `alert.rs`: blocking message, optionally resuming the overlay it replaced
//! - `render_utils.rs`: shared rendering helpers

pub mod alert;
pub mod confirm_delete;
pub mod create;
pub mod render_utils;

pub use alert::AlertState;
pub use confirm_delete::ConfirmDeleteState;
pub use create::CreateState;
use crossterm::event::KeyEvent;
use notehub_core::api::nodes::NewNode;
use notehub_core::hierarchy::Cursor;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::features::browser::DeleteTarget;
use crate::state::TuiState;

/// Transition returned by overlay key handlers.
#[derive(Debug)]
pub enum OverlayTransition {
    Stay,
    Close,
    /// Swap in another overlay (e.g. an alert handing back the form it covered).
    Replace(Box<Overlay>),
}

/// Work an overlay asks the reducer to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayAction {
    Create { cursor: Cursor, node: NewNode },
    Delete { target: DeleteTarget, refresh: Cursor },
}

/// Update returned by overlay key handlers.
#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    pub action: Option<OverlayAction>,
}

impl OverlayUpdate {
    fn new(transition: OverlayTransition) -> Self {
        Self {
            transition,
            action: None,
        }
    }

    pub fn stay() -> Self {
        Self::new(OverlayTransition::Stay)
    }

    pub fn close() -> Self {
        Self::new(OverlayTransition::Close)
    }

    pub fn replace(overlay: Overlay) -> Self {
        Self::new(OverlayTransition::Replace(Box::new(overlay)))
    }

    #[must_use]
    pub fn with_action(mut self, action: OverlayAction) -> Self {
        self.action = Some(action);
        self
    }
}

#[derive(Debug, Clone)]
pub enum Overlay {
    Create(CreateState),
    ConfirmDelete(ConfirmDeleteState),
    Alert(AlertState),
}

impl Overlay {
    pub fn render(&self, frame: &mut Frame, area: Rect, tui: &TuiState) {
        match self {
            Overlay::Create(c) => c.render(frame, area, tui),
            Overlay::ConfirmDelete(c) => c.render(frame, area),
            Overlay::Alert(a) => a.render(frame, area),
        }
    }

    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::Create(c) => c.handle_key(tui, key),
            Overlay::ConfirmDelete(c) => c.handle_key(key),
            Overlay::Alert(a) => a.handle_key(key),
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        if let Overlay::Create(c) = self {
            c.handle_paste(text);
        }
    }
}

/// Routes a key to the active overlay. Returns `None` when no overlay is open.
pub fn handle_overlay_key(
    tui: &TuiState,
    overlay: &mut Option<Overlay>,
    key: KeyEvent,
) -> Option<OverlayUpdate> {
    overlay.as_mut().map(|o| o.handle_key(tui, key))
}
