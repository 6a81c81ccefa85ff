//! Inbox channel: async handlers send `UiEvent`s here, the runtime drains
//! them once per loop iteration.

use tokio::sync::mpsc;

use crate::events::UiEvent;

/// Cloned into every spawned task.
pub type UiEventSender = mpsc::UnboundedSender<UiEvent>;
/// Drained by the runtime before each poll.
pub type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;

pub fn channel() -> (UiEventSender, UiEventReceiver) {
    mpsc::unbounded_channel()
}
