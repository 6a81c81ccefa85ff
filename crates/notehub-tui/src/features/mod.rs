//! Feature slices for the TUI (state/update/render per slice).

pub mod auth;
pub mod browser;

use crate::effects::UiEffect;
use crate::overlays::Overlay;

/// Result of a feature key handler: effects to run and an overlay to open.
#[derive(Debug, Default)]
pub struct KeyOutcome {
    pub effects: Vec<UiEffect>,
    pub overlay: Option<Overlay>,
}

impl KeyOutcome {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn effect(effect: UiEffect) -> Self {
        Self {
            effects: vec![effect],
            overlay: None,
        }
    }

    pub fn overlay(overlay: Overlay) -> Self {
        Self {
            effects: Vec::new(),
            overlay: Some(overlay),
        }
    }
}
