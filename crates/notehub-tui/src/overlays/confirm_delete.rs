//! Delete confirmation.

use crossterm::event::{KeyCode, KeyEvent};
use notehub_core::hierarchy::Cursor;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Paragraph, Wrap};

use super::render_utils::{InputHint, OverlayConfig, render_overlay};
use super::{OverlayAction, OverlayUpdate};
use crate::features::browser::DeleteTarget;

#[derive(Debug, Clone)]
pub struct ConfirmDeleteState {
    pub target: DeleteTarget,
    /// List to refresh once the node is gone.
    pub refresh: Cursor,
}

impl ConfirmDeleteState {
    pub fn new(target: DeleteTarget, refresh: Cursor) -> Self {
        Self { target, refresh }
    }

    pub fn prompt(&self) -> String {
        format!("Are you sure you want to delete \"{}\"?", self.target.label)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => {
                OverlayUpdate::close().with_action(OverlayAction::Delete {
                    target: self.target.clone(),
                    refresh: self.refresh,
                })
            }
            KeyCode::Char('n' | 'N' | 'q') | KeyCode::Esc => OverlayUpdate::close(),
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let hints = [InputHint::new("y", "delete"), InputHint::new("n", "cancel")];
        let layout = render_overlay(
            frame,
            area,
            &OverlayConfig {
                title: &format!("Delete {}", self.target.level.noun()),
                border_color: Color::Red,
                width: 56,
                height: 7,
                hints: &hints,
            },
        );

        let body = Rect::new(
            layout.body.x + 1,
            layout.body.y + 1,
            layout.body.width.saturating_sub(2),
            layout.body.height.saturating_sub(1),
        );
        frame.render_widget(
            Paragraph::new(self.prompt())
                .style(Style::default().fg(Color::White))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            body,
        );
    }
}
