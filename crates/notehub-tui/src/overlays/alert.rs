//! Blocking message box.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use super::render_utils::{InputHint, OverlayConfig, render_overlay};
use super::{Overlay, OverlayUpdate};

#[derive(Debug, Clone)]
pub struct AlertState {
    pub message: String,
    pub is_error: bool,
    /// Overlay to restore once the alert is dismissed.
    pub resume: Option<Box<Overlay>>,
}

impl AlertState {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
            resume: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: true,
            resume: None,
        }
    }

    #[must_use]
    pub fn resuming(mut self, overlay: Overlay) -> Self {
        self.resume = Some(Box::new(overlay));
        self
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ' | 'q') => match self.resume.take() {
                Some(overlay) => OverlayUpdate::replace(*overlay),
                None => OverlayUpdate::close(),
            },
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let (title, color) = if self.is_error {
            ("Error", Color::Red)
        } else {
            ("Notice", Color::Cyan)
        };

        // Messages may carry whole server bodies; size in usize, clamp to u16
        let message_width = self.message.width();
        let width = u16::try_from(message_width.saturating_add(6))
            .unwrap_or(u16::MAX)
            .clamp(30, 70);
        let text_width = usize::from(width.saturating_sub(4).max(1));
        let lines = u16::try_from(message_width.div_ceil(text_width).max(1)).unwrap_or(u16::MAX);
        let hints = [InputHint::new("Enter", "ok")];
        let layout = render_overlay(
            frame,
            area,
            &OverlayConfig {
                title,
                border_color: color,
                width,
                height: lines.saturating_add(4),
                hints: &hints,
            },
        );

        let body = Rect::new(
            layout.body.x + 1,
            layout.body.y,
            layout.body.width.saturating_sub(2),
            layout.body.height.saturating_sub(1),
        );
        frame.render_widget(
            Paragraph::new(self.message.as_str())
                .style(Style::default().fg(Color::White))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            body,
        );
    }
}
