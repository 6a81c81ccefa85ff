//! Create form: add a stream, semester or subject, or upload a note.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use notehub_core::api::nodes::NewNode;
use notehub_core::hierarchy::{Cursor, Level};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::render_utils::{InputHint, OverlayConfig, render_field, render_overlay, render_separator};
use super::{OverlayAction, OverlayUpdate};
use crate::common::TextField;
use crate::features::browser::view::add_label;
use crate::render::spinner;
use crate::state::TuiState;

#[derive(Debug, Clone)]
pub struct CreateState {
    /// List the node is created in.
    pub cursor: Cursor,
    pub fields: Vec<(&'static str, TextField)>,
    pub focus: usize,
    pub error: Option<String>,
    /// A create request for this form is in flight.
    pub submitting: bool,
}

impl CreateState {
    pub fn open(cursor: Cursor) -> Self {
        let fields = match cursor.level() {
            Level::Streams => vec![("Name", TextField::new())],
            Level::Semesters => vec![("Semester number", TextField::new())],
            Level::Subjects => vec![("Name", TextField::new())],
            Level::Notes => vec![("Title", TextField::new()), ("File", TextField::new())],
        };
        Self {
            cursor,
            fields,
            focus: 0,
            error: None,
            submitting: false,
        }
    }

    pub fn level(&self) -> Level {
        self.cursor.level()
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map_or("", |(_, f)| f.value())
    }

    /// Builds the node from the form, running local validation.
    pub fn build_node(&self) -> Result<NewNode, String> {
        let node = match self.level() {
            Level::Streams => NewNode::Stream {
                name: self.value(0).trim().to_string(),
            },
            Level::Semesters => NewNode::Semester {
                number: NewNode::parse_semester_number(self.value(0)).map_err(|e| e.to_string())?,
            },
            Level::Subjects => NewNode::Subject {
                name: self.value(0).trim().to_string(),
            },
            Level::Notes => NewNode::Note {
                title: self.value(0).trim().to_string(),
                file: expand_home(self.value(1).trim()),
            },
        };
        node.validate().map_err(|e| e.to_string())?;
        Ok(node)
    }

    pub fn handle_paste(&mut self, text: &str) {
        if let Some((_, field)) = self.fields.get_mut(self.focus) {
            field.insert_str(text);
        }
    }

    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if !matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            self.error = None;
        }

        match key.code {
            KeyCode::Esc => OverlayUpdate::close(),
            KeyCode::Char('c') if ctrl => OverlayUpdate::close(),
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % self.fields.len();
                OverlayUpdate::stay()
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
                OverlayUpdate::stay()
            }
            KeyCode::Enter if self.focus + 1 < self.fields.len() => {
                self.focus += 1;
                OverlayUpdate::stay()
            }
            KeyCode::Enter => {
                if self.submitting || tui.tasks.create.is_running() {
                    self.error = Some("Saving...".to_string());
                    return OverlayUpdate::stay();
                }
                match self.build_node() {
                    Ok(node) => {
                        self.submitting = true;
                        OverlayUpdate::stay().with_action(OverlayAction::Create {
                            cursor: self.cursor,
                            node,
                        })
                    }
                    Err(message) => {
                        self.error = Some(message);
                        OverlayUpdate::stay()
                    }
                }
            }
            _ => {
                if let Some((_, field)) = self.fields.get_mut(self.focus) {
                    field.handle_key(key);
                }
                OverlayUpdate::stay()
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, tui: &TuiState) {
        let hints = [
            InputHint::new("Enter", "save"),
            InputHint::new("Tab", "next field"),
            InputHint::new("Esc", "cancel"),
        ];
        let field_rows = self.fields.len() as u16;
        let layout = render_overlay(
            frame,
            area,
            &OverlayConfig {
                title: add_label(self.level()),
                border_color: Color::Yellow,
                width: 60,
                height: field_rows + 6,
                hints: &hints,
            },
        );

        for (i, (label, field)) in self.fields.iter().enumerate() {
            let row = Rect::new(
                layout.body.x + 1,
                layout.body.y + i as u16,
                layout.body.width.saturating_sub(2),
                1,
            );
            render_field(frame, row, label, field, i == self.focus, Color::Yellow);
        }

        render_separator(frame, layout.body, field_rows);

        let spinner = spinner(tui.spinner_frame);
        let (text, style) = if let Some(error) = &self.error {
            (error.clone(), Style::default().fg(Color::Red))
        } else if self.submitting {
            (format!("{spinner} Saving..."), Style::default().fg(Color::Yellow))
        } else if self.level() == Level::Notes {
            (
                "Path to the file to upload".to_string(),
                Style::default().fg(Color::DarkGray),
            )
        } else {
            (String::new(), Style::default())
        };
        let help_area = Rect::new(
            layout.body.x + 1,
            layout.body.y + field_rows + 1,
            layout.body.width.saturating_sub(2),
            1,
        );
        frame.render_widget(Paragraph::new(Line::from(Span::styled(text, style))), help_area);
    }
}

/// Expands a leading `~/` to the home directory.
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(rest);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::overlays::OverlayTransition;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(state: &mut CreateState, tui: &TuiState, text: &str) {
        for c in text.chars() {
            state.handle_key(tui, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_stream_submit_requests_create() {
        let tui = TuiState::new(None);
        let mut state = CreateState::open(Cursor::AtStreams);
        type_text(&mut state, &tui, "Science");

        let update = state.handle_key(&tui, key(KeyCode::Enter));
        assert!(matches!(update.transition, OverlayTransition::Stay));
        assert_eq!(
            update.action,
            Some(OverlayAction::Create {
                cursor: Cursor::AtStreams,
                node: NewNode::Stream {
                    name: "Science".to_string()
                },
            })
        );
        assert!(state.submitting);
    }

    #[test]
    fn test_bad_semester_number_stays_open_with_error() {
        let tui = TuiState::new(None);
        let mut state = CreateState::open(Cursor::AtSemesters { stream_id: 1 });
        type_text(&mut state, &tui, "two");

        let update = state.handle_key(&tui, key(KeyCode::Enter));
        assert!(update.action.is_none());
        assert_eq!(
            state.error.as_deref(),
            Some("Semester number must be a whole number")
        );
    }

    #[test]
    fn test_note_without_file_is_rejected_locally() {
        let tui = TuiState::new(None);
        let cursor = Cursor::AtNotes {
            stream_id: 1,
            semester_id: 2,
            subject_id: 3,
        };
        let mut state = CreateState::open(cursor);
        type_text(&mut state, &tui, "Week 1");
        // Enter on the title moves to the file field
        state.handle_key(&tui, key(KeyCode::Enter));
        assert_eq!(state.focus, 1);

        let update = state.handle_key(&tui, key(KeyCode::Enter));
        assert!(update.action.is_none());
        assert_eq!(state.error.as_deref(), Some("Please select a file"));
    }

    #[test]
    fn test_note_with_file_builds_upload() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("w1.pdf");
        std::fs::write(&file, b"x").unwrap();

        let tui = TuiState::new(None);
        let mut state = CreateState::open(Cursor::AtNotes {
            stream_id: 1,
            semester_id: 2,
            subject_id: 3,
        });
        type_text(&mut state, &tui, "Week 1");
        state.handle_key(&tui, key(KeyCode::Tab));
        state.handle_paste(&file.display().to_string());

        assert_eq!(
            state.build_node(),
            Ok(NewNode::Note {
                title: "Week 1".to_string(),
                file,
            })
        );
    }

    #[test]
    fn test_second_submit_while_saving_is_ignored() {
        let tui = TuiState::new(None);
        let mut state = CreateState::open(Cursor::AtStreams);
        type_text(&mut state, &tui, "Law");
        state.handle_key(&tui, key(KeyCode::Enter));

        let update = state.handle_key(&tui, key(KeyCode::Enter));
        assert!(update.action.is_none());
    }
}
