//! Browser key handling and navigation.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use notehub_core::hierarchy::{Cursor, NodeId};

use super::state::ListState;
use super::view::{ListBody, RowTarget, list_view};
use crate::effects::UiEffect;
use crate::features::KeyOutcome;
use crate::overlays::{ConfirmDeleteState, CreateState, Overlay};
use crate::state::TuiState;

/// Moves the browser to `cursor` and requests its list.
///
/// `retained` is highlighted once the list arrives, if it is still present.
pub fn navigate(tui: &mut TuiState, cursor: Cursor, retained: Option<NodeId>) -> UiEffect {
    let browser = &mut tui.browser;
    browser.trail.truncate(cursor.depth());
    browser.cursor = cursor;
    browser.list = ListState::Loading;
    browser.selected = 0;
    browser.retained = retained;
    UiEffect::FetchList {
        task: tui.task_seq.next_id(),
        cursor,
    }
}

/// Refetches the active list, keeping the highlighted row.
pub fn fetch_current(tui: &mut TuiState) -> UiEffect {
    let retained = tui
        .browser
        .selected_entry()
        .map(|(id, _)| id)
        .or_else(|| tui.browser.retained.clone());
    let selected = tui.browser.selected;
    let effect = navigate(tui, tui.browser.cursor, retained);
    tui.browser.selected = selected;
    effect
}

pub fn handle_key(tui: &mut TuiState, key: KeyEvent) -> KeyOutcome {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('c') if ctrl => KeyOutcome::effect(UiEffect::Quit),
        KeyCode::Char('q') => KeyOutcome::effect(UiEffect::Quit),
        KeyCode::Down | KeyCode::Char('j') => {
            tui.browser.select_next();
            KeyOutcome::none()
        }
        KeyCode::Up | KeyCode::Char('k') => {
            tui.browser.select_prev();
            KeyOutcome::none()
        }
        KeyCode::Home | KeyCode::Char('g') => {
            tui.browser.select_first();
            KeyOutcome::none()
        }
        KeyCode::End | KeyCode::Char('G') => {
            tui.browser.select_last();
            KeyOutcome::none()
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => activate(tui),
        KeyCode::Left | KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('h') => go_back(tui),
        KeyCode::Char('r') => KeyOutcome::effect(fetch_current(tui)),
        KeyCode::Char('s') => download(tui),
        KeyCode::Char('a') => open_create(tui),
        KeyCode::Char('d') | KeyCode::Delete => open_delete(tui),
        _ => KeyOutcome::none(),
    }
}

fn activate(tui: &mut TuiState) -> KeyOutcome {
    let view = list_view(&tui.browser, tui.role());
    let ListBody::Rows(rows) = view.body else {
        return KeyOutcome::none();
    };
    let Some(row) = rows.into_iter().nth(tui.browser.selected) else {
        return KeyOutcome::none();
    };

    match row.target {
        RowTarget::Drill(id) => {
            let Some(next) = tui.browser.cursor.select(id) else {
                return KeyOutcome::none();
            };
            tui.browser.trail.truncate(tui.browser.cursor.depth());
            tui.browser.trail.push(row.label);
            KeyOutcome::effect(navigate(tui, next, None))
        }
        RowTarget::OpenFile(file_url) => KeyOutcome::effect(UiEffect::OpenNote { file_url }),
    }
}

fn go_back(tui: &mut TuiState) -> KeyOutcome {
    match tui.browser.cursor.go_back() {
        Some((parent, left)) => {
            KeyOutcome::effect(navigate(tui, parent, Some(NodeId::Numeric(left))))
        }
        None => KeyOutcome::none(),
    }
}

fn download(tui: &mut TuiState) -> KeyOutcome {
    let Some(note) = tui.browser.selected_note().cloned() else {
        return KeyOutcome::none();
    };
    if tui.tasks.download.is_running() {
        tui.status = Some("A download is already in progress".to_string());
        return KeyOutcome::none();
    }
    tui.status = Some(format!("Downloading {}...", note.title));
    KeyOutcome::effect(UiEffect::DownloadNote {
        task: tui.task_seq.next_id(),
        note,
    })
}

fn open_create(tui: &mut TuiState) -> KeyOutcome {
    let view = list_view(&tui.browser, tui.role());
    if view.add.is_none() {
        return KeyOutcome::none();
    }
    KeyOutcome::overlay(Overlay::Create(CreateState::open(tui.browser.cursor)))
}

fn open_delete(tui: &mut TuiState) -> KeyOutcome {
    let view = list_view(&tui.browser, tui.role());
    let ListBody::Rows(rows) = view.body else {
        return KeyOutcome::none();
    };
    let Some(target) = rows
        .into_iter()
        .nth(tui.browser.selected)
        .and_then(|row| row.delete)
    else {
        return KeyOutcome::none();
    };
    // One delete at a time; a second would supersede the first's result
    if tui.tasks.delete.is_running() {
        tui.status = Some("A delete is already in progress".to_string());
        return KeyOutcome::none();
    }
    KeyOutcome::overlay(Overlay::ConfirmDelete(ConfirmDeleteState::new(
        target,
        tui.browser.cursor,
    )))
}

#[cfg(test)]
mod tests {
    use notehub_core::api::models::{Note, Semester, Stream};
    use notehub_core::api::nodes::Listing;
    use notehub_core::session::{Role, Session};

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn tui_with(role: Role) -> TuiState {
        TuiState::new(Some(Session::new("t", role)))
    }

    fn stream_listing() -> Listing {
        Listing::Streams(vec![
            Stream {
                id: 4,
                name: "Science".to_string(),
            },
            Stream {
                id: 9,
                name: "Arts".to_string(),
            },
        ])
    }

    #[test]
    fn test_enter_drills_into_selected_stream() {
        let mut tui = tui_with(Role::User);
        tui.browser.apply_listing(stream_listing());
        tui.browser.select_next();

        let outcome = handle_key(&mut tui, key(KeyCode::Enter));
        assert!(matches!(
            outcome.effects.as_slice(),
            [UiEffect::FetchList {
                cursor: Cursor::AtSemesters { stream_id: 9 },
                ..
            }]
        ));
        assert_eq!(tui.browser.cursor, Cursor::AtSemesters { stream_id: 9 });
        assert_eq!(tui.browser.list, ListState::Loading);
        assert_eq!(tui.browser.trail, vec!["Arts".to_string()]);
    }

    #[test]
    fn test_back_from_semesters_retains_stream() {
        let mut tui = tui_with(Role::User);
        tui.browser.cursor = Cursor::AtSemesters { stream_id: 9 };
        tui.browser.trail = vec!["Arts".to_string()];
        tui.browser.apply_listing(Listing::Semesters(vec![Semester { id: 1, number: 1 }]));

        let outcome = handle_key(&mut tui, key(KeyCode::Esc));
        assert!(matches!(
            outcome.effects.as_slice(),
            [UiEffect::FetchList {
                cursor: Cursor::AtStreams,
                ..
            }]
        ));
        assert_eq!(tui.browser.retained, Some(NodeId::Numeric(9)));
        assert!(tui.browser.trail.is_empty());
    }

    #[test]
    fn test_back_at_streams_does_nothing() {
        let mut tui = tui_with(Role::User);
        let outcome = handle_key(&mut tui, key(KeyCode::Left));
        assert!(outcome.effects.is_empty());
        assert_eq!(tui.browser.cursor, Cursor::AtStreams);
    }

    #[test]
    fn test_user_cannot_open_admin_overlays() {
        let mut tui = tui_with(Role::User);
        tui.browser.apply_listing(stream_listing());

        assert!(handle_key(&mut tui, key(KeyCode::Char('a'))).overlay.is_none());
        assert!(handle_key(&mut tui, key(KeyCode::Char('d'))).overlay.is_none());
    }

    #[test]
    fn test_admin_delete_targets_selected_row() {
        let mut tui = tui_with(Role::Admin);
        tui.browser.apply_listing(stream_listing());

        let outcome = handle_key(&mut tui, key(KeyCode::Char('d')));
        let Some(Overlay::ConfirmDelete(confirm)) = outcome.overlay else {
            panic!("expected delete confirmation");
        };
        assert_eq!(confirm.target.id, NodeId::Numeric(4));
        assert_eq!(confirm.refresh, Cursor::AtStreams);
    }

    #[test]
    fn test_enter_on_note_opens_file() {
        let mut tui = tui_with(Role::User);
        tui.browser.cursor = Cursor::AtNotes {
            stream_id: 1,
            semester_id: 2,
            subject_id: 3,
        };
        tui.browser.apply_listing(Listing::Notes(vec![Note {
            id: "n1".to_string(),
            title: "Week 1".to_string(),
            file_url: "/files/w1.pdf".to_string(),
        }]));

        let outcome = handle_key(&mut tui, key(KeyCode::Enter));
        assert!(matches!(
            outcome.effects.as_slice(),
            [UiEffect::OpenNote { file_url }] if file_url == "/files/w1.pdf"
        ));

        let outcome = handle_key(&mut tui, key(KeyCode::Char('s')));
        assert!(matches!(
            outcome.effects.as_slice(),
            [UiEffect::DownloadNote { note, .. }] if note.id == "n1"
        ));
    }

    #[test]
    fn test_refresh_keeps_highlight() {
        let mut tui = tui_with(Role::User);
        tui.browser.apply_listing(stream_listing());
        tui.browser.select_next();

        handle_key(&mut tui, key(KeyCode::Char('r')));
        assert_eq!(tui.browser.retained, Some(NodeId::Numeric(9)));
        assert_eq!(tui.browser.selected, 1);
    }
}
