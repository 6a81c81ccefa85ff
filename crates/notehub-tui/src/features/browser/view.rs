//! Pure view model for the active list.
//!
//! `list_view` turns browser state plus the viewer's role into everything the
//! renderer and key handling need. Admin affordances are simply absent for
//! other roles.

use notehub_core::api::nodes::Listing;
use notehub_core::hierarchy::{Cursor, Level, NodeId};
use notehub_core::session::Role;

use super::state::{BrowserState, ListState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub title: String,
    pub breadcrumb: String,
    pub body: ListBody,
    /// Label of the add action; `None` unless the viewer is an admin.
    pub add: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListBody {
    Loading(String),
    Empty { title: String, cta: String },
    Error(String),
    Rows(Vec<Row>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub label: String,
    pub target: RowTarget,
    /// Present only for admins.
    pub delete: Option<DeleteTarget>,
}

/// What activating a row does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowTarget {
    /// Descend into the node with this id.
    Drill(i64),
    /// Open the note's file.
    OpenFile(String),
}

/// Node a delete confirmation refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTarget {
    pub level: Level,
    pub id: NodeId,
    pub label: String,
}

pub fn loading_text(level: Level) -> String {
    format!("Loading {}...", level.plural())
}

pub fn error_text(level: Level) -> String {
    format!("Error loading {}", level.plural())
}

pub fn empty_title(level: Level) -> String {
    format!("No {} yet", level.plural())
}

pub fn empty_cta(level: Level) -> &'static str {
    match level {
        Level::Streams => "Add your first stream to get started",
        Level::Semesters => "Add your first semester",
        Level::Subjects => "Add your first subject",
        Level::Notes => "Upload your first note",
    }
}

pub fn add_label(level: Level) -> &'static str {
    match level {
        Level::Streams => "Add stream",
        Level::Semesters => "Add semester",
        Level::Subjects => "Add subject",
        Level::Notes => "Upload note",
    }
}

pub fn list_view(browser: &BrowserState, role: Role) -> ListView {
    let level = browser.cursor.level();
    let admin = role.is_admin();

    let body = match &browser.list {
        ListState::Loading => ListBody::Loading(loading_text(level)),
        ListState::Failed => ListBody::Error(error_text(level)),
        ListState::Loaded(listing) if listing.is_empty() => ListBody::Empty {
            title: empty_title(level),
            cta: empty_cta(level).to_string(),
        },
        ListState::Loaded(listing) => ListBody::Rows(rows(listing, admin)),
    };

    ListView {
        title: level.title().to_string(),
        breadcrumb: breadcrumb(browser.cursor, &browser.trail),
        body,
        add: admin.then(|| add_label(level).to_string()),
    }
}

fn rows(listing: &Listing, admin: bool) -> Vec<Row> {
    let level = listing.level();
    let targets: Vec<RowTarget> = match listing {
        Listing::Streams(items) => items.iter().map(|s| RowTarget::Drill(s.id)).collect(),
        Listing::Semesters(items) => items.iter().map(|s| RowTarget::Drill(s.id)).collect(),
        Listing::Subjects(items) => items.iter().map(|s| RowTarget::Drill(s.id)).collect(),
        Listing::Notes(items) => items
            .iter()
            .map(|n| RowTarget::OpenFile(n.file_url.clone()))
            .collect(),
    };

    listing
        .entries()
        .into_iter()
        .zip(targets)
        .map(|((id, label), target)| Row {
            delete: admin.then(|| DeleteTarget {
                level,
                id,
                label: label.clone(),
            }),
            label,
            target,
        })
        .collect()
}

fn breadcrumb(cursor: Cursor, trail: &[String]) -> String {
    let mut parts = vec![Level::Streams.title().to_string()];
    parts.extend(trail.iter().take(cursor.depth()).cloned());
    parts.join(" › ")
}

#[cfg(test)]
mod tests {
    use notehub_core::api::models::{Note, Semester, Stream};

    use super::*;

    fn loaded(cursor: Cursor, listing: Listing) -> BrowserState {
        BrowserState {
            cursor,
            list: ListState::Loaded(listing),
            ..BrowserState::default()
        }
    }

    #[test]
    fn test_admin_empty_streams_offers_add() {
        let view = list_view(
            &loaded(Cursor::AtStreams, Listing::Streams(vec![])),
            Role::Admin,
        );
        assert_eq!(
            view.body,
            ListBody::Empty {
                title: "No streams yet".to_string(),
                cta: "Add your first stream to get started".to_string(),
            }
        );
        assert_eq!(view.add.as_deref(), Some("Add stream"));
    }

    #[test]
    fn test_user_empty_streams_has_no_add() {
        let view = list_view(
            &loaded(Cursor::AtStreams, Listing::Streams(vec![])),
            Role::User,
        );
        assert!(matches!(view.body, ListBody::Empty { .. }));
        assert_eq!(view.add, None);
    }

    #[test]
    fn test_rows_keep_server_order_and_gate_delete() {
        let listing = Listing::Streams(vec![
            Stream {
                id: 2,
                name: "Science".to_string(),
            },
            Stream {
                id: 1,
                name: "Arts".to_string(),
            },
        ]);

        let user = list_view(&loaded(Cursor::AtStreams, listing.clone()), Role::User);
        let ListBody::Rows(rows) = user.body else {
            panic!("expected rows");
        };
        assert_eq!(rows[0].label, "Science");
        assert_eq!(rows[1].label, "Arts");
        assert!(rows.iter().all(|r| r.delete.is_none()));

        let admin = list_view(&loaded(Cursor::AtStreams, listing), Role::Admin);
        let ListBody::Rows(rows) = admin.body else {
            panic!("expected rows");
        };
        assert_eq!(
            rows[1].delete,
            Some(DeleteTarget {
                level: Level::Streams,
                id: NodeId::Numeric(1),
                label: "Arts".to_string(),
            })
        );
        assert_eq!(rows[0].target, RowTarget::Drill(2));
    }

    #[test]
    fn test_semester_label_and_note_target() {
        let view = list_view(
            &loaded(
                Cursor::AtSemesters { stream_id: 1 },
                Listing::Semesters(vec![Semester { id: 4, number: 3 }]),
            ),
            Role::User,
        );
        let ListBody::Rows(rows) = view.body else {
            panic!("expected rows");
        };
        assert_eq!(rows[0].label, "Semester 3");

        let view = list_view(
            &loaded(
                Cursor::AtNotes {
                    stream_id: 1,
                    semester_id: 4,
                    subject_id: 5,
                },
                Listing::Notes(vec![Note {
                    id: "a".to_string(),
                    title: "Week 1".to_string(),
                    file_url: "/files/a.pdf".to_string(),
                }]),
            ),
            Role::User,
        );
        let ListBody::Rows(rows) = view.body else {
            panic!("expected rows");
        };
        assert_eq!(rows[0].target, RowTarget::OpenFile("/files/a.pdf".to_string()));
    }

    #[test]
    fn test_loading_and_error_placeholders() {
        let browser = BrowserState {
            cursor: Cursor::AtSubjects {
                stream_id: 1,
                semester_id: 2,
            },
            ..BrowserState::default()
        };
        assert_eq!(
            list_view(&browser, Role::User).body,
            ListBody::Loading("Loading subjects...".to_string())
        );

        let failed = BrowserState {
            list: ListState::Failed,
            ..browser
        };
        assert_eq!(
            list_view(&failed, Role::User).body,
            ListBody::Error("Error loading subjects".to_string())
        );
    }

    #[test]
    fn test_empty_ctas_per_level() {
        assert_eq!(empty_cta(Level::Semesters), "Add your first semester");
        assert_eq!(empty_cta(Level::Subjects), "Add your first subject");
        assert_eq!(empty_cta(Level::Notes), "Upload your first note");
        assert_eq!(add_label(Level::Notes), "Upload note");
    }

    #[test]
    fn test_breadcrumb_follows_trail() {
        let browser = BrowserState {
            cursor: Cursor::AtSubjects {
                stream_id: 1,
                semester_id: 2,
            },
            trail: vec!["Science".to_string(), "Semester 1".to_string()],
            ..BrowserState::default()
        };
        assert_eq!(
            list_view(&browser, Role::User).breadcrumb,
            "Streams › Science › Semester 1"
        );
    }
}
