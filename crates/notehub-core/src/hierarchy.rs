//! Streams → Semesters → Subjects → Notes navigation.
//!
//! The cursor is a tagged union: each variant carries exactly the ancestor ids
//! needed to fetch its list, so a subject can never be selected without its
//! semester and stream.

use std::fmt;

/// One level of the hierarchy (also the kind of entity listed at that level).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Streams,
    Semesters,
    Subjects,
    Notes,
}

impl Level {
    /// Singular noun, e.g. `stream`.
    pub fn noun(self) -> &'static str {
        match self {
            Level::Streams => "stream",
            Level::Semesters => "semester",
            Level::Subjects => "subject",
            Level::Notes => "note",
        }
    }

    /// Plural noun, e.g. `streams`.
    pub fn plural(self) -> &'static str {
        match self {
            Level::Streams => "streams",
            Level::Semesters => "semesters",
            Level::Subjects => "subjects",
            Level::Notes => "notes",
        }
    }

    /// Title used for the list header.
    pub fn title(self) -> &'static str {
        match self {
            Level::Streams => "Streams",
            Level::Semesters => "Semesters",
            Level::Subjects => "Subjects",
            Level::Notes => "Notes",
        }
    }

    /// Path of the DELETE endpoint for an entity at this level.
    pub fn delete_path(self, id: &NodeId) -> String {
        format!("/{}/{id}", self.plural())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plural())
    }
}

/// Identifier of a node. Streams, semesters and subjects use numeric ids;
/// notes use opaque string ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeId {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Numeric(id) => write!(f, "{id}"),
            NodeId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for NodeId {
    fn from(id: i64) -> Self {
        NodeId::Numeric(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        NodeId::Text(id)
    }
}

/// Current position in the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cursor {
    #[default]
    AtStreams,
    AtSemesters {
        stream_id: i64,
    },
    AtSubjects {
        stream_id: i64,
        semester_id: i64,
    },
    AtNotes {
        stream_id: i64,
        semester_id: i64,
        subject_id: i64,
    },
}

impl Cursor {
    /// Level whose list is active at this cursor.
    pub fn level(self) -> Level {
        match self {
            Cursor::AtStreams => Level::Streams,
            Cursor::AtSemesters { .. } => Level::Semesters,
            Cursor::AtSubjects { .. } => Level::Subjects,
            Cursor::AtNotes { .. } => Level::Notes,
        }
    }

    /// Moves one level deeper into `child_id`.
    ///
    /// Returns `None` at the notes level, which has nothing below it.
    pub fn select(self, child_id: i64) -> Option<Cursor> {
        match self {
            Cursor::AtStreams => Some(Cursor::AtSemesters {
                stream_id: child_id,
            }),
            Cursor::AtSemesters { stream_id } => Some(Cursor::AtSubjects {
                stream_id,
                semester_id: child_id,
            }),
            Cursor::AtSubjects {
                stream_id,
                semester_id,
            } => Some(Cursor::AtNotes {
                stream_id,
                semester_id,
                subject_id: child_id,
            }),
            Cursor::AtNotes { .. } => None,
        }
    }

    /// Moves one level up.
    ///
    /// Returns the parent cursor together with the id that was selected to
    /// reach `self`, so the parent list can highlight it again. Returns `None`
    /// at the top level.
    pub fn go_back(self) -> Option<(Cursor, i64)> {
        match self {
            Cursor::AtStreams => None,
            Cursor::AtSemesters { stream_id } => Some((Cursor::AtStreams, stream_id)),
            Cursor::AtSubjects {
                stream_id,
                semester_id,
            } => Some((Cursor::AtSemesters { stream_id }, semester_id)),
            Cursor::AtNotes {
                stream_id,
                semester_id,
                subject_id,
            } => Some((
                Cursor::AtSubjects {
                    stream_id,
                    semester_id,
                },
                subject_id,
            )),
        }
    }

    /// Truncates the cursor to `level`, keeping the ancestor ids.
    ///
    /// Returns `None` when `level` is deeper than the cursor.
    pub fn ancestor_at(self, level: Level) -> Option<Cursor> {
        let mut cursor = self;
        loop {
            if cursor.level() == level {
                return Some(cursor);
            }
            cursor = cursor.go_back()?.0;
        }
    }

    /// Path of the collection endpoint for this cursor's list.
    pub fn list_path(self) -> String {
        match self {
            Cursor::AtStreams => "/streams".to_string(),
            Cursor::AtSemesters { stream_id } => format!("/streams/{stream_id}/semesters"),
            Cursor::AtSubjects { semester_id, .. } => format!("/semesters/{semester_id}/subjects"),
            Cursor::AtNotes { subject_id, .. } => format!("/subjects/{subject_id}/notes"),
        }
    }

    /// Number of ancestors selected to reach this cursor.
    pub fn depth(self) -> usize {
        match self {
            Cursor::AtStreams => 0,
            Cursor::AtSemesters { .. } => 1,
            Cursor::AtSubjects { .. } => 2,
            Cursor::AtNotes { .. } => 3,
        }
    }

    /// Builds a cursor from explicit ids (used by non-interactive commands).
    ///
    /// Ids must be given top-down; a deeper id without its parent is rejected.
    pub fn from_ids(stream: Option<i64>, semester: Option<i64>, subject: Option<i64>) -> Option<Cursor> {
        match (stream, semester, subject) {
            (None, None, None) => Some(Cursor::AtStreams),
            (Some(stream_id), None, None) => Some(Cursor::AtSemesters { stream_id }),
            (Some(stream_id), Some(semester_id), None) => Some(Cursor::AtSubjects {
                stream_id,
                semester_id,
            }),
            (Some(stream_id), Some(semester_id), Some(subject_id)) => Some(Cursor::AtNotes {
                stream_id,
                semester_id,
                subject_id,
            }),
            _ => None,
        }
    }
}
