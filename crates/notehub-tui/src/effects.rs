//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only; the reducer never performs
//! I/O itself.

use notehub_core::api::auth::Registration;
use notehub_core::api::models::Note;
use notehub_core::api::nodes::NewNode;
use notehub_core::hierarchy::{Cursor, Level, NodeId};
use notehub_core::session::Session;
use tokio_util::sync::CancellationToken;

use crate::common::TaskId;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Exchange credentials for a session.
    Login {
        task: TaskId,
        email: String,
        password: String,
    },

    /// Register a new account.
    Register {
        task: TaskId,
        registration: Registration,
    },

    /// Fetch the list at `cursor`.
    FetchList { task: TaskId, cursor: Cursor },

    /// Create a node in the list at `cursor`.
    CreateNode {
        task: TaskId,
        cursor: Cursor,
        node: NewNode,
    },

    /// Delete a node, then report which list to refresh.
    DeleteNode {
        task: TaskId,
        level: Level,
        id: NodeId,
        refresh: Cursor,
    },

    /// Save a note's file into the download directory.
    DownloadNote { task: TaskId, note: Note },

    /// Open a note's file URL with the system handler.
    OpenNote { file_url: String },

    /// Write the session to disk.
    PersistSession { session: Session },

    /// Remove the stored session.
    ClearSession,

    /// Cancel in-flight work.
    CancelTask { token: CancellationToken },
}
