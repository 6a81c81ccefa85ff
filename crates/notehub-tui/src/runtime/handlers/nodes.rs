//! List, create, delete and download handlers.

use std::path::PathBuf;

use notehub_core::api::ApiClient;
use notehub_core::api::models::Note;
use notehub_core::api::nodes::NewNode;
use notehub_core::hierarchy::{Cursor, Level, NodeId};

use crate::events::UiEvent;

/// Fetches the list at `cursor`.
pub async fn fetch_list(api: ApiClient, cursor: Cursor) -> UiEvent {
    let result = api.list(cursor).await;
    UiEvent::ListLoaded { cursor, result }
}

pub async fn create_node(api: ApiClient, cursor: Cursor, node: NewNode) -> UiEvent {
    let result = api.create(cursor, node).await;
    UiEvent::Created { cursor, result }
}

pub async fn delete_node(api: ApiClient, level: Level, id: NodeId, refresh: Cursor) -> UiEvent {
    let result = api.delete(level, &id).await;
    UiEvent::Deleted {
        level,
        refresh,
        result,
    }
}

/// Saves the note's file into `dir`.
pub async fn download_note(api: ApiClient, note: Note, dir: PathBuf) -> UiEvent {
    UiEvent::Downloaded(api.download_note(&note, &dir).await)
}
