//! Effect handlers for the TUI runtime.
//!
//! Handlers are pure async functions that perform I/O and return a `UiEvent`.
//! They never touch state; the runtime spawns them and sends the result to the
//! inbox.
//!
//! ```ignore
//! // Handler: pure async, returns UiEvent
//! pub async fn fetch_list(api: ApiClient, cursor: Cursor) -> UiEvent { ... }
//!
//! // Runtime: spawns with a task lifecycle
//! self.spawn_task(TaskKind::ListFetch, task, true, move || fetch_list(api, cursor));
//! ```

pub mod auth;
pub mod nodes;

pub use auth::*;
pub use nodes::*;
