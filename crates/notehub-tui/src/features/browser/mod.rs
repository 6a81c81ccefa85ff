//! Hierarchy browser: one list at a time, drill in and back out.

mod render;
pub mod state;
pub mod update;
pub mod view;

pub use render::render_browser;
pub use state::{BrowserState, ListState};
pub use update::{fetch_current, handle_key, navigate};
pub use view::{DeleteTarget, ListBody, ListView, Row, RowTarget, list_view};
