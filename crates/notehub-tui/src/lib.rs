//! Full-screen TUI for browsing a notehub server.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
pub use features::{auth, browser};
use notehub_core::api::ApiClient;
use notehub_core::config::Config;
use notehub_core::session::{Session, SessionStore};
pub use runtime::TuiRuntime;

/// Runs the interactive browser.
///
/// Starts on the Streams list when a valid session is stored, else on login.
pub async fn run_interactive(config: &Config, api: ApiClient, store: SessionStore) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "Interactive mode requires a terminal.\n\
             Use `notehub ls` for non-interactive listing."
        );
    }

    let session = startup_session(&store);
    tracing::info!(
        server = api.base_url(),
        logged_in = session.is_some(),
        "Starting TUI"
    );

    let mut runtime = TuiRuntime::new(api, store, config.effective_download_dir(), session)?;
    runtime.run()
}

/// Loads the stored session, discarding it when it is unreadable or expired.
fn startup_session(store: &SessionStore) -> Option<Session> {
    match store.load() {
        Ok(Some(session)) => Some(session),
        Ok(None) => {
            // A file that loads as nothing holds an expired session
            if store.path().exists()
                && let Err(e) = store.clear()
            {
                tracing::warn!(error = %format!("{e:#}"), "Failed to remove session file");
            }
            None
        }
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "Ignoring unreadable session file");
            None
        }
    }
}
