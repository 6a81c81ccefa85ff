//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! - Handlers send `UiEvent`s to `inbox_tx`
//! - The runtime drains `inbox_rx` each iteration to collect results
//!
//! Structure:
//! - `mod.rs`: Core runtime (TuiRuntime, event loop, effect dispatch)
//! - `inbox.rs`: Inbox channel types
//! - `handlers/`: Effect handler implementations (network I/O)

mod handlers;
mod inbox;

use std::future::Future;
use std::io::Stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use inbox::{UiEventReceiver, UiEventSender};
use notehub_core::api::ApiClient;
use notehub_core::session::{Session, SessionStore};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio_util::sync::CancellationToken;

use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Tick cadence while something is loading or the user is typing.
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll duration when idle.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Runs the event loop and executes effects.
/// Terminal state is restored on drop and on panic.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application state (split: tui + overlay).
    pub state: AppState,
    /// Unauthenticated client; authorized calls add the session token.
    api: ApiClient,
    store: SessionStore,
    download_dir: PathBuf,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    last_tick: Instant,
    last_terminal_event: Instant,
    /// Parent of every task token; cancelled on quit.
    shutdown: CancellationToken,
}

impl TuiRuntime {
    pub fn new(
        api: ApiClient,
        store: SessionStore,
        download_dir: PathBuf,
        session: Option<Session>,
    ) -> Result<Self> {
        // Panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let (inbox_tx, inbox_rx) = inbox::channel();
        let now = Instant::now();
        Ok(Self {
            terminal,
            state: AppState::new(session),
            api,
            store,
            download_dir,
            inbox_tx,
            inbox_rx,
            last_tick: now,
            last_terminal_event: now,
            shutdown: CancellationToken::new(),
        })
    }

    /// Runs the main event loop.
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_input_features()?;

        let effects = update::init(&mut self.state);
        self.execute_effects(effects);
        let result = self.event_loop();

        let _ = terminal::disable_input_features();
        self.shutdown.cancel();
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.tui.should_quit {
            let events = self.collect_events()?;

            for event in events {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = Instant::now();
                }
                // Only Tick triggers render; other events batch into the next frame
                if matches!(&event, UiEvent::Tick) {
                    dirty = true;
                }
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| render::render(&self.state, frame))?;
                dirty = false;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let needs_fast_poll = self.state.tui.tasks.is_any_running()
            || self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let tick_interval = if needs_fast_poll {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        // Block until the next tick unless there is already work queued
        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn dispatch_event(&mut self, event: UiEvent) {
        let effects = update::update(&mut self.state, event);
        if !effects.is_empty() {
            self.execute_effects(effects);
        }
    }

    /// Spawns an async task with a uniform TaskStarted/TaskCompleted lifecycle.
    ///
    /// Every task runs under a child of the shutdown token. `cancelable`
    /// exposes that token to the reducer so a logout can stop the task; a
    /// cancelled task sends no completion.
    fn spawn_task<F, Fut>(&self, kind: TaskKind, id: TaskId, cancelable: bool, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let token = self.shutdown.child_token();
        let started = TaskStarted {
            id,
            cancel: cancelable.then(|| token.clone()),
        };
        let _ = tx.send(UiEvent::TaskStarted { kind, started });

        tokio::spawn(async move {
            let inner = tokio::select! {
                _ = token.cancelled() => {
                    tracing::debug!(?kind, id = id.0, "Task cancelled");
                    return;
                }
                inner = f() => inner,
            };
            let completed = TaskCompleted {
                id,
                result: Box::new(inner),
            };
            let _ = tx.send(UiEvent::TaskCompleted { kind, completed });
        });
    }

    /// Client carrying the current session's token.
    ///
    /// Without a session the client has no token and every authorized call
    /// fails with `SessionExpired`, which the reducer turns into a logout.
    fn authorized_api(&self) -> ApiClient {
        match &self.state.tui.session {
            Some(session) => self.api.with_session(session),
            None => self.api.clone(),
        }
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.tui.should_quit = true;
                self.shutdown.cancel();
            }
            UiEffect::CancelTask { token } => token.cancel(),

            // Auth effects
            UiEffect::Login {
                task,
                email,
                password,
            } => {
                let api = self.api.clone();
                self.spawn_task(TaskKind::Login, task, false, move || {
                    handlers::login(api, email, password)
                });
            }
            UiEffect::Register { task, registration } => {
                let api = self.api.clone();
                self.spawn_task(TaskKind::Register, task, false, move || {
                    handlers::register(api, registration)
                });
            }
            UiEffect::PersistSession { session } => {
                if let Err(e) = self.store.save(&session) {
                    tracing::warn!(error = %format!("{e:#}"), "Failed to save session");
                    self.dispatch_event(UiEvent::Notice(format!(
                        "Session not saved: {e:#}"
                    )));
                }
            }
            UiEffect::ClearSession => {
                if let Err(e) = self.store.clear() {
                    tracing::warn!(error = %format!("{e:#}"), "Failed to remove session file");
                }
            }

            // Browser effects
            UiEffect::FetchList { task, cursor } => {
                let api = self.authorized_api();
                self.spawn_task(TaskKind::ListFetch, task, true, move || {
                    handlers::fetch_list(api, cursor)
                });
            }
            UiEffect::CreateNode { task, cursor, node } => {
                let api = self.authorized_api();
                self.spawn_task(TaskKind::Create, task, true, move || {
                    handlers::create_node(api, cursor, node)
                });
            }
            UiEffect::DeleteNode {
                task,
                level,
                id,
                refresh,
            } => {
                let api = self.authorized_api();
                self.spawn_task(TaskKind::Delete, task, true, move || {
                    handlers::delete_node(api, level, id, refresh)
                });
            }
            UiEffect::DownloadNote { task, note } => {
                let api = self.authorized_api();
                let dir = self.download_dir.clone();
                self.spawn_task(TaskKind::Download, task, true, move || {
                    handlers::download_note(api, note, dir)
                });
            }
            UiEffect::OpenNote { file_url } => {
                let opened = self
                    .api
                    .resolve_file_url(&file_url)
                    .map_err(|e| e.to_string())
                    .and_then(|url| open::that(url.as_str()).map_err(|e| e.to_string()));
                if let Err(e) = opened {
                    tracing::warn!(%file_url, error = %e, "Failed to open note");
                    self.dispatch_event(UiEvent::Notice(format!("Could not open file: {e}")));
                }
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        self.shutdown.cancel();
        let _ = terminal::restore_terminal();
    }
}
