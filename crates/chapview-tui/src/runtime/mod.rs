//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! - Handlers are async functions returning a `UiEvent`
//! - `spawn_task` runs them on the tokio runtime and sends the wrapped
//!   result to `inbox_tx`
//! - The event loop drains `inbox_rx` every iteration

mod handlers;
mod inbox;

use std::future::Future;
use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use inbox::{UiEventReceiver, UiEventSender};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::common::{TaskCompleted, TaskId, TaskKind};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Tick cadence while a request is in flight (spinner animation).
pub const BUSY_TICK: Duration = Duration::from_millis(100);

/// Tick cadence when idle.
pub const IDLE_TICK: Duration = Duration::from_millis(500);

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Terminal state is restored on drop and on
/// panic.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    /// Runtime the handlers are spawned on.
    handle: Handle,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    last_tick: Instant,
}

impl TuiRuntime {
    pub fn new(handle: Handle, state: AppState) -> Result<Self> {
        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state,
            handle,
            inbox_tx,
            inbox_rx,
            last_tick: Instant::now(),
        })
    }

    /// Runs the main event loop until the user quits.
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_input_features()?;
        let result = self.event_loop();
        let _ = terminal::disable_input_features();
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.should_quit {
            if dirty {
                self.terminal.draw(|frame| render::render(&self.state, frame))?;
                dirty = false;
            }

            let events = self.collect_events()?;
            for event in events {
                dirty = true;
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }
        }

        Ok(())
    }

    /// Collects events from the inbox and the terminal, blocking on the
    /// terminal until the next tick is due.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        let tick_interval = if self.state.tasks.is_any_running() {
            BUSY_TICK
        } else {
            IDLE_TICK
        };
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

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns a handler with the uniform `TaskCompleted` wrapping.
    fn spawn_task<Fut>(&self, kind: TaskKind, id: TaskId, fut: Fut)
    where
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        self.handle.spawn(async move {
            let completed = TaskCompleted {
                id,
                result: Box::new(fut.await),
            };
            let _ = tx.send(UiEvent::TaskCompleted { kind, completed });
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::OpenBrowser { url } => {
                tracing::info!(%url, "opening viewer");
                if let Err(err) = open::that(&url) {
                    tracing::warn!(%url, error = %err, "failed to open browser");
                }
            }
            UiEffect::Authenticate { task, api_key } => {
                let config = self.state.config.clone();
                self.spawn_task(TaskKind::Login, task, handlers::login(config, api_key));
            }
            UiEffect::LoadSearches {
                task,
                api_key,
                variant,
            } => {
                let config = self.state.config.clone();
                self.spawn_task(
                    TaskKind::SearchList,
                    task,
                    handlers::load_searches(config, api_key, variant),
                );
            }
            UiEffect::LoadOverview {
                task,
                api_key,
                search_id,
            } => {
                let config = self.state.config.clone();
                self.spawn_task(
                    TaskKind::SearchOverview,
                    task,
                    handlers::load_overview(config, api_key, search_id),
                );
            }
            UiEffect::ResolveLink {
                task,
                api_key,
                variant,
                search_id,
                row,
            } => {
                let config = self.state.config.clone();
                self.spawn_task(
                    TaskKind::ViewerLink,
                    task,
                    handlers::resolve_link(config, api_key, variant, search_id, row),
                );
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
