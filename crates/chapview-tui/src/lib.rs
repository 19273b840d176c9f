//! Full-screen dashboard for browsing Chaparral search results.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stdout};

use anyhow::Result;
use chapview_core::config::Config;
use chapview_core::viewer::Variant;
pub use runtime::TuiRuntime;
use tokio::runtime::Handle;

use crate::state::AppState;

/// Runs the dashboard until the user quits.
///
/// Blocks the calling thread; requests are spawned on `handle`.
/// `initial_key` pre-fills the login form.
pub fn run_dashboard(
    handle: Handle,
    config: Config,
    variant: Variant,
    initial_key: Option<String>,
) -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!(
            "The dashboard requires a terminal.\n\
             Use `chapview searches` or `chapview proteins <SEARCH_ID>` for non-interactive use."
        );
    }

    tracing::info!(%variant, api = %config.api_base_url, "starting dashboard");
    let state = AppState::new(config, variant, initial_key);
    let mut runtime = TuiRuntime::new(handle, state)?;
    runtime.run()
}
