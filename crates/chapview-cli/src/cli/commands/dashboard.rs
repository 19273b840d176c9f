use anyhow::{Context, Result};
use chapview_core::config::{Config, paths};
use chapview_core::logging;
use chapview_core::viewer::Variant;
use tokio::runtime::Handle;

pub fn run(config: Config, variant: Variant, api_key: Option<&str>) -> Result<()> {
    // The dashboard owns the terminal, so logs go to a file.
    let logs_dir = paths::logs_dir();
    let _log_guard = match logging::init_file(&logs_dir) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("Warning: logging disabled: {err:#}");
            None
        }
    };

    chapview_tui::run_dashboard(
        Handle::current(),
        config,
        variant,
        api_key.map(str::to_string),
    )
    .context("dashboard failed")
}
