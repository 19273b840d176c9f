//! CLI entry and dispatch.

use anyhow::{Context, Result};
use chapview_core::api::SearchId;
use chapview_core::config::{API_KEY_ENV, Config};
use chapview_core::logging;
use chapview_core::viewer::Variant;
use clap::Parser;

mod commands;
mod tables;

#[derive(Parser)]
#[command(name = "chapview")]
#[command(version)]
#[command(about = "Browse Chaparral search results and open proteins in a structure viewer")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Chaparral API key
    #[arg(long, global = true, env = API_KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,
}

/// Dashboard variant override shared by the browsing commands.
#[derive(clap::Args, Debug, Clone, Copy, Default)]
struct VariantArgs {
    /// Dashboard variant: peptides or redundant-peptides (default from config)
    #[arg(long, value_name = "VARIANT")]
    variant: Option<Variant>,
}

impl VariantArgs {
    fn resolve(self, config: &Config) -> Variant {
        self.variant.unwrap_or(config.variant)
    }
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Open the interactive dashboard (default)
    Dashboard {
        #[command(flatten)]
        variant: VariantArgs,
    },

    /// Print the search results table
    Searches {
        /// List searches of every status, ignoring the variant's filter
        #[arg(long)]
        all: bool,

        #[command(flatten)]
        variant: VariantArgs,
    },

    /// Print the protein table of a search
    Proteins {
        #[arg(value_name = "SEARCH_ID")]
        search_id: String,

        #[command(flatten)]
        variant: VariantArgs,
    },

    /// Print the structure viewer link for one protein of a search
    Link {
        #[arg(value_name = "SEARCH_ID")]
        search_id: String,

        /// Composite protein name, e.g. sp|P12345|EXAMPLE_HUMAN
        #[arg(value_name = "PROTEIN_NAME")]
        protein_name: String,

        #[command(flatten)]
        variant: VariantArgs,
    },

    /// Check the API key and print the account it belongs to
    Whoami,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Write the default config file
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli { command, api_key } = cli;
    let api_key = api_key.as_deref();

    // default to the dashboard
    let command = command.unwrap_or(Commands::Dashboard {
        variant: VariantArgs::default(),
    });

    match command {
        Commands::Dashboard { variant } => {
            let config = Config::load().context("load config")?;
            let variant = variant.resolve(&config);
            commands::dashboard::run(config, variant, api_key)
        }
        Commands::Searches { all, variant } => {
            let config = command_setup()?;
            let variant = variant.resolve(&config);
            commands::browse::searches(&config, api_key, variant, all).await
        }
        Commands::Proteins { search_id, variant } => {
            let config = command_setup()?;
            let variant = variant.resolve(&config);
            commands::browse::proteins(&config, api_key, variant, &SearchId::new(search_id)).await
        }
        Commands::Link {
            search_id,
            protein_name,
            variant,
        } => {
            let config = command_setup()?;
            let variant = variant.resolve(&config);
            commands::browse::link(
                &config,
                api_key,
                variant,
                &SearchId::new(search_id),
                &protein_name,
            )
            .await
        }
        Commands::Whoami => {
            let config = command_setup()?;
            commands::browse::whoami(&config, api_key).await
        }
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}

/// Stderr logging plus config, for the one-shot commands.
fn command_setup() -> Result<Config> {
    logging::init_stderr()?;
    Config::load().context("load config")
}
