//! Route Stage CLI
//!
//! Discovers plugins, assembles the stage and prints it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use routestage_kernel::Config;
use routestage_kernel::cli::{plugin_table, stage_json};
use routestage_kernel::plugin::PluginRegistry;
use routestage_kernel::stage::load_stage;

/// Command-line arguments; flags override the environment.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Stage file listing the built-in routes.
    #[arg(long, global = true)]
    stage: Option<PathBuf>,

    /// Directory holding plugin route fragments.
    #[arg(long, global = true)]
    plugins_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assemble the stage and print it as JSON.
    Assemble {
        /// Print on a single line.
        #[arg(long)]
        compact: bool,
    },
    /// List discovered plugins.
    Plugins,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let args = Args::parse();

    let mut config = Config::from_env().context("failed to load configuration")?;
    if let Some(stage) = args.stage {
        config.stage_file = stage;
    }
    if let Some(plugins_dir) = args.plugins_dir {
        config.plugins_dir = plugins_dir;
    }
    info!(
        stage_file = %config.stage_file.display(),
        plugins_dir = %config.plugins_dir.display(),
        "Configuration loaded"
    );

    let registry = PluginRegistry::discover(&config.plugins_dir, &config.disabled_plugins);

    match args.command {
        Command::Assemble { compact } => cmd_assemble(&config, &registry, compact),
        Command::Plugins => {
            print!("{}", plugin_table(&registry));
            Ok(())
        }
    }
}

fn cmd_assemble(config: &Config, registry: &PluginRegistry, compact: bool) -> Result<()> {
    let stage = load_stage(&config.stage_file, registry, config.name_seed_length)
        .context("failed to assemble stage")?;
    info!(routes = stage.routes().count(), "Stage assembled");

    let json = stage_json(&stage, compact).context("failed to serialize stage")?;
    println!("{json}");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
