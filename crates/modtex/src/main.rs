//! modtex CLI - batch texture tools for game-mod archives.
//!
//! Three batch jobs, one binary:
//!
//! ```bash
//! # Find GUI textures containing the target colors
//! modtex scan ~/launcher/profiles/Main/mods
//!
//! # Darken every PNG under the current tree
//! modtex darken
//!
//! # Darken only the near-gray pixels
//! modtex darken-gray ./resourcepack --tolerance 5
//!
//! # View configuration
//! modtex config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// modtex - batch texture tools for game-mod archives.
#[derive(Parser, Debug)]
#[command(name = "modtex")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan mod archives for GUI textures containing the target colors
    Scan(cli::scan::ScanArgs),

    /// Darken every opaque pixel of the PNGs under a directory tree
    Darken(cli::darken::DarkenArgs),

    /// Darken only near-gray pixels, preserving colored elements
    DarkenGray(cli::darken::DarkenGrayArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging from config, with CLI verbose override.
    // Note: logging isn't initialized yet, so use eprintln for config warnings.
    let config = match modtex_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `modtex config path`."
            );
            modtex_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("modtex v{}", modtex_core::VERSION);

    // Dispatch to the appropriate command handler
    match cli.command {
        Commands::Scan(args) => cli::scan::execute(args, &config),
        Commands::Darken(args) => cli::darken::execute(args, &config),
        Commands::DarkenGray(args) => cli::darken::execute_gray(args, &config),
        Commands::Config(args) => cli::config::execute(args),
    }
}
