//! # dirlookup CLI
//!
//! Looks people up in an organization's directory by username.
//!
//! ## Usage
//!
//! ```bash
//! dirlookup [--config ./dirlookup.toml] [--timeout SECS] [-v] <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `dirlookup resolve <user>` | Resolve a username to one directory record |
//! | `dirlookup name <user>` | Print the full name known to the finger host |
//! | `dirlookup search <query>` | Print every candidate a directory search returns |
//! | `dirlookup finger <query>` | Print a raw finger response |
//!
//! `resolve` and `name` exit with status 1 when nothing is found.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use dirlookup::{config, logging, resolve};

/// dirlookup: resolve usernames to directory records.
///
/// Without `--config` the built-in defaults are used.
#[derive(Parser)]
#[command(
    name = "dirlookup",
    about = "Resolve a username to a single directory record via finger and a web directory",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the finger timeout, in seconds.
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Resolve a username (or e-mail address) to a single directory record.
    ///
    /// Prints the record with an added `full_name` field, or exits with
    /// status 1 when the user cannot be found unambiguously.
    Resolve {
        /// Username or e-mail address.
        user: String,

        /// Print the record as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the full name the finger host reports for a username.
    Name {
        /// Username.
        user: String,
    },

    /// Search the directory and print every parsed candidate.
    Search {
        /// Name, username or alias.
        query: String,

        /// Print candidates as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Send a raw finger query and print the response.
    Finger {
        /// Finger query (usually a username).
        query: String,

        /// Host to query. Defaults to `[finger].host`.
        #[arg(long)]
        host: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let mut cfg = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => config::Config::default(),
    };
    if let Some(secs) = cli.timeout {
        if secs == 0 {
            anyhow::bail!("--timeout must be > 0");
        }
        cfg.finger.timeout_secs = secs;
    }

    match cli.command {
        Commands::Resolve { user, json } => {
            resolve::run_resolve(&cfg, &user, json)?;
        }
        Commands::Name { user } => {
            resolve::run_name(&cfg, &user)?;
        }
        Commands::Search { query, json } => {
            resolve::run_search(&cfg, &query, json)?;
        }
        Commands::Finger { query, host } => {
            resolve::run_finger(&cfg, &query, host.as_deref())?;
        }
    }

    Ok(())
}
