//! Stderr logging via `tracing`.
//!
//! `RUST_LOG` takes precedence; otherwise the level comes from the number
//! of `-v` flags. Stdout is reserved for lookup results.

use std::io;
use tracing_subscriber::EnvFilter;

pub fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,dirlookup={}", default_level)));

    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
