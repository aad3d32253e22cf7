//! `tracing` setup.
//!
//! The terminal belongs to the TUI, so log output only goes to a file. Without
//! `--log-file` no subscriber is installed and events are dropped.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is unset or unparsable.
const DEFAULT_DIRECTIVES: &str = "warn";

pub fn init(log_file: Option<&Path>) -> io::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(directives.as_deref()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| io::Error::other(format!("logging setup failed: {err}")))
}

fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}
