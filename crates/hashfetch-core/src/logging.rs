//! Logging init.
//!
//! Stdout carries nothing but result lines, so every log layer writes to the
//! log file or to stderr. With file logging on, warnings and errors (skipped
//! URLs, a clamped `--parallel`) are also echoed to stderr as short
//! `WARN message` lines so the user sees them without opening the log.

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::Subscriber;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, EnvFilter, Layer};

const DEFAULT_FILTER: &str = "info,hashfetch=debug,hashfetch_core=debug";
const LOG_FILE_NAME: &str = "hashfetch.log";

/// Shares one open log file across events; a failed clone drops that event's
/// output to stderr rather than losing it.
struct LogFile(fs::File);

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = Box<dyn io::Write + 'a>;

    fn make_writer(&'a self) -> Self::Writer {
        match self.0.try_clone() {
            Ok(f) => Box::new(f),
            Err(_) => Box::new(io::stderr()),
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// `<state_dir>/hashfetch/hashfetch.log`
pub fn log_file_path(state_dir: &Path) -> PathBuf {
    state_dir.join("hashfetch").join(LOG_FILE_NAME)
}

/// Creates the log directory if needed and opens the log file for appending.
fn open_log_file(path: &Path) -> Result<fs::File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open {}", path.display()))
}

/// Terse WARN-and-above layer for the terminal.
fn console_layer<S, W>(writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .with_filter(LevelFilter::WARN)
}

/// Initialize logging to `$XDG_STATE_HOME/hashfetch/hashfetch.log`, with
/// warnings also on stderr. On failure (e.g. log dir unwritable), returns Err
/// so the caller can fall back to [`init_logging_stderr`].
pub fn init_logging() -> Result<()> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("hashfetch")?;
    let path = log_file_path(&xdg_dirs.get_state_home());
    let file = open_log_file(&path)?;

    let file_layer = fmt::layer()
        .with_writer(LogFile(file))
        .with_ansi(false)
        .with_filter(env_filter());

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer(io::stderr))
        .try_init()
        .map_err(|e| anyhow::anyhow!("install subscriber: {}", e))?;

    tracing::info!("hashfetch logging initialized at {}", path.display());
    Ok(())
}

/// Initialize logging to stderr only, filtered by `RUST_LOG` or the default filter.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}
