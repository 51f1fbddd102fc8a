//! Tracing setup for the genpass front ends.
//!
//! Stdout belongs to derived passwords and bridge messages, so events go to
//! `genpass.log` in the XDG state directory. `GENPASS_LOG` (then `RUST_LOG`)
//! overrides the filter.

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,genpass=debug";
const FILTER_ENV: &str = "GENPASS_LOG";
const LOG_FILE: &str = "genpass.log";

/// Per-event sink. Falls back to stderr for an event whose file handle
/// could not be duplicated.
enum EventSink {
    Log(fs::File),
    Stderr,
}

impl io::Write for EventSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            EventSink::Log(f) => f.write(buf),
            EventSink::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            EventSink::Log(f) => f.flush(),
            EventSink::Stderr => io::stderr().lock().flush(),
        }
    }
}

struct AppendLog(fs::File);

impl<'a> MakeWriter<'a> for AppendLog {
    type Writer = EventSink;

    fn make_writer(&'a self) -> Self::Writer {
        match self.0.try_clone() {
            Ok(file) => EventSink::Log(file),
            Err(_) => EventSink::Stderr,
        }
    }
}

fn filter_from(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

fn env_filter() -> EnvFilter {
    let directives = std::env::var(FILTER_ENV)
        .or_else(|_| std::env::var("RUST_LOG"))
        .ok();
    filter_from(directives.as_deref())
}

fn open_log(dir: &Path) -> Result<(fs::File, PathBuf)> {
    fs::create_dir_all(dir).with_context(|| format!("create log dir: {}", dir.display()))?;
    let path = dir.join(LOG_FILE);
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log: {}", path.display()))?;
    Ok((file, path))
}

/// Send events to `~/.local/state/genpass/genpass.log`.
///
/// Errors when the state dir or the file is not writable, or a subscriber
/// is already installed; [`init_logging_stderr`] is the fallback.
pub fn init_logging() -> Result<()> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("genpass")?;
    let (file, path) = open_log(&xdg_dirs.get_state_home())?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(BoxMakeWriter::new(AppendLog(file)))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install subscriber: {e}"))?;

    tracing::info!("genpass {} logging to {}", env!("CARGO_PKG_VERSION"), path.display());
    Ok(())
}

/// Stderr-only logging. A subscriber installed earlier is left in place.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}
