//! File-backed tracing for terminal applications.
//!
//! A full-screen TUI owns stdout, so diagnostics go to a file instead. The
//! filter follows `RUST_LOG` (for example `RUST_LOG=tapkey_widgets=debug`) and
//! defaults to `info`.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::runtime::ProgramError;

/// Install a global subscriber that appends to `path`.
///
/// Keep the returned guard alive for as long as logging is needed; dropping
/// it flushes and stops the background writer. Fails with
/// [`ProgramError::Logging`] if a global subscriber is already installed.
pub fn init_file_logging(path: impl AsRef<Path>) -> Result<WorkerGuard, ProgramError> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;
    let file_name = path
        .file_name()
        .ok_or_else(|| ProgramError::Logging(format!("not a file path: {}", path.display())))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true)
                .with_filter(filter),
        )
        .try_init()
        .map_err(|err| ProgramError::Logging(err.to_string()))?;

    Ok(guard)
}
