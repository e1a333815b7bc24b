use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a JSON file logger.
///
/// Logs go to `log_path` through a non-blocking writer; the returned guard
/// must stay alive until the process exits so buffered lines get flushed.
pub fn init_tracing(log_path: &Path, filter: &str) -> Result<WorkerGuard> {
    let dir = log_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = log_path
        .file_name()
        .ok_or_else(|| anyhow!("log path {} has no file name", log_path.display()))?;

    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(dir)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let env_filter = EnvFilter::try_new(filter)
        .with_context(|| format!("invalid log filter '{}'", filter))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .json()
                .with_target(true)
                .with_ansi(false)
                .with_writer(writer),
        )
        .try_init()
        .context("failed to initialize tracing subscriber")?;

    Ok(guard)
}

/// Like [`init_tracing`], but a logger that can't be set up only costs the
/// log file: the reason goes to stderr and the caller carries on.
pub fn try_init_tracing(log_path: &Path, filter: &str) -> Option<WorkerGuard> {
    match init_tracing(log_path, filter) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("warning: file logging disabled: {:#}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn unwritable_log_dir_disables_logging() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        let log_path = blocker.join("versioned-enum.log");

        assert!(init_tracing(&log_path, "info").is_err());
        assert!(try_init_tracing(&log_path, "info").is_none());
    }
}
