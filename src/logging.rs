use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `MKAST_LOG=debug`.
pub const LOG_ENV: &str = "MKAST_LOG";

/// Where the daily log files go.
pub fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("mkast").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Install a file-only subscriber. The terminal belongs to the UI, so
/// nothing is written to stdout or stderr once it is up.
///
/// The returned guard flushes the writer on drop; hold it for the life of
/// the program.
pub fn init() -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let log_dir = log_dir();
    if let Err(err) = std::fs::create_dir_all(&log_dir) {
        eprintln!(
            "File logging disabled ({}): {}",
            log_dir.display(),
            err
        );
        return None;
    }

    let file_appender = tracing_appender::rolling::daily(&log_dir, "mkast.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .with_ansi(false)
        .compact()
        .with_writer(file_writer);

    if tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .is_err()
    {
        return None;
    }

    tracing::debug!(dir = %log_dir.display(), "file logging ready");
    Some(guard)
}
