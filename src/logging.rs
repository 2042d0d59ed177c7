//! Tracing setup: console output plus a daily-rotated log file.

use cardsift_core::config::shellexpand;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Directory holding the log files for a given data dir.
pub fn log_dir(data_dir: &str) -> PathBuf {
    PathBuf::from(shellexpand(data_dir)).join("logs")
}

/// `RUST_LOG` wins over the configured level.
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

fn file_appender(dir: &Path) -> Option<RollingFileAppender> {
    if let Err(e) = std::fs::create_dir_all(dir) {
        eprintln!("cannot create log dir {}: {e}", dir.display());
        return None;
    }
    match RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("cardsift")
        .filename_suffix("log")
        .build(dir)
    {
        Ok(appender) => Some(appender),
        Err(e) => {
            eprintln!("file logging disabled: {e}");
            None
        }
    }
}

/// Install the global subscriber. Keep the returned guard alive for the
/// lifetime of the process, or buffered file output is lost.
pub fn init(level: &str, data_dir: Option<&str>) -> Option<WorkerGuard> {
    let console = fmt::layer().with_target(false);

    let Some(appender) = data_dir.and_then(|d| file_appender(&log_dir(d))) else {
        tracing_subscriber::registry()
            .with(env_filter(level))
            .with(console)
            .init();
        return None;
    };

    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(console)
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .init();
    Some(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_dir_under_data_dir() {
        assert_eq!(
            log_dir("/var/lib/cardsift"),
            PathBuf::from("/var/lib/cardsift/logs")
        );
    }

    #[test]
    fn test_file_appender_creates_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested/logs");
        assert!(file_appender(&dir).is_some());
        assert!(dir.is_dir());
    }
}
