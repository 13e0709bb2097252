use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::infrastructure::config::APP_NAME;

const LOG_FILE: &str = "tsboard.log";
const LOG_ENV: &str = "TSBOARD_LOG";

/// Directory holding the log file: next to the app's confy files.
pub fn log_directory() -> Option<PathBuf> {
    confy::get_configuration_file_path(APP_NAME, "config")
        .ok()?
        .parent()
        .map(PathBuf::from)
}

/// Stdout belongs to the terminal UI, so events go to a file. Keep the guard
/// alive until exit or buffered lines are lost.
pub fn init_logging() -> Option<WorkerGuard> {
    let dir = log_directory()?;
    std::fs::create_dir_all(&dir).ok()?;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .ok()?;
    Some(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logs_live_in_the_config_directory() {
        let Some(dir) = log_directory() else {
            return;
        };
        let config = confy::get_configuration_file_path(APP_NAME, "config").unwrap();
        assert_eq!(Some(dir.as_path()), config.parent());
        assert_ne!(dir, PathBuf::from("."));
    }
}
