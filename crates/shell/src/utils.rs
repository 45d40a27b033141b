//! Logging setup for the CLI.

use std::path::{Path, PathBuf};

use ftlog::{
    appender::{FileAppender, Period},
    LevelFilter, LoggerGuard,
};

/// Installs a daily-rotating file logger at `<logs_dir>/<name>.log`,
/// creating `logs_dir` if needed.
///
/// Returns the guard, which flushes the log when dropped, and the path of
/// the log file.
///
/// # Errors
///
/// * If `logs_dir` cannot be created.
/// * If a logger is already installed.
pub fn configure_logger(logs_dir: &Path, name: &str, level: LevelFilter) -> Result<(LoggerGuard, PathBuf), String> {
    std::fs::create_dir_all(logs_dir).map_err(|e| format!("Could not create {}: {e}", logs_dir.display()))?;
    let log_path = logs_dir.join(format!("{name}.log"));

    let guard = ftlog::Builder::new()
        .max_log_level(level)
        .root(FileAppender::builder().path(&log_path).rotate(Period::Day).build())
        .try_init()
        .map_err(|e| e.to_string())?;

    Ok((guard, log_path))
}

#[cfg(test)]
mod tests {
    use tempdir::TempDir;

    #[test]
    fn logger_writes_under_dir() {
        let tmp_dir = TempDir::new("range-search-logs").unwrap();
        let logs_dir = tmp_dir.path().join("nested").join("logs");

        let (guard, path) = super::configure_logger(&logs_dir, "run", ftlog::LevelFilter::Info).unwrap();
        assert!(logs_dir.is_dir());
        assert_eq!(path, logs_dir.join("run.log"));

        assert!(super::configure_logger(&logs_dir, "again", ftlog::LevelFilter::Info).is_err());
        drop(guard);
    }
}
