/*
[INPUT]:  Console log level and log file path
[OUTPUT]: Global tracing subscriber (stdout + append-only file)
[POS]:    Observability layer - logging setup for the binary
[UPDATE]: When changing log format, destinations, or default file name
*/

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use chrono::Local;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Everything from this workspace at DEBUG, dependencies at WARN
const FILE_FILTER: &str = "warn,binance_order_bot=debug,binance_futures_adapter=debug";
const FILE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `trading_bot_YYYY-MM-DD.log` in the working directory, local date
pub fn default_log_file() -> PathBuf {
    PathBuf::from(format!("trading_bot_{}.log", Local::now().format("%Y-%m-%d")))
}

/// Split a log path into the directory to create and the file name
pub fn split_log_path(path: &Path) -> Result<(PathBuf, String)> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .with_context(|| format!("log file path has no file name: {}", path.display()))?
        .to_string();
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((directory, file_name))
}

/// Install the global subscriber.
///
/// Console lines go to stdout filtered by `console_level`; the file gets
/// timestamped DEBUG lines appended. Keep the returned guard alive until
/// exit or buffered file lines are lost.
pub fn init_logging(console_level: &str, log_file: &Path) -> Result<WorkerGuard> {
    let console_filter = EnvFilter::try_new(console_level).context("invalid log level")?;
    let file_filter = EnvFilter::try_new(FILE_FILTER).context("invalid file log filter")?;

    let (directory, file_name) = split_log_path(log_file)?;
    std::fs::create_dir_all(&directory)
        .with_context(|| format!("create log directory {}", directory.display()))?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(&directory)
        .context("open log file")?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let console_layer = fmt::layer()
        .with_ansi(std::io::stdout().is_terminal())
        .without_time()
        .with_target(false)
        .with_writer(std::io::stdout)
        .with_filter(console_filter);

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_timer(ChronoLocal::new(FILE_TIME_FORMAT.to_string()))
        .with_target(true)
        .with_writer(file_writer)
        .with_filter(file_filter);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_file_is_date_stamped() {
        let name = default_log_file().to_string_lossy().into_owned();
        assert!(name.starts_with("trading_bot_"));
        assert!(name.ends_with(".log"));
        let date = &name["trading_bot_".len()..name.len() - ".log".len()];
        assert!(chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok());
    }

    #[test]
    fn test_split_log_path() {
        let (dir, name) = split_log_path(Path::new("logs/bot.log")).unwrap();
        assert_eq!(dir, PathBuf::from("logs"));
        assert_eq!(name, "bot.log");

        let (dir, name) = split_log_path(Path::new("bot.log")).unwrap();
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(name, "bot.log");

        assert!(split_log_path(Path::new("/")).is_err());
    }
}
