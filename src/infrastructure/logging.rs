//! Logging system configuration and initialization
//!
//! - Console output on stderr so stdout stays reserved for forecasts
//! - Optional file output, one file per run, older runs pruned to `max_files`
//! - Structured JSON logging (optional)
//! - Local-time timestamps

use anyhow::{Result, anyhow};
use chrono::Local;
use once_cell::sync::Lazy;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self, time::FormatTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

pub use super::config::LoggingConfig;
use super::config::defaults;

// Keeps the non-blocking file writer alive for the whole process
static LOG_GUARDS: Lazy<Mutex<Vec<WorkerGuard>>> = Lazy::new(|| Mutex::new(Vec::new()));

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

struct LocalTimeFormatter;

impl FormatTime for LocalTimeFormatter {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Directory log files are written to: the configured one, else
/// `<data_local_dir>/weatherterm/logs`, else `./logs`
pub fn get_log_directory(config: &LoggingConfig) -> PathBuf {
    if let Some(directory) = &config.directory {
        return directory.clone();
    }

    dirs::data_local_dir()
        .map(|dir| dir.join(defaults::APP_DIR_NAME).join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

fn log_file_name() -> String {
    format!("weatherterm-{}.log", Local::now().format("%Y%m%d-%H%M%S"))
}

/// Level filter for one layer.
///
/// `RUST_LOG` wins when set. Otherwise the configured level applies, with
/// the module filters layered on top unless the level is `trace`.
fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let mut filter = EnvFilter::try_new(&config.level)
        .map_err(|e| anyhow!("Invalid log level '{}': {}", config.level, e))?;

    if !config.level.eq_ignore_ascii_case("trace") {
        for (module, level) in &config.module_filters {
            let directive = format!("{module}={level}")
                .parse()
                .map_err(|e| anyhow!("Invalid module filter '{}={}': {}", module, level, e))?;
            filter = filter.add_directive(directive);
        }
    }

    Ok(filter)
}

fn console_layer(config: &LoggingConfig) -> Result<BoxedLayer> {
    let layer = fmt::Layer::new()
        .with_writer(std::io::stderr)
        .with_timer(LocalTimeFormatter)
        .with_target(false);

    let filter = build_filter(config)?;
    Ok(if config.json_format {
        layer.json().with_filter(filter).boxed()
    } else {
        layer.with_filter(filter).boxed()
    })
}

fn file_layer(config: &LoggingConfig, log_dir: &Path) -> Result<BoxedLayer> {
    let file_appender = rolling::never(log_dir, log_file_name());
    let (file_writer, file_guard) = non_blocking(file_appender);

    LOG_GUARDS
        .lock()
        .map_err(|_| anyhow!("Log guard registry is poisoned"))?
        .push(file_guard);

    let layer = fmt::Layer::new()
        .with_writer(file_writer)
        .with_timer(LocalTimeFormatter)
        .with_ansi(false);

    let filter = build_filter(config)?;
    Ok(if config.json_format {
        layer
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_filter(filter)
            .boxed()
    } else {
        layer.with_target(false).with_filter(filter).boxed()
    })
}

/// Initialize logging with default configuration
pub fn init_logging() -> Result<()> {
    init_logging_with_config(&LoggingConfig::default())
}

/// Initialize the global subscriber from `config`
pub fn init_logging_with_config(config: &LoggingConfig) -> Result<()> {
    let mut layers: Vec<BoxedLayer> = Vec::new();
    let mut log_dir = None;

    if config.file_output {
        let dir = get_log_directory(config);
        std::fs::create_dir_all(&dir)
            .map_err(|e| anyhow!("Failed to create log directory {:?}: {}", dir, e))?;

        // one slot is left for the file this run creates
        cleanup_old_logs(&dir, config.max_files.saturating_sub(1))?;
        layers.push(file_layer(config, &dir)?);
        log_dir = Some(dir);
    }

    if config.console_output {
        layers.push(console_layer(config)?);
    }

    if layers.is_empty() {
        return Err(anyhow!("No logging output configured"));
    }

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| anyhow!("Failed to install log subscriber: {}", e))?;

    debug!("Logging initialized at level {}", config.level);
    if let Some(dir) = log_dir {
        info!("Log directory: {:?}", dir);
    }

    Ok(())
}

/// Delete the oldest `.log` files in `log_dir` so at most `keep` remain.
/// Returns the number of files removed.
pub fn cleanup_old_logs(log_dir: &Path, keep: u32) -> Result<usize> {
    if !log_dir.exists() {
        return Ok(0);
    }

    let mut log_files = Vec::new();
    for entry in std::fs::read_dir(log_dir)? {
        let entry = entry?;
        let path = entry.path();
        let is_log = path.is_file() && path.extension().is_some_and(|ext| ext == "log");
        if !is_log {
            continue;
        }
        if let Ok(modified) = entry.metadata().and_then(|m| m.modified()) {
            log_files.push((path, modified));
        }
    }

    // newest first
    log_files.sort_by(|a, b| b.1.cmp(&a.1));

    let mut removed = 0;
    for (path, _) in log_files.iter().skip(keep as usize) {
        match std::fs::remove_file(path) {
            Ok(()) => removed += 1,
            Err(e) => warn!("Failed to remove old log file {:?}: {}", path, e),
        }
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_log_directory_wins() {
        let config = LoggingConfig {
            directory: Some(PathBuf::from("/tmp/weatherterm-logs")),
            ..LoggingConfig::default()
        };
        assert_eq!(get_log_directory(&config), PathBuf::from("/tmp/weatherterm-logs"));
    }

    #[test]
    fn test_default_log_directory() {
        let log_dir = get_log_directory(&LoggingConfig::default());
        assert!(log_dir.to_string_lossy().ends_with("logs"));
    }

    #[test]
    fn test_log_file_name() {
        let name = log_file_name();
        assert!(name.starts_with("weatherterm-"));
        assert!(name.ends_with(".log"));
    }

    #[test]
    fn test_build_filter_rejects_bad_module_filter() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let mut config = LoggingConfig::default();
        assert!(build_filter(&config).is_ok());

        config.module_filters.insert("reqwest".to_string(), "very-loud".to_string());
        assert!(build_filter(&config).is_err());
    }

    #[test]
    fn test_cleanup_old_logs_keeps_requested_count() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..4 {
            std::fs::write(dir.path().join(format!("weatherterm-{i}.log")), "line\n").unwrap();
        }
        std::fs::write(dir.path().join("notes.txt"), "keep me").unwrap();

        let removed = cleanup_old_logs(dir.path(), 2).unwrap();
        assert_eq!(removed, 2);

        let remaining: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(remaining.len(), 3);
        assert!(remaining.contains(&"notes.txt".to_string()));
    }

    #[test]
    fn test_cleanup_missing_directory_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(cleanup_old_logs(&dir.path().join("absent"), 1).unwrap(), 0);
    }
}
