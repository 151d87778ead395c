//! Logging infrastructure using `tracing` and `tracing-subscriber`.
//!
//! The ingest library emits its events through `tracing`; this module
//! installs the subscriber that formats them for the terminal or a log file.
//!
//! # Log Levels
//!
//! - `warn`: empty header names
//! - `info`: run summary
//! - `debug`: header acquisition, document totals, unterminated quotes
//! - `trace`: per-record tokenizing and row padding/truncation
//!
//! # Usage
//!
//! ```ignore
//! use csvrows_cli::logging::{init_logging, LogConfig};
//!
//! let config = LogConfig::from_verbosity(2);
//! init_logging(&config).expect("init logging");
//! ```

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Maximum level that is emitted.
    pub level_filter: LevelFilter,
    /// Whether `RUST_LOG` may override `level_filter`.
    pub use_env_filter: bool,
    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
    /// Whether to include target (module path) in log output.
    pub with_target: bool,
    /// Whether to include span close events in JSON output.
    pub with_spans: bool,
    /// Whether to use ANSI colors in output.
    pub with_ansi: bool,
    /// Output format: "pretty", "compact", or "json".
    pub format: LogFormat,
    /// Optional log file path. When set, logs are written to the file.
    pub log_file: Option<PathBuf>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable pretty format with colors.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON format for machine parsing.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_timestamps: false,
            with_target: false,
            with_spans: true,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
        }
    }
}

impl LogConfig {
    /// Create a `LogConfig` from CLI verbosity count.
    ///
    /// - 0 (no `-v`): warn level
    /// - 1 (`-v`): info level
    /// - 2 (`-vv`): debug level
    /// - 3+ (`-vvv`): trace level
    #[must_use]
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level_filter = match verbosity {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        };
        Self {
            level_filter,
            ..Default::default()
        }
    }

    /// Set the level filter directly.
    #[must_use]
    pub fn with_level_filter(mut self, level_filter: LevelFilter) -> Self {
        self.level_filter = level_filter;
        self
    }

    /// Enable or disable timestamps.
    #[must_use]
    pub fn with_timestamps(mut self, enable: bool) -> Self {
        self.with_timestamps = enable;
        self
    }

    /// Enable or disable ANSI colors.
    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }

    /// Set output format.
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the log file path (writes to stderr when None).
    #[must_use]
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Initialize the global tracing subscriber with the given configuration.
///
/// This should be called once at application startup.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
///
/// # Panics
///
/// Panics if called more than once.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    if let Some(path) = &config.log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        init_logging_with_writer(config, Mutex::new(file));
    } else {
        init_logging_with_writer(config, io::stderr);
    }
    Ok(())
}

/// Initialize logging with a custom writer (useful for testing).
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W)
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(format_layer(config, writer))
        .with(build_env_filter(config))
        .init();
}

fn format_layer<W>(config: &LogConfig, writer: W) -> BoxedLayer
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_target(config.with_target);

    match (config.format, config.with_timestamps) {
        (LogFormat::Json, _) => layer
            .json()
            .with_span_events(if config.with_spans {
                FmtSpan::CLOSE
            } else {
                FmtSpan::NONE
            })
            .boxed(),
        (LogFormat::Compact, true) => layer.compact().with_ansi(config.with_ansi).boxed(),
        (LogFormat::Compact, false) => layer
            .compact()
            .with_ansi(config.with_ansi)
            .without_time()
            .boxed(),
        (LogFormat::Pretty, true) => layer.with_ansi(config.with_ansi).boxed(),
        (LogFormat::Pretty, false) => layer.with_ansi(config.with_ansi).without_time().boxed(),
    }
}

/// Default filter directives for the configured level.
///
/// External crates stay at warn so that raising verbosity only affects ours.
pub fn default_directives(level_filter: LevelFilter) -> String {
    let level = level_filter.to_string().to_lowercase();
    format!("warn,csvrows={level},csvrows_cli={level},csvrows_ingest={level}")
}

/// Build an `EnvFilter`, letting `RUST_LOG` win when allowed.
fn build_env_filter(config: &LogConfig) -> EnvFilter {
    let fallback = || EnvFilter::new(default_directives(config.level_filter));
    if config.use_env_filter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback())
    } else {
        fallback()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_verbosity() {
        assert_eq!(LogConfig::from_verbosity(0).level_filter, LevelFilter::WARN);
        assert_eq!(LogConfig::from_verbosity(2).level_filter, LevelFilter::DEBUG);
        assert_eq!(LogConfig::from_verbosity(9).level_filter, LevelFilter::TRACE);
    }

    #[test]
    fn test_default_directives() {
        assert_eq!(
            default_directives(LevelFilter::DEBUG),
            "warn,csvrows=debug,csvrows_cli=debug,csvrows_ingest=debug"
        );
    }

    #[test]
    fn test_builder() {
        let config = LogConfig::default()
            .with_level_filter(LevelFilter::TRACE)
            .with_timestamps(true)
            .with_format(LogFormat::Json)
            .with_ansi(false)
            .with_log_file(Some(PathBuf::from("run.log")));
        assert_eq!(config.level_filter, LevelFilter::TRACE);
        assert!(config.with_timestamps);
        assert_eq!(config.format, LogFormat::Json);
        assert!(!config.with_ansi);
        assert_eq!(config.log_file, Some(PathBuf::from("run.log")));
    }
}
