//! Logging setup and the logger handle injected into request handlers
//!
//! Log lines go to stderr and, when enabled, to a rolling file under
//! `<log_dir>/<start date>/overlap.<pid>.log` written through a
//! non-blocking worker. The returned [`WorkerGuard`] must be held until
//! shutdown or buffered lines are lost.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time::{ChronoLocal, ChronoUtc};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use overlap_types::{Error, Result};

pub const LOG_FILE_PREFIX: &str = "overlap";

/// Sink for request-scoped log lines.
///
/// Handlers receive one of these through their constructor instead of
/// reaching for a global.
pub trait Logger: Send + Sync {
    fn debug(&self, args: fmt::Arguments<'_>);
    fn info(&self, args: fmt::Arguments<'_>);
    fn warn(&self, args: fmt::Arguments<'_>);
    fn error(&self, args: fmt::Arguments<'_>);
}

/// Forwards to the global `tracing` subscriber
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn debug(&self, args: fmt::Arguments<'_>) {
        tracing::debug!("{}", args);
    }

    fn info(&self, args: fmt::Arguments<'_>) {
        tracing::info!("{}", args);
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        tracing::warn!("{}", args);
    }

    fn error(&self, args: fmt::Arguments<'_>) {
        tracing::error!("{}", args);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    #[default]
    Daily,
    Hourly,
    Minutely,
    Never,
}

impl From<LogRotation> for Rotation {
    fn from(rotation: LogRotation) -> Self {
        match rotation {
            LogRotation::Daily => Rotation::DAILY,
            LogRotation::Hourly => Rotation::HOURLY,
            LogRotation::Minutely => Rotation::MINUTELY,
            LogRotation::Never => Rotation::NEVER,
        }
    }
}

/// Logger section of the service configuration.
///
/// Keys arrive lowercased from the config loader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// trace, debug, info, warn, error or off
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,

    /// Include source file and line in each record
    #[serde(default, rename = "reportcaller", alias = "report_caller")]
    pub report_caller: bool,

    /// Write to the rolling file in addition to stderr
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_log_dir", rename = "logdir", alias = "log_dir")]
    pub log_dir: PathBuf,

    #[serde(default)]
    pub rotation: LogRotation,

    /// Rotated files to keep; 0 keeps all
    #[serde(default = "default_max_backups", rename = "maxbackups", alias = "max_backups")]
    pub max_backups: usize,

    /// Local time stamps instead of UTC
    #[serde(default = "default_true", rename = "localtime", alias = "local_time")]
    pub local_time: bool,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_max_backups() -> usize {
    5
}

fn default_true() -> bool {
    true
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
            report_caller: false,
            enabled: true,
            log_dir: default_log_dir(),
            rotation: LogRotation::default(),
            max_backups: default_max_backups(),
            local_time: true,
        }
    }
}

impl LoggerConfig {
    pub fn level_filter(&self) -> Result<LevelFilter> {
        LevelFilter::from_str(&self.level)
            .map_err(|_| Error::Logger(format!("unrecognized log level: {}", self.level)))
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Install the global subscriber.
///
/// `RUST_LOG` directives, when set, refine the configured level.
pub fn init(config: &LoggerConfig) -> Result<Option<WorkerGuard>> {
    let level = config.level_filter()?;
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let mut layers: Vec<BoxedLayer> = vec![fmt_layer(config, std::io::stderr, true)];
    let mut guard = None;

    if config.enabled {
        let appender = file_appender(config, Local::now().date_naive(), std::process::id())?;
        let (writer, worker_guard) = tracing_appender::non_blocking(appender);
        layers.push(fmt_layer(config, writer, false));
        guard = Some(worker_guard);
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| Error::Logger(e.to_string()))?;

    tracing::debug!("logger initialized");
    Ok(guard)
}

/// Rolling appender under `<log_dir>/<date>/`, named after the process id
pub fn file_appender(config: &LoggerConfig, date: NaiveDate, pid: u32) -> Result<RollingFileAppender> {
    let dir = config.log_dir.join(date.format("%Y-%m-%d").to_string());
    std::fs::create_dir_all(&dir)?;

    let mut builder = RollingFileAppender::builder()
        .rotation(config.rotation.into())
        .filename_prefix(format!("{}.{}", LOG_FILE_PREFIX, pid))
        .filename_suffix("log");
    if config.max_backups > 0 {
        builder = builder.max_log_files(config.max_backups);
    }

    builder
        .build(&dir)
        .map_err(|e| Error::Logger(format!("failed to create log file in {}: {}", dir.display(), e)))
}

fn fmt_layer<W>(config: &LoggerConfig, writer: W, ansi: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer()
        .with_ansi(ansi)
        .with_file(config.report_caller)
        .with_line_number(config.report_caller)
        .with_writer(writer);

    match (config.format, config.local_time) {
        (LogFormat::Json, true) => layer.json().with_timer(ChronoLocal::rfc_3339()).boxed(),
        (LogFormat::Json, false) => layer.json().with_timer(ChronoUtc::rfc_3339()).boxed(),
        (LogFormat::Text, true) => layer.with_timer(ChronoLocal::rfc_3339()).boxed(),
        (LogFormat::Text, false) => layer.with_timer(ChronoUtc::rfc_3339()).boxed(),
    }
}
