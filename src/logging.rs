//! Structured logging for the storefront service.
//!
//! Development gets pretty output on stderr, production gets JSON; an
//! optional daily-rotated file sink is selected with `LOG_OUTPUT=file`. The
//! returned guard flushes buffered lines on drop and must be held for the
//! process lifetime.

use anyhow::{Context, Result};
use std::env;
use std::io;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "pretty" => Some(Self::Pretty),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    Stdout,
    Stderr,
    /// Daily-rotated files under the configured directory.
    File,
}

impl LogSink {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "stdout" => Some(Self::Stdout),
            "stderr" => Some(Self::Stderr),
            "file" => Some(Self::File),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub sink: LogSink,
    /// Directory for log files when the sink is `File`.
    pub log_dir: PathBuf,
    pub file_prefix: String,
    /// Deployment environment, e.g. "development" or "production".
    pub environment: String,
}

impl LoggingConfig {
    /// Reads `ENVIRONMENT`/`ENV`, `LOG_FORMAT`, `LOG_OUTPUT`, and `LOG_DIR`.
    /// Unset or unrecognized values fall back to environment-appropriate
    /// defaults: JSON in production, pretty on stderr everywhere else.
    pub fn from_env() -> Self {
        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let format = env::var("LOG_FORMAT")
            .ok()
            .and_then(|v| LogFormat::parse(&v))
            .unwrap_or(if is_production(&environment) {
                LogFormat::Json
            } else {
                LogFormat::Pretty
            });

        let sink = env::var("LOG_OUTPUT")
            .ok()
            .and_then(|v| LogSink::parse(&v))
            .unwrap_or(LogSink::Stderr);

        let log_dir = env::var("LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("logs"));

        Self {
            format,
            sink,
            log_dir,
            file_prefix: "shopflow".to_string(),
            environment,
        }
    }

    fn default_filter(&self) -> EnvFilter {
        let level = if is_production(&self.environment) {
            "info"
        } else {
            "debug"
        };
        EnvFilter::new(format!("{level},hyper=info,tower=info"))
    }
}

fn is_production(environment: &str) -> bool {
    matches!(environment, "production" | "prod")
}

/// Installs the global subscriber. `RUST_LOG` overrides the default filter
/// when set.
pub fn init_logging(config: LoggingConfig) -> Result<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| config.default_filter());

    let (writer, guard) = match config.sink {
        LogSink::Stdout => tracing_appender::non_blocking(io::stdout()),
        LogSink::Stderr => tracing_appender::non_blocking(io::stderr()),
        LogSink::File => {
            std::fs::create_dir_all(&config.log_dir)
                .with_context(|| format!("creating log directory {:?}", config.log_dir))?;
            let appender = tracing_appender::rolling::daily(&config.log_dir, &config.file_prefix);
            tracing_appender::non_blocking(appender)
        }
    };

    let base = fmt::layer().with_writer(writer).with_target(true);
    match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(base.json().with_current_span(true).with_filter(filter))
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(base.pretty().with_filter(filter))
            .init(),
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.environment,
        format = ?config.format,
        sink = ?config.sink,
        "logging initialized"
    );

    Ok(guard)
}
