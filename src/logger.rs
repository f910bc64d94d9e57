use anyhow::Result;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Log level selection
#[derive(Debug, Clone)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for &'static str {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: LogLevel,
    pub log_dir: String,
    pub file_prefix: String,
    pub console_output: bool,
    /// File rotation policy (daily, hourly)
    pub rotation: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            log_dir: "logs".to_string(),
            file_prefix: "app".to_string(),
            console_output: true,
            rotation: "daily".to_string(),
        }
    }
}

/// Initialize the tracing subscriber with a rolling file appender and an
/// optional console layer.
pub fn init_logger(config: LogConfig) -> Result<()> {
    std::fs::create_dir_all(&config.log_dir)?;

    let file_appender = match config.rotation.as_str() {
        "hourly" => rolling::hourly(&config.log_dir, &config.file_prefix),
        _ => rolling::daily(&config.log_dir, &config.file_prefix),
    };

    let (non_blocking_file, _guard) = non_blocking(file_appender);

    let env_filter = EnvFilter::new(format!(
        "{}={}",
        env!("CARGO_PKG_NAME").replace("-", "_"),
        <&str>::from(config.level)
    ));

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_timer(ChronoUtc::rfc_3339())
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    if config.console_output {
        let console_layer = fmt::layer()
            .with_timer(ChronoUtc::rfc_3339())
            .with_ansi(true)
            .with_target(false)
            .with_file(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer)
            .with(console_layer)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer)
            .init();
    }

    // keep the appender guard alive for the process lifetime
    std::mem::forget(_guard);

    Ok(())
}

/// Development logger: debug level, console output on.
pub fn init_dev_logger() -> Result<()> {
    let config = LogConfig {
        level: LogLevel::Debug,
        log_dir: "logs".to_string(),
        file_prefix: "dev".to_string(),
        console_output: true,
        rotation: "daily".to_string(),
    };
    init_logger(config)
}

fn prod_config() -> LogConfig {
    LogConfig {
        level: LogLevel::Info,
        log_dir: "/var/log/jbk_keygen".to_string(),
        file_prefix: "app".to_string(),
        console_output: false,
        rotation: "daily".to_string(),
    }
}

/// Production logger: info level, file output only.
pub fn init_prod_logger() -> Result<()> {
    init_logger(prod_config())
}
