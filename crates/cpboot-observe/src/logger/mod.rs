mod clock;
mod config;
mod error;
mod format;
mod init;
mod level;

pub use clock::{LogClock, LoggerTimeZone};
pub use config::LoggerConfig;
pub use error::{LoggerError, LoggerResult};
pub use format::LoggerFormat;
pub use level::LoggerLevel;

/// Install the global tracing subscriber described by `cfg`.
///
/// Must be called once, early in `main`; a second call fails with
/// [`LoggerError::AlreadyInitialized`]. With [`LoggerTimeZone::Local`] the offset is
/// detected here, so call it before the runtime spawns worker threads.
///
/// ```rust
/// use cpboot_observe::{LoggerConfig, init_logger};
///
/// init_logger(&LoggerConfig::default()).unwrap();
/// tracing::info!("logger initialized");
/// ```
pub fn init_logger(cfg: &LoggerConfig) -> LoggerResult<()> {
    let clock = LogClock::detect(cfg.tz);
    match cfg.format {
        LoggerFormat::Text => init::text(cfg, clock),
        LoggerFormat::Json => init::json(cfg, clock),
        LoggerFormat::Journald => init::journald(cfg),
    }
}
