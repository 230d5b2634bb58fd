//! File tracing for the walkthrough, filtered by a level that can change at runtime

use std::path::PathBuf;
use std::sync::atomic::{AtomicU8, Ordering};

use strum::{Display, EnumString, FromRepr, IntoStaticStr};
use tracing::{Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, Registry};

/// Environment variable holding the trace level
pub const LOG_LEVEL_ENV: &str = "FIELDMAP_LOG";

const TRACE_FILE_NAME: &str = "fieldmap_trace.log";

static CURRENT_LEVEL: AtomicU8 = AtomicU8::new(TracingLevel::Warn as u8);

/// Tracing levels, ordered from least to most verbose
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, EnumString, FromRepr, IntoStaticStr,
)]
#[repr(u8)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TracingLevel {
    /// Errors only
    Error,
    /// Errors and warnings
    Warn,
    /// Adds informational events
    Info,
    /// Adds per-field transfer events
    Debug,
    /// Adds access elevation events
    Trace,
}

impl From<Level> for TracingLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::ERROR => Self::Error,
            Level::WARN => Self::Warn,
            Level::INFO => Self::Info,
            Level::DEBUG => Self::Debug,
            Level::TRACE => Self::Trace,
        }
    }
}

impl TracingLevel {
    /// Reads [`LOG_LEVEL_ENV`], falling back to `warn` when unset or unparseable
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var(LOG_LEVEL_ENV)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(Self::Warn)
    }
}

/// Layer that admits events at or below the current level
#[derive(Clone, Copy)]
pub struct DynamicFilter;

impl<S: Subscriber> Layer<S> for DynamicFilter {
    fn enabled(
        &self,
        metadata: &tracing::Metadata<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) -> bool {
        TracingLevel::from(*metadata.level()) <= current_tracing_level()
    }
}

/// Installs the file subscriber.
///
/// The returned guard flushes the writer on drop and must outlive all logging.
pub fn init_file_tracing() -> WorkerGuard {
    let file_appender = tracing_appender::rolling::never(std::env::temp_dir(), TRACE_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_names(true)
        .with_file(true)
        .with_line_number(true);

    Registry::default()
        .with(DynamicFilter)
        .with(file_layer)
        .init();

    guard
}

/// Changes the level seen by [`DynamicFilter`]
pub fn set_tracing_level(level: TracingLevel) {
    CURRENT_LEVEL.store(level as u8, Ordering::Relaxed);
    tracing::info!("Tracing level set to: {level}");
}

/// The level currently admitted by [`DynamicFilter`]
#[must_use]
pub fn current_tracing_level() -> TracingLevel {
    TracingLevel::from_repr(CURRENT_LEVEL.load(Ordering::Relaxed)).unwrap_or(TracingLevel::Warn)
}

/// Where [`init_file_tracing`] writes
#[must_use]
pub fn trace_log_path() -> PathBuf {
    std::env::temp_dir().join(TRACE_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_tracing_level_from_str() {
        assert_eq!(TracingLevel::from_str("error"), Ok(TracingLevel::Error));
        assert_eq!(TracingLevel::from_str("WARN"), Ok(TracingLevel::Warn));
        assert_eq!(TracingLevel::from_str("Info"), Ok(TracingLevel::Info));
        assert_eq!(TracingLevel::from_str("debug"), Ok(TracingLevel::Debug));
        assert_eq!(TracingLevel::from_str("trace"), Ok(TracingLevel::Trace));

        assert!(TracingLevel::from_str("verbose").is_err());
    }

    #[test]
    fn test_tracing_level_display() {
        assert_eq!(TracingLevel::Error.to_string(), "error");
        assert_eq!(TracingLevel::Trace.to_string(), "trace");
        let name: &'static str = TracingLevel::Debug.into();
        assert_eq!(name, "debug");
    }

    #[test]
    fn test_levels_are_ordered_by_verbosity() {
        assert!(TracingLevel::Error < TracingLevel::Warn);
        assert!(TracingLevel::Debug < TracingLevel::Trace);
        assert!(TracingLevel::from(Level::DEBUG) > TracingLevel::Info);
    }

    #[test]
    fn test_set_tracing_level() {
        set_tracing_level(TracingLevel::Debug);
        assert_eq!(current_tracing_level(), TracingLevel::Debug);
        set_tracing_level(TracingLevel::Warn);
        assert_eq!(current_tracing_level(), TracingLevel::Warn);
    }
}
