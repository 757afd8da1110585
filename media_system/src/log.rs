//! Logging for the media system
//!
//! Every subsystem logs through the `engine_*!` macros into the logger held
//! by `Engine`. ERROR entries carry the call site. Failures surfaced to the
//! application go through `engine_error!`, or `engine_err!` / `engine_report!`
//! when an `Error` is returned as well.

use colored::*;
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Destination of every log entry emitted by the media system
///
/// Install one with `Engine::set_logger` to route messages to a file or an
/// in-game console.
///
/// ```no_run
/// use std::sync::Mutex;
/// use media_system::msys::log::{Logger, LogEntry, LogSeverity};
///
/// /// Keeps device errors for an error screen
/// struct ErrorCollector(Mutex<Vec<String>>);
///
/// impl Logger for ErrorCollector {
///     fn log(&self, entry: &LogEntry) {
///         if entry.severity == LogSeverity::Error {
///             self.0.lock().unwrap().push(entry.message.clone());
///         }
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    fn log(&self, entry: &LogEntry);
}

/// One log message
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub severity: LogSeverity,
    pub timestamp: SystemTime,
    /// Subsystem tag, e.g. "msys::Sound"
    pub source: String,
    pub message: String,
    /// Call site, set for ERROR entries only
    pub file: Option<&'static str>,
    pub line: Option<u32>,
}

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Very verbose debug information (typically disabled in release)
    Trace,

    /// Development/debugging information
    Debug,

    /// Important informational messages
    Info,

    /// Warning messages (potential issues)
    Warn,

    /// Error messages (critical issues with file:line details)
    Error,
}

/// Colored console logger installed until the application sets its own
///
/// `[timestamp] [SEVERITY] [source] message`, followed by ` (file:line)`
/// for ERROR entries.
pub struct DefaultLogger;

impl DefaultLogger {
    /// Render `entry` as one console line
    pub fn format(entry: &LogEntry) -> String {
        let datetime: DateTime<Local> = entry.timestamp.into();
        let severity = match entry.severity {
            LogSeverity::Trace => "TRACE".bright_black(),
            LogSeverity::Debug => "DEBUG".cyan(),
            LogSeverity::Info => "INFO ".green(),
            LogSeverity::Warn => "WARN ".yellow(),
            LogSeverity::Error => "ERROR".red().bold(),
        };

        let mut line = format!(
            "[{}] [{}] [{}] {}",
            datetime.format("%Y-%m-%d %H:%M:%S%.3f"),
            severity,
            entry.source.bright_blue(),
            entry.message
        );
        if let (Some(file), Some(at)) = (entry.file, entry.line) {
            line.push_str(&format!(" ({}:{})", file, at));
        }
        line
    }
}

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        println!("{}", Self::format(entry));
    }
}

// ===== LOGGING MACROS =====

#[doc(hidden)]
#[macro_export]
macro_rules! __msys_log {
    ($severity:ident, $source:expr, $message:expr) => {
        $crate::msys::Engine::log($crate::msys::log::LogSeverity::$severity, $source, $message)
    };
    ($severity:ident @ call_site, $source:expr, $message:expr) => {
        $crate::msys::Engine::log_detailed(
            $crate::msys::log::LogSeverity::$severity,
            $source,
            $message,
            file!(),
            line!()
        )
    };
}

/// Log a DEBUG message
///
/// ```no_run
/// media_system::engine_debug!("msys::Streaming", "Worker started ({} byte chunks)", 32768);
/// ```
#[macro_export]
macro_rules! engine_debug {
    ($source:expr, $($arg:tt)*) => {
        $crate::__msys_log!(Debug, $source, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! engine_info {
    ($source:expr, $($arg:tt)*) => {
        $crate::__msys_log!(Info, $source, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! engine_warn {
    ($source:expr, $($arg:tt)*) => {
        $crate::__msys_log!(Warn, $source, format!($($arg)*))
    };
}

/// Log an ERROR message along with its call site
#[macro_export]
macro_rules! engine_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::__msys_log!(Error @ call_site, $source, format!($($arg)*))
    };
}

/// Log an ERROR message and build a `BackendError` carrying the same text
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::__msys_log!(Error @ call_site, $source, message.clone());
        $crate::msys::Error::BackendError(message)
    }};
}

/// Log a typed error at ERROR severity and hand it back for propagation
///
/// Used where the failure already has a precise `Error` variant
/// (exhausted table, null id, ...) that callers match on.
#[macro_export]
macro_rules! engine_report {
    ($source:expr, $err:expr) => {{
        let err = $err;
        $crate::__msys_log!(Error @ call_site, $source, err.to_string());
        err
    }};
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
