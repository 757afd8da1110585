//! Unit tests for the Engine logging hub
//!
//! IMPORTANT: LOGGER is a global OnceLock shared across all tests.
//! Tests that install a custom logger are marked with #[serial] and only
//! look for their own messages, since unrelated tests may log concurrently.

use crate::msys::Engine;
use crate::msys::log::{Logger, LogEntry, LogSeverity};
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST HELPERS
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn install_test_logger() -> Arc<Mutex<Vec<LogEntry>>> {
    let entries = Arc::new(Mutex::new(Vec::new()));
    Engine::set_logger(TestLogger { entries: Arc::clone(&entries) });
    entries
}

fn find(entries: &Arc<Mutex<Vec<LogEntry>>>, message: &str) -> Option<LogEntry> {
    entries
        .lock()
        .unwrap()
        .iter()
        .find(|e| e.message == message)
        .cloned()
}

// ============================================================================
// LOGGING API TESTS
// ============================================================================

#[test]
#[serial]
fn test_set_logger_receives_simple_log() {
    let entries = install_test_logger();

    Engine::log(LogSeverity::Info, "msys::Test", "simple entry 1".to_string());

    let entry = find(&entries, "simple entry 1").expect("entry not captured");
    assert_eq!(entry.severity, LogSeverity::Info);
    assert_eq!(entry.source, "msys::Test");
    assert!(entry.file.is_none());
    assert!(entry.line.is_none());

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_log_detailed_carries_location() {
    let entries = install_test_logger();

    Engine::log_detailed(
        LogSeverity::Error,
        "msys::Test",
        "detailed entry 1".to_string(),
        "somewhere.rs",
        77,
    );

    let entry = find(&entries, "detailed entry 1").expect("entry not captured");
    assert_eq!(entry.severity, LogSeverity::Error);
    assert_eq!(entry.file, Some("somewhere.rs"));
    assert_eq!(entry.line, Some(77));

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_macros_route_through_engine() {
    let entries = install_test_logger();

    crate::engine_warn!("msys::Test", "macro warn {}", 5);
    crate::engine_error!("msys::Test", "macro error {}", 6);

    assert_eq!(find(&entries, "macro warn 5").unwrap().severity, LogSeverity::Warn);
    let error = find(&entries, "macro error 6").unwrap();
    assert_eq!(error.severity, LogSeverity::Error);
    assert!(error.file.is_some());

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_reset_logger_detaches_custom_logger() {
    let entries = install_test_logger();
    Engine::reset_logger();

    Engine::log(LogSeverity::Debug, "msys::Test", "after reset 1".to_string());

    assert!(find(&entries, "after reset 1").is_none());
}
