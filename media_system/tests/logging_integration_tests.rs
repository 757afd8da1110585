//! Integration tests for the logging hub
//!
//! Run with: cargo test --test logging_integration_tests


use device_test_utils::*;
use media_system::msys::graphic::ImageDesc;
use media_system::msys::input::{JoypadKey, VirtualKey};
use media_system::msys::log::{LogEntry, LogSeverity, Logger};
use media_system::msys::{Engine, SystemConfig};
use serial_test::serial;
use std::sync::{Arc, Mutex};

// ============================================================================
// TEST LOGGER IMPLEMENTATION
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn find<'a>(entries: &'a [LogEntry], source: &str, needle: &str) -> Option<&'a LogEntry> {
    entries
        .iter()
        .find(|e| e.source == source && e.message.contains(needle))
}

// ============================================================================
// LOGGING TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_failures_are_logged_with_location() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);

    let mut t = create_test_system(SystemConfig::default());
    let _ = t.system.graphic_mut().create_image(&ImageDesc::new(7));

    {
        let entries = entries.lock().unwrap();
        let entry = find(&entries, "msys::Graphic", "texture id: 7")
            .expect("missing graphic error entry");
        assert_eq!(entry.severity, LogSeverity::Error);
        assert!(entry.file.is_some());
        assert!(entry.line.is_some());
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_input_errors_are_logged() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);

    let mut t = create_test_system(SystemConfig::default());
    let input = t.system.input_mut();
    assert!(input.set_virtual_key(VirtualKey::Left, 0x2C, JoypadKey::Button(0)).is_err());
    input.set_joypad_threshold(0, 100);

    {
        let entries = entries.lock().unwrap();
        assert!(find(&entries, "msys::Input", "arrow keys").is_some());
        assert!(find(&entries, "msys::Input", "Invalid threshold: 0").is_some());
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_system_lifecycle_is_logged() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);

    let t = create_test_system(SystemConfig::default());
    drop(t);

    {
        let entries = entries.lock().unwrap();
        let init = find(&entries, "msys::System", "System initialized").expect("missing init entry");
        assert_eq!(init.severity, LogSeverity::Info);
        assert!(find(&entries, "msys::System", "shutting down").is_some());
    }

    Engine::reset_logger();
}
