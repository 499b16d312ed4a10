//! Log and event callback sinks.
//!
//! The core has no logger of its own. Hosts register a callback and receive
//! diagnostics (evictions, hook failures) and named session events
//! (commands, mode switches) as they happen.

use std::sync::{Mutex, OnceLock};

/// Log level for diagnostic callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// A console command was submitted. Data: the command text.
pub const EVENT_COMMAND: &str = "command";
/// The session switched between console and editor. Data: the new mode.
pub const EVENT_MODE: &str = "mode";
/// The active tab changed. Data: the tab name.
pub const EVENT_TAB: &str = "tab";
/// The user asked to save an editor buffer. Data: the tab name.
pub const EVENT_SAVE: &str = "save";

type EventCallback = Box<dyn Fn(&str, &str) + Send + Sync + 'static>;
type LogCallback = Box<dyn Fn(LogLevel, &str) + Send + Sync + 'static>;

fn event_callback() -> &'static Mutex<Option<EventCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<EventCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

fn log_callback() -> &'static Mutex<Option<LogCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<LogCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

/// Set the global event callback.
pub fn set_event_callback<F>(callback: F)
where
    F: Fn(&str, &str) + Send + Sync + 'static,
{
    if let Ok(mut guard) = event_callback().lock() {
        *guard = Some(Box::new(callback));
    }
}

/// Emit an event to the registered callback.
pub fn emit_event(name: &str, data: &str) {
    if let Ok(guard) = event_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(name, data);
        }
    }
}

/// Set the global log callback.
pub fn set_log_callback<F>(callback: F)
where
    F: Fn(LogLevel, &str) + Send + Sync + 'static,
{
    if let Ok(mut guard) = log_callback().lock() {
        *guard = Some(Box::new(callback));
    }
}

/// Emit a log message.
pub fn emit_log(level: LogLevel, message: &str) {
    if let Ok(guard) = log_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(level, message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_callbacks_receive_messages() {
        let events = Arc::new(AtomicUsize::new(0));
        let warnings = Arc::new(AtomicUsize::new(0));

        let events_clone = Arc::clone(&events);
        set_event_callback(move |name, data| {
            if name == EVENT_COMMAND && data == "cls()" {
                events_clone.fetch_add(1, Ordering::SeqCst);
            }
        });
        let warnings_clone = Arc::clone(&warnings);
        set_log_callback(move |level, msg| {
            if level >= LogLevel::Warn && msg == "unit-test-warning" {
                warnings_clone.fetch_add(1, Ordering::SeqCst);
            }
        });

        emit_event(EVENT_COMMAND, "cls()");
        emit_log(LogLevel::Warn, "unit-test-warning");
        emit_log(LogLevel::Debug, "unit-test-warning");

        assert!(events.load(Ordering::SeqCst) >= 1);
        assert!(warnings.load(Ordering::SeqCst) >= 1);
    }

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Warn < LogLevel::Error);
    }
}
