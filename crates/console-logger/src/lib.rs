//! Console logger with a circular buffer
//!
//! A `log` backend for browser apps. Each record is formatted once, written
//! to the browser console (stderr when not on wasm), and kept in a bounded
//! in-memory buffer so the UI can show recent diagnostics.

use std::collections::VecDeque;
use std::sync::{Mutex, OnceLock};

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Lines kept in the buffer
pub const DEFAULT_CAPACITY: usize = 200;

static LOGGER: OnceLock<ConsoleLogger> = OnceLock::new();

pub struct ConsoleLogger {
    app_name: String,
    level: LevelFilter,
    buffer: Mutex<VecDeque<String>>,
    capacity: usize,
}

impl ConsoleLogger {
    pub fn new(app_name: &str, level: LevelFilter, capacity: usize) -> Self {
        Self {
            app_name: app_name.to_string(),
            level,
            buffer: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity: capacity.max(1),
        }
    }

    fn format(&self, record: &Record) -> String {
        format!(
            "[{}] {} {} {}: {}",
            chrono::Utc::now().format("%H:%M:%S%.3f"),
            self.app_name,
            record.level(),
            record.target(),
            record.args()
        )
    }

    fn push(&self, line: String) {
        if let Ok(mut buffer) = self.buffer.lock() {
            while buffer.len() >= self.capacity {
                buffer.pop_front();
            }
            buffer.push_back(line);
        }
    }

    /// Buffered lines, oldest first
    pub fn lines(&self) -> Vec<String> {
        self.buffer
            .lock()
            .map(|buffer| buffer.iter().cloned().collect())
            .unwrap_or_default()
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = self.format(record);
        write_console(record.level(), &line);
        self.push(line);
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn write_console(level: Level, line: &str) {
    use wasm_bindgen::JsValue;
    let value = JsValue::from_str(line);
    match level {
        Level::Error => web_sys::console::error_1(&value),
        Level::Warn => web_sys::console::warn_1(&value),
        Level::Info => web_sys::console::info_1(&value),
        Level::Debug | Level::Trace => web_sys::console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_console(_level: Level, line: &str) {
    eprintln!("{}", line);
}

/// Install the global logger
///
/// Fails if a logger (this one or another) is already installed.
pub fn init_logger(app_name: &str, level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| ConsoleLogger::new(app_name, level, DEFAULT_CAPACITY));
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// Recent lines from the installed logger; empty if none is installed
pub fn recent_lines() -> Vec<String> {
    LOGGER.get().map(ConsoleLogger::lines).unwrap_or_default()
}
