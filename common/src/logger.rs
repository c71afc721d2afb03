use std::sync::OnceLock;
use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Info,
    Debug,
}

pub struct Logger {
    prefix: Option<String>,
    level: LogLevel,
}

impl Logger {
    fn new(prefix: Option<String>, level: LogLevel) -> Self {
        Self { prefix, level }
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level <= self.level
    }

    pub fn log(&self, level: LogLevel, file: &str, line: u32, message: &str) {
        if !self.enabled(level) {
            return;
        }

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let file_name = file.rsplit(['/', '\\']).next().unwrap_or(file);
        let tag = match level {
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        };
        if let Some(ref prefix) = self.prefix {
            println!("[{}][{}][{}][{}:{}] {}", timestamp, tag, prefix, file_name, line, message);
        } else {
            println!("[{}][{}][{}:{}] {}", timestamp, tag, file_name, line, message);
        }
    }
}

/// Installs the process-wide logger. Later calls are ignored.
pub fn init_logger(prefix: Option<String>, level: LogLevel) {
    LOGGER.get_or_init(|| Logger::new(prefix, level));
}

pub fn log(level: LogLevel, file: &str, line: u32, message: &str) {
    match LOGGER.get() {
        Some(logger) => logger.log(level, file, line, message),
        // Engine unit tests never initialize the logger; stay quiet for debug noise.
        None if level == LogLevel::Debug => {}
        None => eprintln!("Logger not initialized! Call init_logger() first. {}", message),
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log($crate::logger::LogLevel::Info, file!(), line!(), &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        $crate::logger::log($crate::logger::LogLevel::Debug, file!(), line!(), &format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_messages_filtered_at_info_level() {
        let logger = Logger::new(None, LogLevel::Info);
        assert!(logger.enabled(LogLevel::Info));
        assert!(!logger.enabled(LogLevel::Debug));
    }

    #[test]
    fn test_debug_level_enables_everything() {
        let logger = Logger::new(Some("Host".to_string()), LogLevel::Debug);
        assert!(logger.enabled(LogLevel::Info));
        assert!(logger.enabled(LogLevel::Debug));
    }
}
