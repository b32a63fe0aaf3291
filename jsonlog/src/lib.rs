//! # jsonlog
//!
//! Структурированный лог в формате NDJSON с ротацией при старте процесса.
//!
//! ```no_run
//! use jsonlog::{info, LogConfig, LogLevel, Logger};
//!
//! let logger = Logger::init(LogConfig::new("/var/lib/myapp").with_min_level(LogLevel::Debug))?;
//! info!(logger, "user logged in"; "user" => "abc", "attempt" => 2);
//! let records = logger.read_logs()?;
//! # Ok::<(), jsonlog::LogError>(())
//! ```

mod config;
mod error;
mod level;
mod logger;
mod reader;
mod record;
pub mod rotate;
mod system;

pub use config::{LogConfig, DEFAULT_MAX_FILES, DEFAULT_PREFIX, DIR_MODE, FILE_MODE};
pub use error::{ErrorKind, LogError, Result};
pub use level::LogLevel;
pub use logger::Logger;
pub use reader::read_logs;
pub use record::{LogRecord, SourceLocation};
pub use serde_json::{Map, Value};

#[doc(hidden)]
pub use serde_json as __serde_json;

// ===== Макросы =====
//
// Две формы:
//   info!(logger, "Worker {} started", id);
//   info!(logger, "Worker started"; "worker" => id, "queue" => name);

#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $msg:expr; $($key:expr => $value:expr),+ $(,)?) => {{
        $logger.log($level, &$msg, &[$(($key, $crate::__serde_json::json!($value))),+]);
    }};
    ($logger:expr, $level:expr, $($arg:tt)*) => {{
        $logger.log($level, &format!($($arg)*), &[]);
    }};
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $msg:expr; $($key:expr => $value:expr),+ $(,)?) => {{
        $logger.debug(&$msg, &[$(($key, $crate::__serde_json::json!($value))),+]);
    }};
    ($logger:expr, $($arg:tt)*) => {{
        $logger.debug(&format!($($arg)*), &[]);
    }};
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $msg:expr; $($key:expr => $value:expr),+ $(,)?) => {{
        $logger.info(&$msg, &[$(($key, $crate::__serde_json::json!($value))),+]);
    }};
    ($logger:expr, $($arg:tt)*) => {{
        $logger.info(&format!($($arg)*), &[]);
    }};
}

#[macro_export]
macro_rules! warn {
    ($logger:expr, $msg:expr; $($key:expr => $value:expr),+ $(,)?) => {{
        $logger.warn(&$msg, &[$(($key, $crate::__serde_json::json!($value))),+]);
    }};
    ($logger:expr, $($arg:tt)*) => {{
        $logger.warn(&format!($($arg)*), &[]);
    }};
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $msg:expr; $($key:expr => $value:expr),+ $(,)?) => {{
        $logger.error(&$msg, &[$(($key, $crate::__serde_json::json!($value))),+]);
    }};
    ($logger:expr, $($arg:tt)*) => {{
        $logger.error(&format!($($arg)*), &[]);
    }};
}
