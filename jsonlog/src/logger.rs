use serde_json::{Map, Value};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::config::LogConfig;
#[cfg(unix)]
use crate::config::{DIR_MODE, FILE_MODE};
use crate::error::{LogError, Result};
use crate::level::LogLevel;
use crate::reader;
use crate::record::{LogRecord, SourceLocation};
use crate::rotate;
use crate::system::SystemLog;

// ===== Основной логгер =====

/// Дескриптор лога. Создаётся один раз при старте через [`Logger::init`] и
/// передаётся тем, кому нужно писать (между потоками: через `Arc`).
///
/// Каждая запись: одна строка JSON в активном файле и, если включено, в
/// stderr. Записи ниже минимального уровня отбрасываются.
pub struct Logger {
    path: PathBuf,
    min_level: LogLevel,
    add_source: bool,
    console: bool,
    file: Mutex<Option<File>>,
    system_log: Option<SystemLog>,
}

impl Logger {
    /// Проверяет конфигурацию, создаёт каталог, ротирует старые файлы и
    /// открывает активный файл на дозапись.
    ///
    /// Ошибку стоит считать фатальной: без файла лога продолжать нельзя, а
    /// ротация могла остановиться на полпути.
    pub fn init(config: LogConfig) -> Result<Self> {
        let config = config.validate()?;

        let dir = config.log_dir();
        create_log_dir(&dir)?;

        let path = config.log_file();
        rotate::rotate(&path, config.max_files)?;
        rotate::prune_stale(&path, config.max_files)?;

        let file = open_append(&path)?;

        let system_log = if config.system_fallback {
            SystemLog::connect(&config.prefix)
        } else {
            None
        };

        let logger = Logger {
            path,
            min_level: config.min_level,
            add_source: config.min_level == LogLevel::Debug,
            console: config.console,
            file: Mutex::new(Some(file)),
            system_log,
        };

        logger.debug(
            "Successfully initialized the Logger.",
            &[
                ("log_file", Value::from(logger.path.display().to_string())),
                ("logger_level", Value::from(logger.min_level.as_str())),
            ],
        );
        Ok(logger)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    #[track_caller]
    pub fn log(&self, level: LogLevel, message: &str, fields: &[(&str, Value)]) {
        if !self.enabled(level) {
            return;
        }
        let source = if self.add_source {
            Some(SourceLocation::from(Location::caller()))
        } else {
            None
        };
        let record = LogRecord::new(level, message, fields, source);
        self.write_record(&record);
    }

    #[track_caller]
    pub fn debug(&self, message: &str, fields: &[(&str, Value)]) {
        self.log(LogLevel::Debug, message, fields);
    }

    #[track_caller]
    pub fn info(&self, message: &str, fields: &[(&str, Value)]) {
        self.log(LogLevel::Info, message, fields);
    }

    #[track_caller]
    pub fn warn(&self, message: &str, fields: &[(&str, Value)]) {
        self.log(LogLevel::Warn, message, fields);
    }

    #[track_caller]
    pub fn error(&self, message: &str, fields: &[(&str, Value)]) {
        self.log(LogLevel::Error, message, fields);
    }

    fn write_record(&self, record: &LogRecord) {
        let mut line = match record.to_json_line() {
            Ok(line) => line,
            Err(e) => {
                self.report(&format!("Failed to serialize log record: {}", e));
                return;
            }
        };
        line.push('\n');

        // Формирование строки и дозапись: под одной блокировкой
        let mut file_lock = self.file.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(ref mut file) = *file_lock {
            if let Err(e) = file.write_all(line.as_bytes()).and_then(|_| file.flush()) {
                self.report(&format!(
                    "Failed to write log file {}: {}",
                    self.path.display(),
                    e
                ));
            }
        }

        if self.console {
            let _ = io::stderr().lock().write_all(line.as_bytes());
        }
    }

    fn report(&self, message: &str) {
        if let Some(ref system_log) = self.system_log {
            system_log.error(message);
        }
    }

    /// Читает активный файл целиком. Ошибка чтения дополнительно
    /// записывается в сам лог.
    pub fn read_logs(&self) -> Result<Vec<Map<String, Value>>> {
        match reader::read_logs(&self.path) {
            Ok(records) => Ok(records),
            Err(e) => {
                self.error(
                    "Failed to read the log file.",
                    &[
                        ("error", Value::from(e.to_string())),
                        ("log_file", Value::from(self.path.display().to_string())),
                    ],
                );
                Err(e)
            }
        }
    }

    /// Сбрасывает и закрывает файл. Дальнейшие записи идут только в stderr.
    pub fn close(&self) {
        let mut file_lock = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(file) = file_lock.take() {
            if let Err(e) = file.sync_all() {
                self.report(&format!(
                    "Failed to sync log file {}: {}",
                    self.path.display(),
                    e
                ));
            }
        }
    }
}

fn create_log_dir(dir: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder
        .create(dir)
        .map_err(|e| LogError::fs("create directory", dir, e))
}

fn open_append(path: &Path) -> Result<File> {
    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }
    options.open(path).map_err(|e| LogError::fs("open", path, e))
}
