use std::path::{Path, PathBuf};

use crate::error::{LogError, Result};
use crate::level::LogLevel;

pub const DEFAULT_PREFIX: &str = "app";
pub const DEFAULT_MAX_FILES: usize = 5;

/// Каталог логов внутри базовой директории.
pub const LOG_DIR_NAME: &str = "log";
/// Расширение активного файла; ротированные копии получают `.1`, `.2`, ...
pub const BASE_EXTENSION: &str = "json";

/// rwxr-xr-x
pub const DIR_MODE: u32 = 0o755;
/// rw-rw-rw-
pub const FILE_MODE: u32 = 0o666;

// ===== Конфигурация =====

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub base_dir: PathBuf,
    pub prefix: String,
    pub max_files: usize,
    pub min_level: LogLevel,
    /// Дублировать записи в stderr.
    pub console: bool,
    /// Сообщать о сбоях записи в системный журнал.
    pub system_fallback: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            base_dir: PathBuf::new(),
            prefix: DEFAULT_PREFIX.to_owned(),
            max_files: DEFAULT_MAX_FILES,
            min_level: LogLevel::Info,
            console: true,
            system_fallback: true,
        }
    }
}

impl LogConfig {
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        LogConfig {
            base_dir: base_dir.as_ref().to_path_buf(),
            ..LogConfig::default()
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_owned();
        self
    }

    pub fn with_max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files;
        self
    }

    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn with_console(mut self, console: bool) -> Self {
        self.console = console;
        self
    }

    pub fn with_system_fallback(mut self, enabled: bool) -> Self {
        self.system_fallback = enabled;
        self
    }

    /// Проверяет конфигурацию и подставляет значения по умолчанию.
    ///
    /// Пустая базовая директория считается фатальной ошибкой; пустой префикс
    /// заменяется на `app`, нулевое число файлов на 5.
    pub fn validate(mut self) -> Result<Self> {
        if self.base_dir.as_os_str().is_empty() {
            return Err(LogError::Config("base directory cannot be empty".to_owned()));
        }
        if self.prefix.trim().is_empty() {
            self.prefix = DEFAULT_PREFIX.to_owned();
        }
        if self.max_files < 1 {
            self.max_files = DEFAULT_MAX_FILES;
        }
        Ok(self)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.base_dir.join(LOG_DIR_NAME)
    }

    /// `<base_dir>/log/<prefix>.log.json`
    pub fn log_file(&self) -> PathBuf {
        self.log_dir()
            .join(format!("{}.log.{}", self.prefix, BASE_EXTENSION))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_base_dir_is_rejected() {
        let err = LogConfig::default().validate().unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Configuration);
    }

    #[test]
    fn missing_values_get_defaults() {
        let config = LogConfig::new("/srv/app")
            .with_prefix("  ")
            .with_max_files(0)
            .validate()
            .unwrap();
        assert_eq!(config.prefix, "app");
        assert_eq!(config.max_files, 5);
        assert_eq!(config.min_level, LogLevel::Info);
    }

    #[test]
    fn explicit_values_are_kept() {
        let config = LogConfig::new("/srv/app")
            .with_prefix("worker")
            .with_max_files(1)
            .with_min_level(LogLevel::Warn)
            .validate()
            .unwrap();
        assert_eq!(config.prefix, "worker");
        assert_eq!(config.max_files, 1);
        assert_eq!(config.min_level, LogLevel::Warn);
    }

    #[test]
    fn log_file_path_layout() {
        let config = LogConfig::new("/srv/app").with_prefix("worker");
        assert_eq!(config.log_dir(), PathBuf::from("/srv/app/log"));
        assert_eq!(
            config.log_file(),
            PathBuf::from("/srv/app/log/worker.log.json")
        );
    }
}
