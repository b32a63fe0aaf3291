use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

/// Ошибки инициализации, ротации и чтения лога.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to {op} {}: {source}", path.display())]
    Filesystem {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed rotation suffix '{suffix}' in {}: {source}", path.display())]
    RotationSuffix {
        path: PathBuf,
        suffix: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Malformed log line {line} in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Грубая классификация для вызывающего кода.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Filesystem,
    Parse,
}

impl LogError {
    pub(crate) fn fs(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        LogError::Filesystem {
            op,
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            LogError::Config(_) => ErrorKind::Configuration,
            LogError::Filesystem { .. } => ErrorKind::Filesystem,
            LogError::RotationSuffix { .. } | LogError::Parse { .. } => ErrorKind::Parse,
        }
    }
}

pub type Result<T> = std::result::Result<T, LogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filesystem_error_names_operation_and_path() {
        let err = LogError::fs(
            "rename",
            "/tmp/app.log.json",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.kind(), ErrorKind::Filesystem);
        let text = err.to_string();
        assert!(text.contains("rename"));
        assert!(text.contains("/tmp/app.log.json"));
    }

    #[test]
    fn suffix_error_is_parse_kind() {
        let source = "x1".parse::<u32>().unwrap_err();
        let err = LogError::RotationSuffix {
            path: PathBuf::from("app.log.x1"),
            suffix: "x1".to_owned(),
            source,
        };
        assert_eq!(err.kind(), ErrorKind::Parse);
    }
}
