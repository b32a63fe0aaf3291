use chrono::{DateTime, Local, SecondsFormat};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::panic::Location;

use crate::level::LogLevel;

/// Ключи, которые запись заполняет сама.
pub const RESERVED_KEYS: [&str; 4] = ["time", "level", "source", "msg"];

/// Место вызова, захваченное через `#[track_caller]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl From<&Location<'_>> for SourceLocation {
    fn from(location: &Location<'_>) -> Self {
        SourceLocation {
            file: location.file().to_owned(),
            line: location.line(),
            column: location.column(),
        }
    }
}

// ===== Запись =====

/// Одна строка лога. После создания не меняется.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    #[serde(rename = "time", serialize_with = "serialize_time")]
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceLocation>,
    #[serde(rename = "msg")]
    pub message: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

fn serialize_time<S: Serializer>(time: &DateTime<Local>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&time.to_rfc3339_opts(SecondsFormat::Micros, false))
}

impl LogRecord {
    /// Собирает запись с текущим временем. Поле, совпадающее по имени с
    /// зарезервированным ключом, пишется как `fields.<ключ>`.
    pub fn new(
        level: LogLevel,
        message: &str,
        fields: &[(&str, Value)],
        source: Option<SourceLocation>,
    ) -> Self {
        let mut map = Map::with_capacity(fields.len());
        for (key, value) in fields {
            let key = if RESERVED_KEYS.contains(key) {
                format!("fields.{}", key)
            } else {
                (*key).to_owned()
            };
            map.insert(key, value.clone());
        }

        LogRecord {
            timestamp: Local::now(),
            level,
            source,
            message: message.to_owned(),
            fields: map,
        }
    }

    /// Одна строка NDJSON без завершающего перевода строки.
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn line_has_fixed_keys_first() {
        let record = LogRecord::new(
            LogLevel::Info,
            "hello",
            &[("user", json!("abc")), ("attempt", json!(3))],
            None,
        );
        let line = record.to_json_line().unwrap();
        let parsed: Map<String, Value> = serde_json::from_str(&line).unwrap();

        let keys: Vec<&str> = parsed.keys().map(String::as_str).collect();
        assert_eq!(keys, ["time", "level", "msg", "user", "attempt"]);
        assert_eq!(parsed["level"], "INFO");
        assert_eq!(parsed["msg"], "hello");
        assert_eq!(parsed["attempt"], 3);
        assert!(!line.contains('\n'));
    }

    #[test]
    fn time_is_rfc3339() {
        let record = LogRecord::new(LogLevel::Debug, "t", &[], None);
        let parsed: Value = serde_json::from_str(&record.to_json_line().unwrap()).unwrap();
        let time = parsed["time"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(time).is_ok());
    }

    #[test]
    fn source_is_written_when_present() {
        let record = LogRecord::new(
            LogLevel::Debug,
            "here",
            &[],
            Some(SourceLocation::from(Location::caller())),
        );
        let parsed: Value = serde_json::from_str(&record.to_json_line().unwrap()).unwrap();
        assert!(parsed["source"]["file"].as_str().unwrap().ends_with(".rs"));
        assert!(parsed["source"]["line"].as_u64().unwrap() > 0);
    }

    #[test]
    fn reserved_field_names_are_moved_aside() {
        let record = LogRecord::new(
            LogLevel::Warn,
            "real",
            &[("level", json!("DEBUG")), ("msg", json!("fake"))],
            None,
        );
        let parsed: Value = serde_json::from_str(&record.to_json_line().unwrap()).unwrap();
        assert_eq!(parsed["level"], "WARN");
        assert_eq!(parsed["msg"], "real");
        assert_eq!(parsed["fields.level"], "DEBUG");
        assert_eq!(parsed["fields.msg"], "fake");
    }
}
