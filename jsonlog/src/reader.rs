use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{LogError, Result};
use crate::level::LogLevel;

/// Читает файл лога, в котором каждая строка содержит объект JSON.
///
/// К каждой записи добавляются маркеры `_DEBUG`, `_INFO`, `_WARN`, `_ERROR`
/// по значению поля `level`. Любая битая строка (в том числе недописанная
/// последняя при чтении во время записи) прерывает чтение целиком: частичный
/// результат не возвращается.
pub fn read_logs(path: &Path) -> Result<Vec<Map<String, Value>>> {
    let file = File::open(path).map_err(|e| LogError::fs("open", path, e))?;
    let reader = BufReader::new(file);

    let mut logs = Vec::new();
    // Строки читаются байтами: оборванный посреди UTF-8 символ должен дать
    // ошибку разбора, а не ошибку ввода-вывода
    for (index, line) in reader.split(b'\n').enumerate() {
        let line = line.map_err(|e| LogError::fs("read", path, e))?;
        let line = line.strip_suffix(b"\r").unwrap_or(&line);
        let mut record: Map<String, Value> =
            serde_json::from_slice(line).map_err(|source| LogError::Parse {
                path: path.to_path_buf(),
                line: index + 1,
                source,
            })?;
        mark_levels(&mut record);
        logs.push(record);
    }
    Ok(logs)
}

fn mark_levels(record: &mut Map<String, Value>) {
    let level = record
        .get("level")
        .and_then(Value::as_str)
        .map(str::to_owned);
    for candidate in LogLevel::ALL {
        let matches = level.as_deref() == Some(candidate.as_str());
        record.insert(candidate.marker_key().to_owned(), Value::Bool(matches));
    }
}
