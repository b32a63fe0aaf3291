//! example_viewer: чтение лога обратно и фильтрация по маркерам уровней

use jsonlog::{error, info, warn, LogConfig, LogLevel, Logger, Value};

const APP_NAME: &str = "example_viewer";

fn main() {
    let config = LogConfig::new(".")
        .with_prefix(APP_NAME)
        .with_console(false);
    let logger = match Logger::init(config) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("[FATAL] Cannot initialize logger: {}", e);
            std::process::exit(1);
        }
    };

    info!(logger, "Viewer opened"; "user" => "abc");
    warn!(logger, "Cache is stale"; "age_secs" => 3600);
    error!(logger, "Backend unreachable"; "host" => "db-1");

    // Просмотрщик показывает ошибку вместо записей, если файл не читается
    let records = match logger.read_logs() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Cannot show logs: {}", e);
            std::process::exit(1);
        }
    };

    for level in LogLevel::ALL {
        let count = records
            .iter()
            .filter(|r| r.get(level.marker_key()) == Some(&Value::Bool(true)))
            .count();
        println!("{:<5} {}", level.as_str(), count);
    }

    let problems = records
        .iter()
        .filter(|r| r["_WARN"] == true || r["_ERROR"] == true);
    for record in problems {
        println!(
            "[{}] {}",
            record["level"].as_str().unwrap_or("?"),
            record["msg"].as_str().unwrap_or_default()
        );
    }
}
