//! example_rotation: демонстрация ротации при каждом старте

use jsonlog::{info, LogConfig, Logger};
use std::fs;

const APP_NAME: &str = "example_rotation";
const APP_VERSION: &str = "1.0.0";

const MAX_LOG_FILES: usize = 3;
// Больше запусков, чем хранится файлов: старые копии должны удаляться
const STARTUPS: usize = 6;

fn main() {
    // 1. Преамбула
    eprintln!("Starting {} v{}", APP_NAME, APP_VERSION);

    let config = LogConfig::new(".")
        .with_prefix(APP_NAME)
        .with_max_files(MAX_LOG_FILES)
        .with_console(false);

    // 2-3. Имитируем несколько перезапусков процесса
    for run in 0..STARTUPS {
        let logger = match Logger::init(config.clone()) {
            Ok(l) => l,
            Err(e) => {
                eprintln!("[FATAL] Rotation failed on startup {}: {}", run, e);
                std::process::exit(1);
            }
        };
        for i in 0..10 {
            info!(logger, "Message from startup"; "startup" => run, "n" => i);
        }
    }

    // 4. Финальная часть: что осталось на диске
    let mut names: Vec<String> = match fs::read_dir(config.log_dir()) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|n| n.starts_with(APP_NAME))
            .collect(),
        Err(e) => {
            eprintln!("Cannot list {}: {}", config.log_dir().display(), e);
            std::process::exit(1);
        }
    };
    names.sort();

    println!("Files remaining (max_files={}):", MAX_LOG_FILES);
    for name in &names {
        println!("  {}", name);
    }
}
