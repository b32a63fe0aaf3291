// example_simple: простой пример: инициализация, логи в файл, завершение

use jsonlog::{debug, error, info, warn, LogConfig, LogLevel, Logger};

const APP_NAME: &str = "example_simple";
const APP_VERSION: &str = "1.0.0";

fn main() {
    // 1. Преамбула
    eprintln!("Starting {} v{}", APP_NAME, APP_VERSION);

    // 2. Инициализация: ротация прошлого запуска и открытие файла
    let config = LogConfig::new(".")
        .with_prefix(APP_NAME)
        .with_max_files(3)
        .with_min_level(LogLevel::Debug);
    let logger = match Logger::init(config) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("[FATAL] Cannot initialize logger: {}", e);
            std::process::exit(1);
        }
    };

    // 3. Основной код
    debug!(logger, "Application initialized successfully");
    info!(logger, "Processing data block"; "block" => 1, "size" => 4096);
    warn!(logger, "Non-critical issue detected"; "retries" => 2);
    error!(logger, "An error occurred, but we continue");
    info!(logger, "Processing data block"; "block" => 2, "size" => 512);

    // 4. Финальная часть
    info!(logger, "Application finished successfully"; "log_file" => logger.path().display().to_string());
}
