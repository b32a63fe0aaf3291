// example_error_init: пример с ошибкой инициализации

use jsonlog::{ErrorKind, LogConfig, Logger};

const APP_NAME: &str = "example_error_init";
const APP_VERSION: &str = "1.0.0";

fn main() {
    // 1. Преамбула
    eprintln!("Starting {} v{}", APP_NAME, APP_VERSION);

    // 2. Инициализация: недоступная директория
    let base_dir = "/root/forbidden";
    let logger = match Logger::init(LogConfig::new(base_dir).with_prefix(APP_NAME)) {
        Ok(l) => l,
        Err(e) => {
            // Без лога продолжать нельзя
            match e.kind() {
                ErrorKind::Configuration => eprintln!("[FATAL] Bad logger configuration: {}", e),
                ErrorKind::Filesystem => eprintln!("[FATAL] Cannot prepare log in {}: {}", base_dir, e),
                ErrorKind::Parse => eprintln!("[FATAL] Unexpected file in log directory: {}", e),
            }
            std::process::exit(1);
        }
    };

    // 3. Основной код (не достигается без прав на /root)
    logger.info("This will only be logged when running as root", &[]);
}
