// example_advanced: многопоточный пример с "классом" Worker
// Каждый поток: экземпляр структуры Worker, которой передаётся клон логгера

use jsonlog::{debug, error, info, warn, LogConfig, LogLevel, Logger};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const APP_NAME: &str = "example_advanced";
const APP_VERSION: &str = "1.1.0";

// Структура, моделирующая "класс" потока
pub struct Worker {
    id: u32,
    log: Arc<Logger>,
}

impl Worker {
    pub fn new(id: u32, log: Arc<Logger>) -> Self {
        Self { id, log }
    }

    pub fn run(&self) {
        debug!(self.log, "Worker started"; "worker" => self.id);

        // Имитация работы
        thread::sleep(Duration::from_millis(50 + (self.id as u64) * 100));

        if self.id % 2 == 1 {
            warn!(self.log, "Odd workload detected"; "worker" => self.id);
        }

        // Имитация ошибки у одного из воркеров
        if self.id == 2 {
            error!(self.log, "Transient error"; "worker" => self.id, "retryable" => true);
        }

        debug!(self.log, "Worker finished"; "worker" => self.id);
    }
}

fn main() {
    // 1. Преамбула
    eprintln!("Starting {} v{}", APP_NAME, APP_VERSION);

    // 2. Инициализация
    let config = LogConfig::new(".")
        .with_prefix(APP_NAME)
        .with_min_level(LogLevel::Debug);
    let logger = match Logger::init(config) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("[FATAL] Cannot initialize logger: {}", e);
            std::process::exit(1);
        }
    };

    // Оборачиваем логгер в Arc, чтобы безопасно клонировать между потоками
    let shared_logger = Arc::new(logger);

    debug!(shared_logger, "Main thread initialized, spawning workers...");

    // 3. Основной код: создание потоков с объектами Worker
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let logger_clone = Arc::clone(&shared_logger);
            thread::spawn(move || Worker::new(i, logger_clone).run())
        })
        .collect();

    // Ожидание завершения всех потоков
    for h in handles {
        let _ = h.join();
    }

    // 4. Финальная часть
    info!(shared_logger, "All workers have finished"; "workers" => 4);
}
