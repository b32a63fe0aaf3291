// example_tokio: асинхронный пример с tokio и shared Logger
// Запись синхронная и короткая, поэтому логгер вызывается прямо из задач

use jsonlog::{debug, error, info, warn, LogConfig, LogLevel, Logger};
use std::sync::Arc;
use tokio::task;
use tokio::time::{sleep, Duration};

const APP_NAME: &str = "example_tokio";
const APP_VERSION: &str = "1.0.0";

// Асинхронный "воркер"
pub struct Worker {
    id: u32,
    log: Arc<Logger>,
}

impl Worker {
    pub fn new(id: u32, log: Arc<Logger>) -> Self {
        Self { id, log }
    }

    pub async fn run(&self) {
        debug!(self.log, "Worker started (async)"; "worker" => self.id);

        // Имитация асинхронной работы
        sleep(Duration::from_millis(50 + (self.id as u64) * 100)).await;

        if self.id % 3 == 0 {
            warn!(self.log, "High priority task"; "worker" => self.id);
        }

        if self.id == 2 {
            error!(self.log, "Failed to process data"; "worker" => self.id);
        }

        debug!(self.log, "Worker completed"; "worker" => self.id);
    }
}

#[tokio::main]
async fn main() {
    // 1. Преамбула
    eprintln!("Starting {} v{}", APP_NAME, APP_VERSION);

    // 2. Инициализация
    let config = LogConfig::new(".")
        .with_prefix(APP_NAME)
        .with_min_level(LogLevel::Debug);
    let shared_logger = match Logger::init(config) {
        Ok(l) => Arc::new(l),
        Err(e) => {
            eprintln!("[FATAL] Cannot initialize logger: {}", e);
            std::process::exit(1);
        }
    };

    debug!(shared_logger, "Tokio runtime initialized, spawning async tasks...");

    // 3. Основной код: запуск нескольких асинхронных задач
    let mut handles = vec![];

    for i in 0..5 {
        let logger_clone = Arc::clone(&shared_logger);
        handles.push(task::spawn(async move {
            Worker::new(i, logger_clone).run().await;
        }));
    }

    for h in handles {
        let _ = h.await;
    }

    // 4. Финальная часть
    info!(shared_logger, "All async tasks completed");
}
