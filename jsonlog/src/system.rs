// ===== Системный журнал (платформозависимо) =====
//
// Сюда уходят только внутренние сбои логгера, которые нельзя вернуть
// вызывающему коду: ошибка записи или сброса файла внутри вызова info!/error!.

#[cfg(target_os = "linux")]
mod imp {
    use std::process;
    use std::sync::{Mutex, PoisonError};
    use syslog::{Facility, Formatter3164, LoggerBackend};

    pub struct SystemLog {
        inner: Mutex<syslog::Logger<LoggerBackend, Formatter3164>>,
    }

    impl SystemLog {
        pub fn connect(process_name: &str) -> Option<Self> {
            let formatter = Formatter3164 {
                facility: Facility::LOG_USER,
                hostname: None,
                process: process_name.to_owned(),
                pid: process::id(),
            };
            // Нет /dev/log (контейнеры, CI): работаем без системного журнала
            syslog::unix(formatter).ok().map(|logger| SystemLog {
                inner: Mutex::new(logger),
            })
        }

        pub fn error(&self, message: &str) {
            let mut logger = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            let _ = logger.err(message);
        }
    }
}

#[cfg(not(target_os = "linux"))]
mod imp {
    pub struct SystemLog;

    impl SystemLog {
        pub fn connect(_process_name: &str) -> Option<Self> {
            None
        }

        pub fn error(&self, _message: &str) {}
    }
}

pub(crate) use imp::SystemLog;
