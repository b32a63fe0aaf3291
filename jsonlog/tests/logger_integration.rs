use jsonlog::rotate::generation_path;
use jsonlog::{debug, error, info, log, warn};
use jsonlog::{read_logs, ErrorKind, LogConfig, LogLevel, Logger};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

fn config(dir: &Path) -> LogConfig {
    LogConfig::new(dir)
        .with_console(false)
        .with_system_fallback(false)
}

#[test]
fn round_trip_sets_level_markers() {
    let dir = TempDir::new().unwrap();
    let logger = Logger::init(config(dir.path())).unwrap();

    info!(logger, "hello"; "user" => "abc");

    let logs = logger.read_logs().unwrap();
    assert_eq!(logs.len(), 1);
    let record = &logs[0];
    assert_eq!(record["msg"], "hello");
    assert_eq!(record["level"], "INFO");
    assert_eq!(record["user"], "abc");
    assert_eq!(record["_INFO"], true);
    assert_eq!(record["_ERROR"], false);
    assert_eq!(record["_DEBUG"], false);
    assert_eq!(record["_WARN"], false);
}

#[test]
fn warn_threshold_drops_info() {
    let dir = TempDir::new().unwrap();
    let logger = Logger::init(config(dir.path()).with_min_level(LogLevel::Warn)).unwrap();

    info!(logger, "quiet");
    debug!(logger, "quieter");

    assert!(fs::read_to_string(logger.path()).unwrap().is_empty());

    warn!(logger, "disk at {}%", 91);
    error!(logger, "disk full"; "free" => 0);

    let logs = logger.read_logs().unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0]["msg"], "disk at 91%");
    assert_eq!(logs[0]["_WARN"], true);
    assert_eq!(logs[1]["free"], 0);
    assert_eq!(logs[1]["_ERROR"], true);
}

#[test]
fn macros_capture_call_site_at_debug() {
    let dir = TempDir::new().unwrap();
    let logger = Logger::init(config(dir.path()).with_min_level(LogLevel::Debug)).unwrap();

    let line = line!() + 1;
    log!(logger, LogLevel::Debug, "step"; "n" => 1);

    let logs = logger.read_logs().unwrap();
    let record = logs.last().unwrap();
    assert_eq!(record["source"]["file"], file!());
    assert_eq!(record["source"]["line"], line);
    assert_eq!(record["_DEBUG"], true);
}

#[test]
fn truncated_line_returns_error_and_no_records() {
    let dir = TempDir::new().unwrap();
    let logger = Logger::init(config(dir.path())).unwrap();
    info!(logger, "complete");
    fs::OpenOptions::new()
        .append(true)
        .open(logger.path())
        .unwrap()
        .write_all(b"{\"time\":\"2024")
        .unwrap();

    let result = read_logs(logger.path());

    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[test]
fn retention_scenario_with_three_files() {
    let dir = TempDir::new().unwrap();
    let cfg = config(dir.path()).with_max_files(3);

    for run in 0..5 {
        let logger = Logger::init(cfg.clone()).unwrap();
        info!(logger, "run"; "run" => run);
    }

    let active = cfg.log_file();
    let read_run = |path: &Path| read_logs(path).unwrap()[0]["run"].as_u64().unwrap();
    assert_eq!(read_run(&active), 4);
    assert_eq!(read_run(&generation_path(&active, 1)), 3);
    assert_eq!(read_run(&generation_path(&active, 2)), 2);
    assert!(!generation_path(&active, 3).exists());
    assert_eq!(fs::read_dir(cfg.log_dir()).unwrap().count(), 3);
}

#[test]
fn lowered_ceiling_prunes_old_backups() {
    let dir = TempDir::new().unwrap();
    for _ in 0..5 {
        let logger = Logger::init(config(dir.path()).with_max_files(5)).unwrap();
        info!(logger, "wide");
    }

    let cfg = config(dir.path()).with_max_files(2);
    let _logger = Logger::init(cfg.clone()).unwrap();

    assert_eq!(fs::read_dir(cfg.log_dir()).unwrap().count(), 2);
    assert!(generation_path(&cfg.log_file(), 1).exists());
}

#[test]
fn single_file_retention_keeps_no_backups() {
    let dir = TempDir::new().unwrap();
    let cfg = config(dir.path()).with_max_files(1);

    for _ in 0..3 {
        let logger = Logger::init(cfg.clone()).unwrap();
        info!(logger, "only");
    }

    assert_eq!(fs::read_dir(cfg.log_dir()).unwrap().count(), 1);
    assert_eq!(read_logs(&cfg.log_file()).unwrap().len(), 1);
}

#[test]
fn base_dir_that_is_a_file_fails_init() {
    let dir = TempDir::new().unwrap();
    let not_a_dir = dir.path().join("plain-file");
    fs::write(&not_a_dir, "occupied").unwrap();

    // Отказ не зависит от прав, поэтому проверка работает и под root
    let err = Logger::init(config(&not_a_dir)).err().unwrap();

    assert_eq!(err.kind(), ErrorKind::Filesystem);
    assert_eq!(fs::read_to_string(&not_a_dir).unwrap(), "occupied");
}
