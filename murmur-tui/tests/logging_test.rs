use murmur::logging::{init_logging, LogConfig};

#[test]
fn test_logging_writes_to_configured_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let log_file = dir.path().join("murmur_test.log");

    let config = LogConfig {
        log_file: log_file.clone(),
        ..LogConfig::verbose()
    };
    init_logging(&config).expect("logger should initialize");

    log::warn!("carousel index out of range");
    log::logger().flush();

    let contents = std::fs::read_to_string(&log_file).expect("log file should exist");
    assert!(
        contents.contains("carousel index out of range"),
        "log record should be written"
    );
}
