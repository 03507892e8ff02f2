//! Integration tests for logging functionality

use relex::config::LoggingConfig;
use relex::logging::init_logging;
use relex::logging::structured::LOG_FILE_NAME;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(config.local_enabled);
    assert_eq!(config.local_rotation, "daily");
    assert_eq!(config.local_path, "/var/log/relex");
}

#[test]
fn test_init_logging_creates_log_directory() {
    // The global subscriber can only be installed once per process, so this
    // is the only test in this binary that initializes logging.
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };

    let guard = init_logging("debug", &config).unwrap();
    drop(guard);

    assert!(log_path.is_dir());
    let contents = std::fs::read_to_string(log_path.join(LOG_FILE_NAME)).unwrap();
    assert!(contents.contains("Logging initialized"));
    assert!(contents.contains("\"rotation\":\"never\""));
}

#[test]
fn test_invalid_level_is_rejected() {
    let config = LoggingConfig {
        local_enabled: false,
        ..LoggingConfig::default()
    };
    assert!(init_logging("loud", &config).is_err());
}
