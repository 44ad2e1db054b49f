// Integration test for logging bootstrap
// Note: initializes the global subscriber, so it lives in its own test binary

use std::fs;

use tempfile::TempDir;
use tracing::{info, instrument, warn};
use yosai::domain::models::{LogFormat, LoggingSettings, RotationPolicy};
use yosai::infrastructure::logging::{LogConfig, LoggerImpl};

/// Main integration test that covers file output from resolved settings
#[test]
fn test_logging_to_rolling_file() {
    let temp_dir = TempDir::new().unwrap();

    let settings = LoggingSettings {
        level: "warning".to_string(),
        format: LogFormat::Json,
        log_dir: Some(temp_dir.path().to_path_buf()),
        rotation: RotationPolicy::Never,
    };
    let config = LogConfig {
        enable_stderr: false,
        ..LogConfig::from(&settings)
    };

    temp_env::with_var_unset("RUST_LOG", || {
        let logger = LoggerImpl::init(&config).unwrap();

        info!("below threshold");
        warn!(key = "database.host", "override applied");
        assert_eq!(instrumented_add(5, 7), 12);

        // Dropping the guard flushes the background writer
        drop(logger);
    });

    let contents = fs::read_to_string(temp_dir.path().join("yosai.log")).unwrap();

    assert!(contents.contains("override applied"));
    assert!(contents.contains("database.host"));
    assert!(contents.contains("instrumented warning"));
    assert!(!contents.contains("below threshold"));

    // A second subscriber cannot be installed
    assert!(LoggerImpl::init(&LogConfig::default()).is_err());
}

#[instrument]
fn instrumented_add(a: i32, b: i32) -> i32 {
    warn!("instrumented warning");
    a + b
}
