use albwrap::core::config::{AdapterConfig, LogFormat};
use albwrap::setup_logging;

#[test]
fn test_logging_setup() {
    let result = std::panic::catch_unwind(|| {
        setup_logging();
    });

    assert!(result.is_ok(), "setup_logging function should not panic");
}

#[test]
fn test_repeated_setup_does_not_panic() {
    let config = AdapterConfig {
        log_format: LogFormat::Text,
        ..AdapterConfig::default()
    };

    let result = std::panic::catch_unwind(|| {
        albwrap::setup_logging_with(&config);
        albwrap::setup_logging_with(&config);
    });

    assert!(result.is_ok(), "a second setup must be a no-op");
}
