use stripe_detector_mcp::{Config, Error, TransportKind};

#[tokio::test]
async fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.detector.base_url, "http://localhost:5000");
    assert_eq!(config.detector.timeout_secs, 30);
    assert_eq!(config.detector.connect_timeout_secs, 10);
    assert_eq!(config.server.graceful_shutdown_timeout_secs, 5);
    assert_eq!(config.logging.level, "info");
}

#[tokio::test]
async fn test_config_validation() {
    let mut config = Config::default();

    // Valid config should pass
    assert!(config.validate().is_ok());

    // Invalid base URL
    config.detector.base_url = "not-a-url".to_string();
    assert!(matches!(config.validate(), Err(Error::InvalidInput { .. })));
    config.detector.base_url = "http://localhost:5000".to_string();

    // Zero timeout
    config.detector.timeout_secs = 0;
    assert!(matches!(config.validate(), Err(Error::InvalidInput { .. })));
    config.detector.timeout_secs = 30;

    // Unknown log level
    config.logging.level = "loud".to_string();
    assert!(matches!(config.validate(), Err(Error::InvalidInput { .. })));
    config.logging.level = "info".to_string();

    // Unknown log format
    config.logging.format = "xml".to_string();
    assert!(matches!(config.validate(), Err(Error::InvalidInput { .. })));
}

#[test]
fn test_error_chain() {
    let err = Error::InvalidInput {
        field: "test_field".to_string(),
        reason: "test error".to_string(),
    };
    assert_eq!(format!("{}", err), "Invalid input: test_field - test error");
}

#[test]
fn test_transport_kind_classification() {
    let status = Error::Status {
        code: 502,
        endpoint: "/api/validate-url".to_string(),
    };
    assert_eq!(status.transport_kind(), TransportKind::Status);
    assert!(status.is_remote_failure());

    let decode = Error::Decode {
        endpoint: "/api/filter-products".to_string(),
        message: "expected value at line 1".to_string(),
    };
    assert_eq!(decode.transport_kind(), TransportKind::Decode);
    assert!(decode.is_remote_failure());

    let input = Error::InvalidInput {
        field: "url".to_string(),
        reason: "empty".to_string(),
    };
    assert_eq!(input.transport_kind(), TransportKind::Other);
    assert!(!input.is_remote_failure());
}

#[test]
fn test_build_info() {
    let _version = env!("CARGO_PKG_VERSION");
    let _name = env!("CARGO_PKG_NAME");
}
