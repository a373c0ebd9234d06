use super::*;
use std::error::Error;

#[test]
fn test_engine_error_display_includes_status() {
    let err = DockupError::Engine {
        message: "no such image: busybox:latest".to_string(),
        status_code: Some(404),
        source: None,
    };

    let display = err.to_string();
    assert!(display.contains("404"));
    assert!(display.contains("busybox:latest"));
}

#[test]
fn test_engine_error_without_status() {
    let err = DockupError::engine("stream closed", None);
    assert!(matches!(err, DockupError::Engine { status_code: None, .. }));
    assert!(err.to_string().contains("stream closed"));
}

#[test]
fn test_is_not_found_only_for_404() {
    assert!(DockupError::engine("missing", Some(404)).is_not_found());
    assert!(!DockupError::engine("boom", Some(500)).is_not_found());
    assert!(!DockupError::engine("boom", None).is_not_found());
    assert!(!DockupError::Interrupted.is_not_found());
}

#[test]
fn test_engine_with_source_keeps_source() {
    let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "broken pipe");
    let err = DockupError::engine_with_source("pull failed", None, io_err);
    assert!(err.source().is_some());
    assert!(err.source().unwrap().to_string().contains("broken pipe"));
}

#[test]
fn test_connection_with_source_helper_constructor() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "socket missing");
    let err = DockupError::connection_with_source("cannot reach engine", io_err);
    assert!(matches!(err, DockupError::Connection { .. }));
    assert!(err.to_string().contains("cannot reach engine"));
    assert!(err.source().is_some());
}

#[test]
fn test_interrupted_display() {
    let err = DockupError::Interrupted;
    assert!(err.to_string().contains("Interrupted"));
}

#[test]
fn test_config_helper_constructor() {
    let err = DockupError::config("invalid config file", Some("/path/to/config.yaml"));
    match err {
        DockupError::Config { message, path, .. } => {
            assert_eq!(message, "invalid config file");
            assert_eq!(path.as_deref(), Some("/path/to/config.yaml"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_config_with_source_helper_constructor() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err = DockupError::config_with_source(
        "failed to read config",
        Some("/path/to/config.yaml"),
        io_err,
    );
    assert!(matches!(err, DockupError::Config { .. }));
    assert!(err.source().is_some());
}

#[test]
fn test_error_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DockupError>();
}

#[test]
fn test_from_config_error_has_no_path() {
    let config_err = config::ConfigError::Message("missing field".to_string());

    let err = DockupError::from(config_err);

    match &err {
        DockupError::Config { path, .. } => assert!(path.is_none()),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.source().is_some());
}
