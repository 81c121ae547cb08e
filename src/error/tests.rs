//! Tests for error types.

use super::*;
use std::path::Path;

#[test]
fn test_error_display() {
    let err = Error::config("invalid port");
    assert_eq!(err.to_string(), "configuration error: invalid port");
}

#[test]
fn test_output_root_error_display() {
    let err = PipelineError::OutputRoot {
        path: "/ro/reference".to_string(),
        reason: "read-only file system".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "cannot create output root '/ro/reference': read-only file system"
    );
}

#[test]
fn test_pipeline_error_helpers() {
    let read = PipelineError::read_failed(Path::new("/src/A.java"), "permission denied");
    assert_eq!(read.to_string(), "failed to read '/src/A.java': permission denied");

    let write = PipelineError::write_failed(Path::new("/out/A.md"), "disk full");
    assert_eq!(write.to_string(), "failed to write '/out/A.md': disk full");
}

#[test]
fn test_pipeline_error_conversion() {
    let err: Error = PipelineError::read_failed(Path::new("x"), "nope").into();
    assert!(matches!(err, Error::Pipeline(_)));
    assert!(err.to_string().starts_with("pipeline error:"));
}

#[test]
fn test_watcher_error_conversion() {
    let watch_err = WatcherError::WatchFailed {
        path: "/tmp/test".to_string(),
        reason: "permission denied".to_string(),
    };
    let err: Error = watch_err.into();
    assert!(matches!(err, Error::Watcher(_)));

    let run_err: Error = WatcherError::RunFailed("exit status 1".to_string()).into();
    assert_eq!(
        run_err.to_string(),
        "watcher error: pipeline run failed: exit status 1"
    );
}

#[test]
fn test_server_error_conversion() {
    let server_err = ServerError::BindFailed {
        address: "127.0.0.1:4322".to_string(),
        reason: "address in use".to_string(),
    };
    let err: Error = server_err.into();
    assert!(matches!(err, Error::Server(_)));
}

#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_result_type_alias() {
    fn returns_ok() -> Result<i32> {
        Ok(42)
    }

    fn returns_err() -> Result<i32> {
        Err(Error::config("test error"))
    }

    assert!(returns_ok().is_ok());
    assert!(returns_err().is_err());
}

#[test]
fn test_error_debug_format() {
    let err = Error::internal("something went wrong");
    let debug_str = format!("{err:?}");
    assert!(debug_str.contains("Internal"));
    assert!(debug_str.contains("something went wrong"));
}
