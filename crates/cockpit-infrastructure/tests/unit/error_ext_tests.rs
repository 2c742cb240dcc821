//! Error Extension Tests

use cockpit_domain::error::{Error, Result};
use cockpit_infrastructure::error_ext::ErrorContext;
use std::io;

#[test]
fn test_io_context_keeps_source() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");

    let result: Result<()> = Err(io_error).io_context("failed to read file");

    if let Err(Error::Io { source, message }) = result {
        assert!(message.contains("failed to read file"));
        assert!(message.contains("file not found"));
        assert!(source.is_some());
    } else {
        panic!("Expected Io error");
    }
}

#[test]
fn test_config_context_maps_to_configuration() {
    let parse_error = "not a number".parse::<u64>().unwrap_err();

    let result: Result<u64> = Err(parse_error).config_context("interval_ms");

    match result {
        Err(Error::Configuration { message, source }) => {
            assert!(message.starts_with("interval_ms: "));
            assert!(source.is_some());
        }
        other => panic!("Expected Configuration error, got {other:?}"),
    }
}

#[test]
fn test_ok_passes_through() {
    let value: Result<u32> = Ok::<u32, io::Error>(7).io_context("unused");
    assert_eq!(value.unwrap(), 7);
}
