//! Global subscriber installation
//!
//! Runs in its own test binary so the global subscriber is untouched by
//! other tests.

use vcr_core::args;
use vcr_logging::{
    init_testing, recorder, FrameConfig, LogConfig, LoggingError, VcrSubscriberBuilder,
};

#[test]
fn test_second_install_fails_and_frames_still_flow() {
    init_testing();

    let err = VcrSubscriberBuilder::new()
        .with_config(LogConfig::development())
        .try_init()
        .unwrap_err();
    assert!(matches!(err, LoggingError::Init(_)));

    // Calling the testing helper again is harmless.
    init_testing();

    let vcr = recorder("app");
    vcr.warn(args!["routed through tracing", 1]).unwrap();
}

#[test]
fn test_config_roundtrips_through_json() {
    let config = LogConfig::development();
    let json = serde_json::to_string(&config).unwrap();
    let parsed: LogConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, config);

    // Missing sections fall back to defaults.
    let partial: LogConfig = serde_json::from_str(r#"{"default_level":"error"}"#).unwrap();
    assert_eq!(partial.default_level, "error");
    assert_eq!(partial.console, LogConfig::default().console);
    assert_eq!(partial.frames, FrameConfig::default());

    let frames: LogConfig = serde_json::from_str(r#"{"frames":{"enabled":false}}"#).unwrap();
    assert_eq!(frames.directives(), "info,vcr=off");
}
