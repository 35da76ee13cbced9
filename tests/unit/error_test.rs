//! Tests for src/error/mod.rs - BufcheckError

use bufcheck::error::BufcheckError;

// ============================================================================
// BufcheckError Display tests
// ============================================================================

#[test]
fn test_config_error_display() {
    let err = BufcheckError::Config("no kubeconfig found".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Configuration error"));
    assert!(display.contains("no kubeconfig found"));
}

#[test]
fn test_remote_exec_error_display() {
    let err = BufcheckError::RemoteExec {
        pod: "fluentd-abc12".to_string(),
        reason: "NonZeroExitCode".to_string(),
    };
    let display = format!("{}", err);
    assert!(display.contains("Remote command failed"));
    assert!(display.contains("fluentd-abc12"));
    assert!(display.contains("NonZeroExitCode"));
}

#[test]
fn test_serde_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
    let err = BufcheckError::from(json_err);
    assert!(matches!(err, BufcheckError::Serialization(_)));
}
