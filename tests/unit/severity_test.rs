//! Tests for severity classification thresholds

use bufcheck::report::{Severity, RED_THRESHOLD_SECS, YELLOW_THRESHOLD_SECS};

// ============================================================================
// Boundary cases: 59/60 and 299/300 must map exactly
// ============================================================================

#[test]
fn test_zero_age_is_green() {
    assert_eq!(Severity::from_oldest_age(0), Severity::Green);
}

#[test]
fn test_age_59_is_green() {
    assert_eq!(Severity::from_oldest_age(59), Severity::Green);
}

#[test]
fn test_age_60_is_yellow() {
    assert_eq!(Severity::from_oldest_age(60), Severity::Yellow);
}

#[test]
fn test_age_299_is_yellow() {
    assert_eq!(Severity::from_oldest_age(299), Severity::Yellow);
}

#[test]
fn test_age_300_is_red() {
    assert_eq!(Severity::from_oldest_age(300), Severity::Red);
}

#[test]
fn test_large_age_is_red() {
    assert_eq!(Severity::from_oldest_age(86_400), Severity::Red);
}

#[test]
fn test_thresholds_match_constants() {
    assert_eq!(
        Severity::from_oldest_age(YELLOW_THRESHOLD_SECS - 1),
        Severity::Green
    );
    assert_eq!(
        Severity::from_oldest_age(YELLOW_THRESHOLD_SECS),
        Severity::Yellow
    );
    assert_eq!(
        Severity::from_oldest_age(RED_THRESHOLD_SECS - 1),
        Severity::Yellow
    );
    assert_eq!(Severity::from_oldest_age(RED_THRESHOLD_SECS), Severity::Red);
}

#[test]
fn test_severity_display() {
    assert_eq!(Severity::Green.to_string(), "green");
    assert_eq!(Severity::Yellow.to_string(), "yellow");
    assert_eq!(Severity::Red.to_string(), "red");
}
