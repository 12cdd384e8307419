//! Tests for policy loading from files and the PORTAL_CONFIG variable.

mod support;

use portal_metrics::config::{ConfigError, PolicyConfig, CONFIG_ENV_VAR};
use portal_metrics::models::FilterState;
use portal_metrics::services::MetricsGenerator;

#[test]
fn test_from_file_reads_policy() {
    let file = support::policy_file(
        r#"
[retention]
base = 80.0
mid_semester_dip = -5.0
dip_start_day = 10
dip_end_day = 20
"#,
    );

    let policy = PolicyConfig::from_file(file.path()).unwrap();
    assert_eq!(policy.retention.base, 80.0);

    let generator = MetricsGenerator::new(&policy);
    let snapshot = generator.compute_for_days(15, &FilterState::new());
    assert_eq!(snapshot.retention.current, 75.0);
    assert!(snapshot.retention.mid_semester_dip_active);
}

#[test]
fn test_from_file_missing_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");

    let err = PolicyConfig::from_file(&missing).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn test_from_file_invalid_policy() {
    let file = support::policy_file("[performance]\nsatisfaction_period = 0.0\n");
    let err = PolicyConfig::from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_from_env_uses_portal_config() {
    support::with_policy_env("[enrollment]\nbase = 9000.0\n", || {
        let policy = PolicyConfig::from_env().unwrap();
        assert_eq!(policy.enrollment.base, 9000.0);
    });
}

#[test]
fn test_from_env_reports_bad_file() {
    support::with_policy_env("[scoring]\ncap_multiple = \"high\"\n", || {
        let err = PolicyConfig::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    });
}

#[test]
fn test_from_env_without_file_uses_default() {
    support::with_scoped_env(&[(CONFIG_ENV_VAR, None)], || {
        // Test binaries run from the package root, which ships no portal.toml.
        let policy = PolicyConfig::from_env().unwrap();
        assert_eq!(policy, PolicyConfig::default());
    });
}

#[test]
fn test_blank_portal_config_is_ignored() {
    support::with_scoped_env(&[(CONFIG_ENV_VAR, Some("  "))], || {
        let policy = PolicyConfig::from_env().unwrap();
        assert_eq!(policy.scoring.cap_multiple, 1.2);
    });
}
