use super::*;
use chrono::{Duration, TimeZone};

use crate::models::{ChangeType, DomainType, MetricStatus};

fn policy() -> PolicyConfig {
    PolicyConfig::default()
}

fn filters(pairs: &[(&str, &str)]) -> FilterState {
    pairs.iter().copied().collect()
}

#[test]
fn test_compute_is_deterministic() {
    let policy = policy();
    let generator = MetricsGenerator::new(&policy);
    let now = Utc.with_ymd_and_hms(2026, 11, 2, 15, 30, 0).unwrap();
    let f = filters(&[("timeRange", "academic-year"), ("status", "all")]);

    let a = generator.compute(&f, now);
    let b = generator.compute(&f, now);

    assert_eq!(a, b);
    assert_eq!(a.enrollment.current.to_bits(), b.enrollment.current.to_bits());
    assert_eq!(
        a.performance.satisfaction.to_bits(),
        b.performance.satisfaction.to_bits()
    );
}

#[test]
fn test_future_anchor_yields_base_values() {
    let policy = policy();
    let generator = MetricsGenerator::new(&policy);
    let before_anchor = policy.anchor - Duration::days(45);
    let snapshot = generator.compute(&FilterState::new(), before_anchor);

    assert!(snapshot.days_elapsed < 0);
    assert_eq!(snapshot.enrollment.current, policy.enrollment.base);
    assert_eq!(snapshot.enrollment.new_admissions, 0.0);
    assert_eq!(snapshot.retention.current, policy.retention.base);
    assert_eq!(
        snapshot.retention.at_risk_students,
        policy.retention.at_risk_initial as u32
    );
    assert_eq!(snapshot.performance.average_gpa, policy.performance.gpa_base);
    assert_eq!(snapshot.performance.satisfaction, policy.performance.satisfaction_base);
    assert_eq!(
        snapshot.strategic.projected_growth,
        policy.strategic.projected_growth_base
    );
    assert_eq!(snapshot.enrollment.change, ChangeType::Neutral);
}

#[test]
fn test_enrollment_growth_plateaus_at_cap() {
    let p = EnrollmentPolicy::default();
    assert_eq!(enrollment_at(&p, 10), p.base + 10.0 * p.growth_rate_per_day);
    assert_eq!(enrollment_at(&p, 10_000), p.base + p.growth_cap);

    let mut last = enrollment_at(&p, 0);
    for day in 1..400 {
        let value = enrollment_at(&p, day);
        assert!(value >= last);
        assert!(value <= p.base + p.growth_cap);
        last = value;
    }
}

#[test]
fn test_mid_semester_dip_window() {
    let p = RetentionPolicy::default();
    assert_eq!(retention_at(&p, 75), p.base + p.mid_semester_dip);
    assert_eq!(retention_at(&p, 100), p.base);
    assert_eq!(retention_at(&p, 59), p.base);
    assert_eq!(retention_at(&p, 60), p.base + p.mid_semester_dip);
    assert_eq!(retention_at(&p, 90), p.base + p.mid_semester_dip);
    assert_eq!(retention_at(&p, 91), p.base);
    assert_eq!(retention_at(&p, -75), p.base);
}

#[test]
fn test_dip_reported_in_snapshot() {
    let policy = policy();
    let generator = MetricsGenerator::new(&policy);

    let inside = generator.compute_for_days(75, &FilterState::new());
    assert!(inside.retention.mid_semester_dip_active);
    assert_eq!(
        inside.retention.current,
        policy.retention.base + policy.retention.mid_semester_dip
    );
    assert_eq!(inside.retention.change, ChangeType::Decrease);

    let after = generator.compute_for_days(100, &FilterState::new());
    assert!(!after.retention.mid_semester_dip_active);
    assert_eq!(after.retention.current, policy.retention.base);
}

#[test]
fn test_at_risk_decreases_to_floor() {
    let p = RetentionPolicy::default();
    assert_eq!(at_risk_at(&p, 0), 420);
    assert_eq!(at_risk_at(&p, 40), 360);
    assert_eq!(at_risk_at(&p, 1_000), p.at_risk_floor as u32);

    let mut last = at_risk_at(&p, 0);
    for day in 1..300 {
        let value = at_risk_at(&p, day);
        assert!(value <= last);
        last = value;
    }
}

#[test]
fn test_performance_curves() {
    let p = PerformancePolicy::default();
    assert!(gpa_at(&p, 100) > gpa_at(&p, 10));
    assert_eq!(gpa_at(&p, 1_000_000), p.gpa_ceiling);
    assert!(completion_at(&p, 100) > completion_at(&p, 10));
    assert_eq!(completion_at(&p, 1_000_000), p.completion_ceiling);

    for day in 0..500 {
        let s = satisfaction_at(&p, day);
        assert!(s <= p.satisfaction_base + p.satisfaction_amplitude + 1e-12);
        assert!(s >= p.satisfaction_base - p.satisfaction_amplitude - 1e-12);
    }
}

#[test]
fn test_time_range_sets_lookback() {
    let policy = policy();
    let generator = MetricsGenerator::new(&policy);

    let term = generator.compute_for_days(40, &filters(&[("timeRange", "current-term")]));
    assert_eq!(term.enrollment.previous, enrollment_at(&policy.enrollment, 10));

    let year = generator.compute_for_days(40, &filters(&[("timeRange", "academic-year")]));
    assert_eq!(year.enrollment.previous, policy.enrollment.base);
    assert!(year.enrollment.growth_rate > term.enrollment.growth_rate);
}

#[test]
fn test_unknown_time_range_uses_default() {
    let policy = policy();
    let generator = MetricsGenerator::new(&policy);

    let unknown = generator.compute_for_days(40, &filters(&[("timeRange", "decade")]));
    let default = generator.compute_for_days(40, &FilterState::new());
    assert_eq!(unknown.time_range, TimeRange::CurrentTerm);
    assert_eq!(unknown, default);
}

#[test]
fn test_other_filter_keys_do_not_change_numbers() {
    let policy = policy();
    let generator = MetricsGenerator::new(&policy);

    let plain = generator.compute_for_days(40, &FilterState::new());
    let noisy = generator.compute_for_days(
        40,
        &filters(&[("demographics", "graduate"), ("favouriteColour", "teal")]),
    );
    assert_eq!(plain, noisy);
}

#[test]
fn test_enrollment_series() {
    let policy = policy();
    let generator = MetricsGenerator::new(&policy);
    let now = policy.anchor + Duration::days(100);

    assert!(generator.enrollment_series(now, 0).is_empty());

    let one = generator.enrollment_series(now, 1);
    assert_eq!(one, vec![SeriesPoint { day: 100, value: enrollment_at(&policy.enrollment, 100) }]);

    let series = generator.enrollment_series(now, 5);
    let days: Vec<i64> = series.iter().map(|p| p.day).collect();
    assert_eq!(days, vec![0, 25, 50, 75, 100]);
    assert_eq!(series[0].value, policy.enrollment.base);

    let before = generator.enrollment_series(policy.anchor - Duration::days(3), 3);
    assert!(before.iter().all(|p| p.day == 0 && p.value == policy.enrollment.base));
}

#[test]
fn test_cards_follow_status_filter() {
    let policy = policy();
    let generator = MetricsGenerator::new(&policy);
    let snapshot = generator.compute_for_days(75, &FilterState::new());

    let all = snapshot.cards(&policy.status, &FilterState::new(), DomainType::Retention);
    assert_eq!(all.len(), 10);

    let attention = snapshot.cards(
        &policy.status,
        &filters(&[("status", "needs-attention")]),
        DomainType::Retention,
    );
    assert!(!attention.is_empty());
    assert!(attention.iter().all(|m| m.status == MetricStatus::NeedsAttention));

    let retention = all.iter().find(|m| m.id.as_str() == "retention-rate").unwrap();
    assert_eq!(retention.target, Some(policy.retention.target));
}

#[test]
fn test_cards_ignore_status_outside_analytics() {
    let policy = policy();
    let generator = MetricsGenerator::new(&policy);
    let snapshot = generator.compute_for_days(75, &FilterState::new());

    let dashboard = filters(&[("status", "success")]);
    assert_eq!(snapshot.cards(&policy.status, &dashboard, DomainType::Dashboard).len(), 10);
    assert!(snapshot.cards(&policy.status, &dashboard, DomainType::Enrollment).is_empty());

    let surveys = filters(&[("status", "needs-attention")]);
    assert_eq!(snapshot.cards(&policy.status, &surveys, DomainType::Surveys).len(), 10);
}
