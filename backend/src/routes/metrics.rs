use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::PolicyConfig;
use crate::models::{ChangeType, FilterState, TimeRange};

// =========================================================
// Time-anchored metrics types + route
// =========================================================

/// Headcount on the capped enrollment curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentMetrics {
    pub current: f64,
    pub previous: f64,
    pub target: f64,
    /// Elapsed-time contribution above the base headcount.
    pub new_admissions: f64,
    pub growth_rate: f64,
    pub target_progress: f64,
    pub change: ChangeType,
}

/// Retention rate and at-risk headcount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetentionMetrics {
    /// Percent.
    pub current: f64,
    pub previous: f64,
    pub target: f64,
    pub at_risk_students: u32,
    pub previous_at_risk_students: u32,
    pub mid_semester_dip_active: bool,
    pub change: ChangeType,
}

/// Academic performance figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub average_gpa: f64,
    pub previous_average_gpa: f64,
    pub gpa_target: f64,
    /// Percent.
    pub completion_rate: f64,
    pub previous_completion_rate: f64,
    pub completion_target: f64,
    /// Out of 5.
    pub satisfaction: f64,
    pub previous_satisfaction: f64,
    pub satisfaction_target: f64,
}

/// Strategic position: categorical facts plus one projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategicMetrics {
    pub market_position: String,
    pub market_share: f64,
    pub projected_growth: f64,
    pub previous_projected_growth: f64,
    pub projected_growth_target: f64,
    pub risks: Vec<String>,
    pub opportunities: Vec<String>,
}

/// The four headline groups for one `(anchor, now, filters)` triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub days_elapsed: i64,
    pub time_range: TimeRange,
    pub enrollment: EnrollmentMetrics,
    pub retention: RetentionMetrics,
    pub performance: PerformanceMetrics,
    pub strategic: StrategicMetrics,
}

/// One sample of a chart series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub day: i64,
    pub value: f64,
}

/// Route function name constant for metrics
pub const COMPUTE_METRICS: &str = "compute_metrics";

/// Route function name constant for the enrollment chart series
pub const GET_ENROLLMENT_SERIES: &str = "get_enrollment_series";

/// Compute the headline metrics under the built-in policy.
pub fn compute_metrics(filters: &FilterState, now: DateTime<Utc>) -> MetricsSnapshot {
    compute_metrics_with(&PolicyConfig::default(), filters, now)
}

/// Compute the headline metrics under an explicit policy.
pub fn compute_metrics_with(
    policy: &PolicyConfig,
    filters: &FilterState,
    now: DateTime<Utc>,
) -> MetricsSnapshot {
    crate::services::metrics_generator::MetricsGenerator::new(policy).compute(filters, now)
}

/// Enrollment curve sampled for a chart, `points` samples from day 0 to today.
pub fn get_enrollment_series(
    policy: &PolicyConfig,
    now: DateTime<Utc>,
    points: usize,
) -> Vec<SeriesPoint> {
    crate::services::metrics_generator::MetricsGenerator::new(policy).enrollment_series(now, points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_route_constants() {
        assert_eq!(COMPUTE_METRICS, "compute_metrics");
        assert_eq!(GET_ENROLLMENT_SERIES, "get_enrollment_series");
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 0, 0, 0).unwrap();
        let snapshot = compute_metrics(&FilterState::new(), now);
        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["timeRange"], "current-term");
        assert!(json["enrollment"]["newAdmissions"].is_number());
        assert!(json["retention"]["atRiskStudents"].is_number());
        assert!(json["strategic"]["risks"].is_array());
    }
}
