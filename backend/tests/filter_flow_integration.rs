//! End-to-end filter flows: a view applies, removes and clears filters, then
//! renders chips and metric cards from the resulting state.

use chrono::{Duration, TimeZone, Utc};

use portal_metrics::api::{DomainType, FilterState, MetricStatus};
use portal_metrics::config::PolicyConfig;
use portal_metrics::routes::{filters, kpi, metrics};
use portal_metrics::services::view_filter::{filter_records, Filterable};
use portal_metrics::services::{reconciler, MetricsGenerator};

#[test]
fn test_dashboard_apply_remove_clear() {
    let state = FilterState::new();
    let state = filters::apply_filter(&state, DomainType::Dashboard, "dateRange", "30d");
    let state = filters::apply_filter(&state, DomainType::Dashboard, "metricType", "sync");

    assert_eq!(
        filters::project_active(&state),
        vec![
            ("dateRange".to_string(), "30d".to_string()),
            ("metricType".to_string(), "sync".to_string()),
        ]
    );

    let state = filters::remove_filter(&state, "metricType");
    assert_eq!(
        filters::project_active(&state),
        vec![("dateRange".to_string(), "30d".to_string())]
    );

    let state = filters::clear_all(&state);
    assert!(filters::project_active(&state).is_empty());
    assert!(state.is_empty());
}

#[test]
fn test_sentinel_selection_stays_in_state_but_not_in_chips() {
    let state = filters::apply_filter(&FilterState::new(), DomainType::Surveys, "status", "all");
    let state = filters::apply_filter(&state, DomainType::Surveys, "dateRange", "7d");

    assert_eq!(state.get("status"), Some("all"));
    let view = filters::filter_bar_view(&state, DomainType::Surveys, 1);
    assert_eq!(view.active_count, 1);
    assert!(!view.show_clear_all);
    assert_eq!(view.chips[0].label, "Last 7 days");
}

#[test]
fn test_reselecting_keeps_chip_position() {
    let state: FilterState = [("dateRange", "7d"), ("status", "active"), ("surveyType", "course")]
        .into_iter()
        .collect();
    let state = filters::apply_filter(&state, DomainType::Surveys, "dateRange", "90d");

    let keys: Vec<String> = filters::project_active(&state)
        .into_iter()
        .map(|(k, _)| k)
        .collect();
    assert_eq!(keys, vec!["dateRange", "status", "surveyType"]);
}

#[test]
fn test_reset_view_has_no_chips() {
    for domain in DomainType::ALL {
        let state = reconciler::reset_to_defaults(domain);
        assert_eq!(state.len(), filters::get_filter_catalog(domain).dimensions.len());

        let view = filters::filter_bar_view(&state, domain, 1);
        assert!(view.chips.is_empty(), "{} reset shows {:?}", domain, view.chips);
        assert_eq!(view.active_count, 0);
        assert!(!view.show_clear_all);
    }
}

#[test]
fn test_moving_off_default_adds_chip() {
    let state = reconciler::reset_to_defaults(DomainType::Enrollment);
    let state = filters::apply_filter(&state, DomainType::Enrollment, "granularity", "daily");

    let view = filters::filter_bar_view(&state, DomainType::Enrollment, 1);
    assert_eq!(view.active_count, 1);
    assert_eq!(view.chips[0].key, "granularity");
    assert_eq!(view.chips[0].label, "Daily");
}

#[test]
fn test_analytics_filters_drive_metrics() {
    let policy = PolicyConfig::default();
    let now = policy.anchor + Duration::days(75);

    let state = filters::apply_filter(&FilterState::new(), DomainType::Retention, "timeRange", "academic-year");
    let state = filters::apply_filter(&state, DomainType::Retention, "status", "needs-attention");

    let snapshot = MetricsGenerator::new(&policy).compute(&state, now);
    assert_eq!(snapshot.days_elapsed, 75);
    assert!(snapshot.retention.mid_semester_dip_active);

    let cards = snapshot.cards(&policy.status, &state, DomainType::Retention);
    assert!(cards.iter().any(|m| m.id.as_str() == "retention-rate"));
    assert!(cards.iter().all(|m| m.status == MetricStatus::NeedsAttention));
}

#[test]
fn test_dashboard_status_keeps_every_card() {
    let policy = PolicyConfig::default();
    let now = policy.anchor + Duration::days(75);

    let state = filters::apply_filter(&FilterState::new(), DomainType::Dashboard, "status", "success");
    let snapshot = MetricsGenerator::new(&policy).compute(&state, now);
    assert_eq!(snapshot.cards(&policy.status, &state, DomainType::Dashboard).len(), 10);
}

#[test]
fn test_compute_metrics_default_policy_matches_generator() {
    let now = Utc.with_ymd_and_hms(2026, 12, 1, 9, 0, 0).unwrap();
    let state: FilterState = [("timeRange", "previous-term")].into_iter().collect();

    let via_route = metrics::compute_metrics(&state, now);
    let policy = PolicyConfig::default();
    let via_generator = MetricsGenerator::new(&policy).compute(&state, now);
    assert_eq!(via_route, via_generator);
}

#[test]
fn test_pillars_and_comparison() {
    let pillars = kpi::compute_pillars();
    assert_eq!(pillars.len(), 5);
    assert!(pillars.iter().all(|p| p.overall_score <= 100));
    assert!(pillars.iter().all(|p| p.metrics.len() == 3));

    let rows = kpi::compare_to_reference();
    assert_eq!(rows.len(), pillars.len());
    assert!(rows.iter().all(|r| r.peer_average > 0.0 && r.national_average > 0.0));
}

struct ApiLog {
    method: &'static str,
    status: &'static str,
    at: chrono::DateTime<Utc>,
}

impl Filterable for ApiLog {
    fn attribute(&self, key: &str) -> Option<&str> {
        match key {
            "method" => Some(self.method),
            "status" => Some(self.status),
            _ => None,
        }
    }

    fn recorded_at(&self) -> Option<chrono::DateTime<Utc>> {
        Some(self.at)
    }
}

#[test]
fn test_api_log_view_model() {
    let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
    let logs = vec![
        ApiLog { method: "GET", status: "success", at: now - Duration::days(1) },
        ApiLog { method: "POST", status: "error", at: now - Duration::days(2) },
        ApiLog { method: "GET", status: "error", at: now - Duration::days(20) },
        ApiLog { method: "GET", status: "success", at: now - Duration::days(3) },
    ];

    let state = filters::apply_filter(&FilterState::new(), DomainType::ApiLogs, "dateRange", "7d");
    let state = filters::apply_filter(&state, DomainType::ApiLogs, "method", "GET");
    let visible = filter_records(&logs, &state, now);
    assert_eq!(visible.len(), 2);
    assert!(visible.iter().all(|l| l.method == "GET" && l.status == "success"));

    let cleared = filters::clear_all(&state);
    assert_eq!(filter_records(&logs, &cleared, now).len(), logs.len());
}
