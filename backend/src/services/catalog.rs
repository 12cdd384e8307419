//! Static filter option catalog, one [`FilterConfig`] per domain.
//!
//! This is the single source of truth for legal filter values; views look
//! their dimensions up here instead of declaring literal option lists.

use crate::models::{DomainType, FilterConfig, FilterDimension, FilterOption};

const DATE_RANGES: [FilterOption; 5] = [
    FilterOption::new("all", "All time"),
    FilterOption::new("7d", "Last 7 days"),
    FilterOption::new("30d", "Last 30 days"),
    FilterOption::new("90d", "Last 90 days"),
    FilterOption::new("1y", "Last year"),
];

const SYNC_STATUS: [FilterOption; 4] = [
    FilterOption::new("all", "All statuses"),
    FilterOption::new("success", "Success"),
    FilterOption::new("error", "Error"),
    FilterOption::new("pending", "Pending"),
];

const METRIC_TYPES: [FilterOption; 5] = [
    FilterOption::new("all", "All metrics"),
    FilterOption::new("sync", "Data sync"),
    FilterOption::new("api", "API calls"),
    FilterOption::new("export", "Exports"),
    FilterOption::new("webhook", "Webhooks"),
];

const SURVEY_STATUS: [FilterOption; 5] = [
    FilterOption::new("all", "All surveys"),
    FilterOption::with_count("active", "Active", 12),
    FilterOption::with_count("draft", "Draft", 5),
    FilterOption::with_count("closed", "Closed", 23),
    FilterOption::with_count("archived", "Archived", 41),
];

const SURVEY_TYPES: [FilterOption; 5] = [
    FilterOption::new("all", "All types"),
    FilterOption::with_count("course-evaluation", "Course evaluation", 38),
    FilterOption::with_count("student-satisfaction", "Student satisfaction", 17),
    FilterOption::with_count("employee-engagement", "Employee engagement", 14),
    FilterOption::with_count("alumni", "Alumni", 12),
];

const RESPONSE_STATUS: [FilterOption; 4] = [
    FilterOption::new("all", "All responses"),
    FilterOption::new("complete", "Complete"),
    FilterOption::new("partial", "Partial"),
    FilterOption::new("abandoned", "Abandoned"),
];

const RESPONSE_PROGRESS: [FilterOption; 4] = [
    FilterOption::new("all", "Any progress"),
    FilterOption::new("submitted", "Submitted"),
    FilterOption::new("in-progress", "In progress"),
    FilterOption::new("not-started", "Not started"),
];

const DEMOGRAPHICS: [FilterOption; 6] = [
    FilterOption::new("all", "Everyone"),
    FilterOption::new("undergraduate", "Undergraduate"),
    FilterOption::new("graduate", "Graduate"),
    FilterOption::new("international", "International"),
    FilterOption::new("first-generation", "First generation"),
    FilterOption::new("faculty-staff", "Faculty & staff"),
];

const API_STATUS: [FilterOption; 4] = [
    FilterOption::new("all", "All responses"),
    FilterOption::new("2xx", "Success (2xx)"),
    FilterOption::new("4xx", "Client error (4xx)"),
    FilterOption::new("5xx", "Server error (5xx)"),
];

const HTTP_METHODS: [FilterOption; 5] = [
    FilterOption::new("all", "All methods"),
    FilterOption::new("GET", "GET"),
    FilterOption::new("POST", "POST"),
    FilterOption::new("PUT", "PUT"),
    FilterOption::new("DELETE", "DELETE"),
];

const ANALYTICS_STATUS: [FilterOption; 4] = [
    FilterOption::new("all", "All statuses"),
    FilterOption::new("exceeds-target", "Exceeds target"),
    FilterOption::new("on-track", "On track"),
    FilterOption::new("needs-attention", "Needs attention"),
];

const TIME_RANGES: [FilterOption; 4] = [
    FilterOption::new("current-term", "Current term"),
    FilterOption::new("previous-term", "Previous term"),
    FilterOption::new("academic-year", "Academic year"),
    FilterOption::new("five-year", "Five-year view"),
];

const GRANULARITY: [FilterOption; 4] = [
    FilterOption::new("daily", "Daily"),
    FilterOption::new("weekly", "Weekly"),
    FilterOption::new("monthly", "Monthly"),
    FilterOption::new("term", "By term"),
];

const COMPARISON: [FilterOption; 4] = [
    FilterOption::new("none", "No comparison"),
    FilterOption::new("previous-term", "Previous term"),
    FilterOption::new("previous-year", "Previous year"),
    FilterOption::new("peer", "Peer institutions"),
];

const PERFORMANCE_BANDS: [FilterOption; 4] = [
    FilterOption::new("all", "All students"),
    FilterOption::new("high", "High performers"),
    FilterOption::new("medium", "Meeting expectations"),
    FilterOption::new("at-risk", "At risk"),
];

const ENROLLMENT_METRICS: [FilterOption; 4] = [
    FilterOption::new("all", "All measures"),
    FilterOption::new("headcount", "Headcount"),
    FilterOption::new("fte", "Full-time equivalent"),
    FilterOption::new("credit-hours", "Credit hours"),
];

const PERFORMANCE_METRICS: [FilterOption; 4] = [
    FilterOption::new("all", "All measures"),
    FilterOption::new("gpa", "Average GPA"),
    FilterOption::new("completion", "Course completion"),
    FilterOption::new("satisfaction", "Satisfaction"),
];

const STRATEGIC_METRICS: [FilterOption; 4] = [
    FilterOption::new("all", "All measures"),
    FilterOption::new("market-share", "Market share"),
    FilterOption::new("growth", "Projected growth"),
    FilterOption::new("risk", "Risk register"),
];

const fn dim(
    key: &'static str,
    list_name: &'static str,
    label: &'static str,
    default_value: &'static str,
    options: &'static [FilterOption],
) -> FilterDimension {
    FilterDimension {
        key,
        list_name,
        label,
        default_value,
        options,
    }
}

const DATE_RANGE_DIM: FilterDimension = dim("dateRange", "dateRanges", "Date range", "all", &DATE_RANGES);
const TIME_RANGE_DIM: FilterDimension =
    dim("timeRange", "timeRanges", "Time range", "current-term", &TIME_RANGES);
const DEMOGRAPHICS_DIM: FilterDimension =
    dim("demographics", "demographics", "Demographics", "all", &DEMOGRAPHICS);
const COMPARISON_DIM: FilterDimension =
    dim("comparison", "comparisons", "Compare with", "none", &COMPARISON);
const ANALYTICS_STATUS_DIM: FilterDimension =
    dim("status", "statusOptions", "Status", "all", &ANALYTICS_STATUS);

pub static DASHBOARD: FilterConfig = FilterConfig {
    domain: DomainType::Dashboard,
    dimensions: &[
        DATE_RANGE_DIM,
        dim("status", "statusOptions", "Status", "all", &SYNC_STATUS),
        dim("metricType", "metricTypes", "Metric type", "all", &METRIC_TYPES),
    ],
};

pub static SURVEYS: FilterConfig = FilterConfig {
    domain: DomainType::Surveys,
    dimensions: &[
        DATE_RANGE_DIM,
        dim("status", "statusOptions", "Status", "all", &SURVEY_STATUS),
        dim("surveyType", "surveyTypes", "Survey type", "all", &SURVEY_TYPES),
    ],
};

pub static RESPONSES: FilterConfig = FilterConfig {
    domain: DomainType::Responses,
    dimensions: &[
        DATE_RANGE_DIM,
        dim("status", "statusOptions", "Status", "all", &RESPONSE_STATUS),
        dim(
            "responseStatus",
            "responseStatuses",
            "Progress",
            "all",
            &RESPONSE_PROGRESS,
        ),
        DEMOGRAPHICS_DIM,
    ],
};

pub static API_LOGS: FilterConfig = FilterConfig {
    domain: DomainType::ApiLogs,
    dimensions: &[
        DATE_RANGE_DIM,
        dim("status", "statusOptions", "Response", "all", &API_STATUS),
        dim("method", "methods", "Method", "all", &HTTP_METHODS),
        dim("metricType", "metricTypes", "Metric type", "all", &METRIC_TYPES),
    ],
};

pub static ENROLLMENT: FilterConfig = FilterConfig {
    domain: DomainType::Enrollment,
    dimensions: &[
        DATE_RANGE_DIM,
        ANALYTICS_STATUS_DIM,
        TIME_RANGE_DIM,
        dim("granularity", "granularities", "Granularity", "weekly", &GRANULARITY),
        COMPARISON_DIM,
        DEMOGRAPHICS_DIM,
        dim("metrics", "metrics", "Measure", "all", &ENROLLMENT_METRICS),
    ],
};

pub static RETENTION: FilterConfig = FilterConfig {
    domain: DomainType::Retention,
    dimensions: &[
        DATE_RANGE_DIM,
        ANALYTICS_STATUS_DIM,
        TIME_RANGE_DIM,
        dim("performance", "performanceBands", "Performance", "all", &PERFORMANCE_BANDS),
        DEMOGRAPHICS_DIM,
        COMPARISON_DIM,
    ],
};

pub static PERFORMANCE: FilterConfig = FilterConfig {
    domain: DomainType::Performance,
    dimensions: &[
        DATE_RANGE_DIM,
        ANALYTICS_STATUS_DIM,
        TIME_RANGE_DIM,
        dim("performance", "performanceBands", "Performance", "all", &PERFORMANCE_BANDS),
        dim("metrics", "metrics", "Measure", "all", &PERFORMANCE_METRICS),
        dim("granularity", "granularities", "Granularity", "monthly", &GRANULARITY),
    ],
};

pub static STRATEGIC: FilterConfig = FilterConfig {
    domain: DomainType::Strategic,
    dimensions: &[
        DATE_RANGE_DIM,
        ANALYTICS_STATUS_DIM,
        TIME_RANGE_DIM,
        COMPARISON_DIM,
        dim("metrics", "metrics", "Measure", "all", &STRATEGIC_METRICS),
    ],
};

/// Catalog for a domain.
pub fn get_filter_catalog(domain: DomainType) -> &'static FilterConfig {
    match domain {
        DomainType::Dashboard => &DASHBOARD,
        DomainType::Surveys => &SURVEYS,
        DomainType::Responses => &RESPONSES,
        DomainType::ApiLogs => &API_LOGS,
        DomainType::Enrollment => &ENROLLMENT,
        DomainType::Retention => &RETENTION,
        DomainType::Performance => &PERFORMANCE,
        DomainType::Strategic => &STRATEGIC,
    }
}

/// Catalog for a domain id string; unknown ids get the dashboard catalog.
pub fn catalog_for_id(domain_id: &str) -> &'static FilterConfig {
    match domain_id.parse::<DomainType>() {
        Ok(domain) => get_filter_catalog(domain),
        Err(e) => {
            log::debug!("{}, falling back to dashboard catalog", e);
            &DASHBOARD
        }
    }
}

/// Whether `value` is a legal selection for `key` in `domain`.
pub fn validate_selection(domain: DomainType, key: &str, value: &str) -> bool {
    get_filter_catalog(domain).accepts(key, value)
}
