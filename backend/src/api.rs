//! Public API surface for the portal core.
//!
//! This file consolidates the DTO types handed to the views.
//! All types derive Serialize for JSON output.

pub use crate::models::{
    ChangeType, DomainType, FilterConfig, FilterDimension, FilterOption, FilterState, KpiPillar,
    Metric, MetricFamily, MetricId, MetricStatus, PillarId, TimeRange, Trend,
};
pub use crate::routes::filters::FilterBarView;
pub use crate::routes::kpi::ComparisonRow;
pub use crate::routes::kpi::ReferenceAverages;
pub use crate::routes::live::LiveCounters;
pub use crate::routes::metrics::EnrollmentMetrics;
pub use crate::routes::metrics::MetricsSnapshot;
pub use crate::routes::metrics::PerformanceMetrics;
pub use crate::routes::metrics::RetentionMetrics;
pub use crate::routes::metrics::SeriesPoint;
pub use crate::routes::metrics::StrategicMetrics;
pub use crate::services::active_filters::FilterChip;

#[cfg(test)]
#[path = "api_tests.rs"]
mod api_tests;
