use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =========================================================
// Live dashboard counter types + route
// =========================================================

/// Running counters shown on the live dashboard header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveCounters {
    pub total_surveys: u32,
    pub active_surveys: u32,
    pub total_responses: u64,
    pub api_requests: u64,
    pub failed_requests: u64,
    /// Percent of `api_requests` that failed.
    pub error_rate: f64,
    pub last_updated: DateTime<Utc>,
}

impl LiveCounters {
    /// All-zero counters stamped at `at`.
    pub fn starting_at(at: DateTime<Utc>) -> Self {
        Self {
            total_surveys: 0,
            active_surveys: 0,
            total_responses: 0,
            api_requests: 0,
            failed_requests: 0,
            error_rate: 0.0,
            last_updated: at,
        }
    }
}

/// Route function name constant for the live feed
pub const SAMPLE_INCREMENTAL_UPDATE: &str = "sample_incremental_update";

/// Next live snapshot after `prev`, sampled from the wall clock and thread RNG.
pub fn sample_incremental_update(prev: &LiveCounters) -> LiveCounters {
    crate::services::live_feed::sample_incremental_update(prev)
}
