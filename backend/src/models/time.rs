use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::filters::{is_sentinel, FilterState};

/// Fixed reference instant (usually the start of the reporting term).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeAnchor(DateTime<Utc>);

impl TimeAnchor {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.0
    }

    /// Whole days from the anchor to `now`, truncated toward zero.
    ///
    /// Negative when the anchor lies in the future.
    pub fn days_elapsed(&self, now: DateTime<Utc>) -> i64 {
        (now - self.0).num_days()
    }
}

impl From<DateTime<Utc>> for TimeAnchor {
    fn from(instant: DateTime<Utc>) -> Self {
        TimeAnchor::new(instant)
    }
}

/// Elapsed days as used by the metric curves: negative spans count as zero.
pub fn clamped_days(days: i64) -> f64 {
    days.max(0) as f64
}

/// Window selected by the `dateRange` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateRange {
    #[serde(rename = "7d")]
    Last7Days,
    #[serde(rename = "30d")]
    Last30Days,
    #[serde(rename = "90d")]
    Last90Days,
    #[serde(rename = "1y")]
    LastYear,
    #[serde(rename = "all")]
    AllTime,
}

impl DateRange {
    /// Resolve a filter value. Sentinels and unknown values mean no window.
    pub fn parse(value: &str) -> Self {
        match value {
            "7d" => DateRange::Last7Days,
            "30d" => DateRange::Last30Days,
            "90d" => DateRange::Last90Days,
            "1y" => DateRange::LastYear,
            other => {
                if !is_sentinel(other) {
                    log::debug!("unknown dateRange '{}', not restricting by date", other);
                }
                DateRange::AllTime
            }
        }
    }

    pub fn window(&self) -> Option<Duration> {
        match self {
            DateRange::Last7Days => Some(Duration::days(7)),
            DateRange::Last30Days => Some(Duration::days(30)),
            DateRange::Last90Days => Some(Duration::days(90)),
            DateRange::LastYear => Some(Duration::days(365)),
            DateRange::AllTime => None,
        }
    }
}

/// Reporting horizon selected by the `timeRange` filter of analytics views.
///
/// It picks how far back the "previous" value of each metric is sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeRange {
    #[default]
    CurrentTerm,
    PreviousTerm,
    AcademicYear,
    FiveYear,
}

impl TimeRange {
    pub const FILTER_KEY: &'static str = "timeRange";

    /// Resolve a filter value; anything unrecognised is `current-term`.
    pub fn parse(value: &str) -> Self {
        match value {
            "current-term" => TimeRange::CurrentTerm,
            "previous-term" => TimeRange::PreviousTerm,
            "academic-year" => TimeRange::AcademicYear,
            "five-year" => TimeRange::FiveYear,
            other => {
                if !is_sentinel(other) {
                    log::debug!("unknown timeRange '{}', using current-term", other);
                }
                TimeRange::default()
            }
        }
    }

    pub fn from_filters(filters: &FilterState) -> Self {
        filters
            .get(Self::FILTER_KEY)
            .map(Self::parse)
            .unwrap_or_default()
    }

    /// Days between a metric's current and previous sample.
    pub fn lookback_days(&self) -> i64 {
        match self {
            TimeRange::CurrentTerm => 30,
            TimeRange::PreviousTerm => 120,
            TimeRange::AcademicYear => 365,
            TimeRange::FiveYear => 1825,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::CurrentTerm => "current-term",
            TimeRange::PreviousTerm => "previous-term",
            TimeRange::AcademicYear => "academic-year",
            TimeRange::FiveYear => "five-year",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
