//! Apply active filters to caller-owned records to build filtered view-models.

use chrono::{DateTime, Utc};

use crate::models::{DateRange, FilterState, Metric};
use crate::services::active_filters::project_active;

/// Key whose value selects a time window rather than an attribute match.
pub const DATE_RANGE_KEY: &str = "dateRange";

/// A record a view can narrow with filter state.
pub trait Filterable {
    /// Value of the attribute addressed by a filter key, if the record has it.
    fn attribute(&self, key: &str) -> Option<&str>;

    /// When the record happened, for `dateRange` filtering.
    fn recorded_at(&self) -> Option<DateTime<Utc>> {
        None
    }
}

/// Whether `record` passes every active filter in `state`.
///
/// Filters on keys the record doesn't expose are ignored, as is a date window
/// for a record without a timestamp.
pub fn matches<T: Filterable + ?Sized>(record: &T, state: &FilterState, now: DateTime<Utc>) -> bool {
    let in_window = match (state.get(DATE_RANGE_KEY), record.recorded_at()) {
        (Some(value), Some(at)) => match DateRange::parse(value).window() {
            Some(window) => now
                .checked_sub_signed(window)
                .map(|start| at >= start)
                .unwrap_or(true),
            None => true,
        },
        _ => true,
    };
    in_window && matches_attributes(record, state)
}

/// Like [`matches`] but without the date window, for records with no time axis.
pub fn matches_attributes<T: Filterable + ?Sized>(record: &T, state: &FilterState) -> bool {
    project_active(state)
        .into_iter()
        .filter(|(key, _)| *key != DATE_RANGE_KEY)
        .all(|(key, value)| record.attribute(key).map(|a| a == value).unwrap_or(true))
}

impl Filterable for Metric {
    fn attribute(&self, key: &str) -> Option<&str> {
        match key {
            "status" => Some(self.status.as_str()),
            "trend" => Some(self.trend.as_str()),
            _ => None,
        }
    }
}

/// Records that pass every active filter, in their original order.
pub fn filter_records<'a, T: Filterable>(
    records: &'a [T],
    state: &FilterState,
    now: DateTime<Utc>,
) -> Vec<&'a T> {
    records.iter().filter(|r| matches(*r, state, now)).collect()
}
