//! Projection of raw filter state onto the filters that actually filter.
//!
//! Order is the insertion order of the state, so chips never jump around
//! between renders.

use serde::Serialize;

use crate::models::{is_sentinel, FilterConfig, FilterState};

/// Active `(key, value)` pairs: sentinel values (`all`, empty, `none`) are dropped.
pub fn project_active(state: &FilterState) -> Vec<(&str, &str)> {
    state.iter().filter(|(_, value)| !is_sentinel(value)).collect()
}

/// Number shown on the "filters" badge.
pub fn active_count(state: &FilterState) -> usize {
    state.iter().filter(|(_, value)| !is_sentinel(value)).count()
}

/// Whether a "clear all" control should be rendered.
///
/// Views differ on when they show it, so the threshold is theirs to pass:
/// the control is shown when more than `threshold` filters are active.
pub fn show_clear_all(state: &FilterState, threshold: usize) -> bool {
    active_count(state) > threshold
}

/// Pairs a filter bar should render for `config`'s domain.
///
/// Drops what [`project_active`] drops, plus selections still at their
/// dimension's default value: a freshly reset view has nothing to remove.
pub fn project_visible<'a>(state: &'a FilterState, config: &FilterConfig) -> Vec<(&'a str, &'a str)> {
    project_active(state)
        .into_iter()
        .filter(|(key, value)| {
            config
                .dimension(key)
                .map(|d| d.default_value != *value)
                .unwrap_or(true)
        })
        .collect()
}

/// Badge count for a domain's filter bar; defaults are not counted.
pub fn visible_count(state: &FilterState, config: &FilterConfig) -> usize {
    project_visible(state, config).len()
}

/// [`show_clear_all`] for a domain's filter bar; defaults are not counted.
pub fn show_clear_all_for(state: &FilterState, config: &FilterConfig, threshold: usize) -> bool {
    visible_count(state, config) > threshold
}

/// A removable chip as rendered by filter bars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterChip {
    pub key: String,
    pub value: String,
    /// Dimension label, or the raw key for dimensions the catalog lacks.
    pub dimension_label: String,
    /// Option label, or the raw value for values the catalog lacks.
    pub label: String,
}

/// Resolve each visible filter against `config` for display.
pub fn label_active(state: &FilterState, config: &FilterConfig) -> Vec<FilterChip> {
    project_visible(state, config)
        .into_iter()
        .map(|(key, value)| {
            let dimension = config.dimension(key);
            let label = dimension
                .and_then(|d| d.option(value))
                .map(|o| o.label)
                .unwrap_or(value);
            FilterChip {
                key: key.to_string(),
                value: value.to_string(),
                dimension_label: dimension.map(|d| d.label).unwrap_or(key).to_string(),
                label: label.to_string(),
            }
        })
        .collect()
}
