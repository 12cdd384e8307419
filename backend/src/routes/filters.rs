use serde::Serialize;

use crate::models::{DomainType, FilterConfig, FilterState};
use crate::services::active_filters::{self, FilterChip};
use crate::services::{catalog, reconciler};

// =========================================================
// Filter reconciliation types + routes
// =========================================================

/// What a filter bar needs after every state change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterBarView {
    pub domain: DomainType,
    pub state: FilterState,
    pub chips: Vec<FilterChip>,
    pub active_count: usize,
    pub show_clear_all: bool,
}

/// Route function name constant for applying a filter
pub const APPLY_FILTER: &str = "apply_filter";

/// Route function name constant for removing a filter
pub const REMOVE_FILTER: &str = "remove_filter";

/// Route function name constant for clearing every filter
pub const CLEAR_ALL: &str = "clear_all";

/// Route function name constant for the option catalog
pub const GET_FILTER_CATALOG: &str = "get_filter_catalog";

/// Route function name constant for the active-filter projection
pub const PROJECT_ACTIVE: &str = "project_active";

pub fn apply_filter(state: &FilterState, domain: DomainType, key: &str, value: &str) -> FilterState {
    reconciler::apply_filter(state, domain, key, value)
}

pub fn remove_filter(state: &FilterState, key: &str) -> FilterState {
    reconciler::remove_filter(state, key)
}

pub fn clear_all(state: &FilterState) -> FilterState {
    reconciler::clear_all(state)
}

pub fn get_filter_catalog(domain: DomainType) -> &'static FilterConfig {
    catalog::get_filter_catalog(domain)
}

/// Active `(key, value)` pairs as owned strings.
pub fn project_active(state: &FilterState) -> Vec<(String, String)> {
    active_filters::project_active(state)
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Chips, badge count and clear-all visibility for a domain's filter bar.
///
/// Selections at their catalog default are left out of all three.
pub fn filter_bar_view(state: &FilterState, domain: DomainType, clear_all_threshold: usize) -> FilterBarView {
    let config = catalog::get_filter_catalog(domain);
    FilterBarView {
        domain,
        state: state.clone(),
        chips: active_filters::label_active(state, config),
        active_count: active_filters::visible_count(state, config),
        show_clear_all: active_filters::show_clear_all_for(state, config, clear_all_threshold),
    }
}
