//! Filter state reconciliation.
//!
//! Every filter control in the portal goes through these three functions.
//! They never mutate their input, never fail, and repeat idempotently.
//! No validation against the catalog happens here: unknown keys are kept and
//! left for consumers to ignore.

use crate::models::{DomainType, FilterState};
use crate::services::catalog;

/// Copy of `state` with `key` set to `value`.
pub fn set_filter(state: &FilterState, key: &str, value: &str) -> FilterState {
    let mut next = state.clone();
    next.insert(key, value);
    next
}

/// Copy of `state` without `key`.
pub fn remove_filter(state: &FilterState, key: &str) -> FilterState {
    let mut next = state.clone();
    next.remove(key);
    next
}

/// Always the empty state.
pub fn clear_all(_state: &FilterState) -> FilterState {
    FilterState::new()
}

/// [`set_filter`] addressed through a domain's catalog.
///
/// Selections the catalog does not know are still applied; they are only
/// logged so a mistyped option list shows up during development.
pub fn apply_filter(state: &FilterState, domain: DomainType, key: &str, value: &str) -> FilterState {
    if !catalog::validate_selection(domain, key, value) {
        log::debug!(
            "filter {}={} is not in the {} catalog, applying anyway",
            key,
            value,
            domain
        );
    }
    set_filter(state, key, value)
}

/// Reset a view to its catalog defaults.
pub fn reset_to_defaults(domain: DomainType) -> FilterState {
    catalog::get_filter_catalog(domain).default_state()
}

#[cfg(test)]
#[path = "reconciler_tests.rs"]
mod reconciler_tests;
