//! Service layer for filter reconciliation and metric computation.
//!
//! Services hold the pure computations behind the route entry points. Apart
//! from [`live_feed::sample_incremental_update`], nothing here reads the
//! clock or a randomness source.

pub mod active_filters;
pub mod catalog;
pub mod formulas;
pub mod kpi;
pub mod live_feed;
pub mod metrics_generator;
pub mod reconciler;
pub mod view_filter;

pub use active_filters::{
    active_count, label_active, project_active, project_visible, show_clear_all, show_clear_all_for,
    visible_count, FilterChip,
};
pub use catalog::{catalog_for_id, get_filter_catalog, validate_selection};
pub use kpi::{join_reference, score_pillar, score_pillars};
pub use live_feed::{sample_incremental_update, LiveFeed};
pub use metrics_generator::MetricsGenerator;
pub use reconciler::{apply_filter, clear_all, remove_filter, reset_to_defaults, set_filter};
pub use view_filter::{filter_records, Filterable};
