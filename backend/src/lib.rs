//! # Portal Metrics
//!
//! Filter reconciliation and metric computation core for an institutional
//! reporting portal.
//!
//! Views hand this crate a filter state and get back either a new filter
//! state, a filtered view-model, or a computed metrics object. All data is
//! synthetic: metrics are deterministic functions of the time elapsed since a
//! configured anchor and of the active filters.
//!
//! ## Features
//!
//! - **Filter State**: Insertion-ordered selections with set / remove / clear
//! - **Catalogs**: Static option tables per dashboard and analytics domain
//! - **Active Filters**: Chip projection, badge counts and clear-all helpers
//! - **Metrics**: Time-anchored enrollment, retention, performance and strategic groups
//! - **KPI Pillars**: Capped pillar scoring and peer/national comparison
//! - **Live Feed**: The single randomized entry point, for dashboard counters
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Data Transfer Objects (DTOs) handed to views
//! - [`config`]: TOML policy configuration (curves, dip window, status bands)
//! - [`models`]: Core filter, metric and time types
//! - [`services`]: Reconciliation, projection and metric computation
//! - [`routes`]: Route-specific data types and default-policy entry points

pub mod api;
pub mod config;
pub mod models;
pub mod routes;
pub mod services;
