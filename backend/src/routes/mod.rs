pub mod filters;
pub mod kpi;
pub mod live;
pub mod metrics;
