use serde::{Deserialize, Serialize};

use crate::config::ScoringPolicy;
use crate::models::{KpiPillar, PillarId};

// =========================================================
// KPI pillar types + route
// =========================================================

/// Peer and national averages for one pillar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceAverages {
    pub pillar_id: &'static str,
    pub peer_average: f64,
    pub national_average: f64,
}

/// A computed pillar score next to its reference averages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub pillar_id: PillarId,
    pub pillar_name: String,
    pub score: u8,
    pub peer_average: f64,
    pub national_average: f64,
}

/// Route function name constant for pillars
pub const COMPUTE_PILLARS: &str = "compute_pillars";

/// Route function name constant for the reference comparison table
pub const COMPARE_TO_REFERENCE: &str = "compare_to_reference";

/// Score the built-in pillar catalog under the default scoring policy.
pub fn compute_pillars() -> Vec<KpiPillar> {
    compute_pillars_with(&ScoringPolicy::default())
}

pub fn compute_pillars_with(scoring: &ScoringPolicy) -> Vec<KpiPillar> {
    crate::services::kpi::score_pillars(crate::services::kpi::PILLAR_CATALOG, scoring)
}

/// Built-in pillars joined with the static peer/national averages.
pub fn compare_to_reference() -> Vec<ComparisonRow> {
    crate::services::kpi::join_reference(
        &compute_pillars(),
        crate::services::kpi::REFERENCE_AVERAGES,
    )
}
