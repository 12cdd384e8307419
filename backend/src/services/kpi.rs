//! KPI pillar scoring.
//!
//! A pillar's score is the rounded mean of its metrics' normalized values,
//! where each metric contributes `min(value / target, cap_multiple) * 100`.
//! The cap keeps one overshooting metric from carrying a pillar on its own.

use crate::api::{ComparisonRow, ReferenceAverages};
use crate::config::ScoringPolicy;
use crate::models::{KpiPillar, Metric, PillarId, StatusPolicy, Trend};
use crate::services::formulas::{change_type, mean, normalized_score};

/// Static definition of one pillar metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PillarMetricDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub value: f64,
    pub previous: f64,
    pub target: f64,
    pub unit: &'static str,
    pub description: &'static str,
}

/// Static definition of a pillar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PillarDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub metrics: &'static [PillarMetricDefinition],
}

const fn metric(
    id: &'static str,
    name: &'static str,
    value: f64,
    previous: f64,
    target: f64,
    unit: &'static str,
    description: &'static str,
) -> PillarMetricDefinition {
    PillarMetricDefinition {
        id,
        name,
        value,
        previous,
        target,
        unit,
        description,
    }
}

pub static PILLAR_CATALOG: &[PillarDefinition] = &[
    PillarDefinition {
        id: "academic-excellence",
        name: "Academic Excellence",
        metrics: &[
            metric("graduation-rate", "Six-year graduation rate", 78.0, 76.5, 80.0, "%", "Bachelor's cohort completing within six years"),
            metric("research-publications", "Peer-reviewed publications", 412.0, 389.0, 400.0, "papers", "Publications indexed this academic year"),
            metric("accredited-programs", "Accredited programs", 96.0, 96.0, 100.0, "%", "Programs holding current accreditation"),
        ],
    },
    PillarDefinition {
        id: "student-success",
        name: "Student Success",
        metrics: &[
            metric("first-year-retention", "First-year retention", 87.5, 88.1, 90.0, "%", "Freshmen returning for a second year"),
            metric("graduate-employment", "Graduate employment", 91.0, 89.0, 90.0, "%", "Graduates employed or in further study after six months"),
            metric("student-satisfaction", "Student satisfaction", 4.1, 4.0, 4.5, "score", "Average satisfaction rating out of 5"),
        ],
    },
    PillarDefinition {
        id: "research-innovation",
        name: "Research & Innovation",
        metrics: &[
            metric("research-funding", "External research funding", 18.2, 16.9, 20.0, "$M", "Sponsored research awards"),
            metric("patents-filed", "Patents filed", 14.0, 11.0, 12.0, "patents", "Invention disclosures converted to filings"),
            metric("industry-partnerships", "Industry partnerships", 37.0, 35.0, 45.0, "partners", "Active research agreements with industry"),
        ],
    },
    PillarDefinition {
        id: "financial-sustainability",
        name: "Financial Sustainability",
        metrics: &[
            metric("operating-margin", "Operating margin", 3.8, 3.1, 4.0, "%", "Operating surplus over revenue"),
            metric("endowment-growth", "Endowment growth", 6.1, 5.4, 5.0, "%", "Year-over-year endowment return"),
            metric("revenue-diversification", "Revenue diversification", 62.0, 60.0, 70.0, "%", "Revenue from sources other than tuition"),
        ],
    },
    PillarDefinition {
        id: "community-engagement",
        name: "Community Engagement",
        metrics: &[
            metric("volunteer-hours", "Volunteer hours", 48_000.0, 45_500.0, 50_000.0, "hours", "Community service logged by students and staff"),
            metric("public-events", "Public events", 126.0, 118.0, 120.0, "events", "Campus events open to the public"),
            metric("alumni-giving", "Alumni giving rate", 11.5, 12.2, 15.0, "%", "Alumni donating in the last fiscal year"),
        ],
    },
];

pub static REFERENCE_AVERAGES: &[ReferenceAverages] = &[
    ReferenceAverages { pillar_id: "academic-excellence", peer_average: 88.0, national_average: 82.0 },
    ReferenceAverages { pillar_id: "student-success", peer_average: 91.0, national_average: 85.0 },
    ReferenceAverages { pillar_id: "research-innovation", peer_average: 84.0, national_average: 78.0 },
    ReferenceAverages { pillar_id: "financial-sustainability", peer_average: 90.0, national_average: 86.0 },
    ReferenceAverages { pillar_id: "community-engagement", peer_average: 87.0, national_average: 80.0 },
];

/// Unrounded mean of the normalized values of metrics that carry a target.
///
/// `0` when no metric has a target.
pub fn raw_pillar_score(metrics: &[Metric], cap_multiple: f64) -> f64 {
    let normalized: Vec<f64> = metrics
        .iter()
        .filter_map(|m| m.target.map(|t| normalized_score(m.value, t, cap_multiple)))
        .collect();
    mean(&normalized)
}

/// Rounded pillar score clamped to 0–100.
pub fn pillar_score(metrics: &[Metric], cap_multiple: f64) -> u8 {
    raw_pillar_score(metrics, cap_multiple).round().clamp(0.0, 100.0) as u8
}

/// Score a pillar built from caller-provided metrics.
///
/// `previous_score` drives the pillar trend; pass `None` for a stable trend.
pub fn score_pillar(
    id: &str,
    name: &str,
    metrics: Vec<Metric>,
    previous_score: Option<f64>,
    scoring: &ScoringPolicy,
) -> KpiPillar {
    let raw = raw_pillar_score(&metrics, scoring.cap_multiple);
    let overall_score = pillar_score(&metrics, scoring.cap_multiple);
    let status = scoring
        .pillar_status()
        .classify(overall_score as f64, scoring.pillar_target);
    let trend = previous_score
        .map(|prev| Trend::from(change_type(raw, prev)))
        .unwrap_or(Trend::Stable);

    KpiPillar {
        id: PillarId::from(id),
        name: name.to_string(),
        overall_score,
        status,
        trend,
        metrics,
    }
}

fn definition_metrics(definition: &PillarDefinition, status: &StatusPolicy) -> Vec<Metric> {
    definition
        .metrics
        .iter()
        .map(|m| {
            Metric::new(m.id, m.name, m.value, m.unit)
                .with_target(m.target, status)
                .with_trend(change_type(m.value, m.previous))
                .with_description(m.description)
        })
        .collect()
}

fn previous_raw_score(definition: &PillarDefinition, cap_multiple: f64) -> f64 {
    let previous: Vec<f64> = definition
        .metrics
        .iter()
        .map(|m| normalized_score(m.previous, m.target, cap_multiple))
        .collect();
    mean(&previous)
}

/// Score every pillar of a catalog, keeping catalog order.
pub fn score_pillars(catalog: &[PillarDefinition], scoring: &ScoringPolicy) -> Vec<KpiPillar> {
    catalog
        .iter()
        .map(|definition| {
            score_pillar(
                definition.id,
                definition.name,
                definition_metrics(definition, &scoring.metric_status),
                Some(previous_raw_score(definition, scoring.cap_multiple)),
                scoring,
            )
        })
        .collect()
}

/// Inner join of pillars with reference averages on pillar id, in pillar order.
pub fn join_reference(pillars: &[KpiPillar], references: &[ReferenceAverages]) -> Vec<ComparisonRow> {
    pillars
        .iter()
        .filter_map(|pillar| {
            references
                .iter()
                .find(|r| r.pillar_id == pillar.id.as_str())
                .map(|r| ComparisonRow {
                    pillar_id: pillar.id.clone(),
                    pillar_name: pillar.name.clone(),
                    score: pillar.overall_score,
                    peer_average: r.peer_average,
                    national_average: r.national_average,
                })
        })
        .collect()
}
