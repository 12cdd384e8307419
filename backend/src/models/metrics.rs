use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

crate::define_id_type!(MetricId);
crate::define_id_type!(PillarId);

/// Direction a metric moved over the comparison window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

/// Three-tier classification of a value against its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetricStatus {
    OnTrack,
    ExceedsTarget,
    NeedsAttention,
}

/// Outcome of comparing a current value with a previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Increase,
    Decrease,
    Neutral,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Stable => "stable",
        }
    }
}

impl MetricStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricStatus::OnTrack => "on-track",
            MetricStatus::ExceedsTarget => "exceeds-target",
            MetricStatus::NeedsAttention => "needs-attention",
        }
    }
}

impl From<ChangeType> for Trend {
    fn from(change: ChangeType) -> Self {
        match change {
            ChangeType::Increase => Trend::Up,
            ChangeType::Decrease => Trend::Down,
            ChangeType::Neutral => Trend::Stable,
        }
    }
}

/// Group of metrics sharing one status policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricFamily {
    Enrollment,
    Retention,
    Performance,
    Strategic,
}

impl fmt::Display for MetricFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MetricFamily::Enrollment => "enrollment",
            MetricFamily::Retention => "retention",
            MetricFamily::Performance => "performance",
            MetricFamily::Strategic => "strategic",
        };
        f.write_str(s)
    }
}

impl FromStr for MetricFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "enrollment" => Ok(Self::Enrollment),
            "retention" => Ok(Self::Retention),
            "performance" => Ok(Self::Performance),
            "strategic" => Ok(Self::Strategic),
            _ => Err(format!("Unknown metric family: {}", s)),
        }
    }
}

/// Status bands for one metric family.
///
/// `value >= target` exceeds the target, `value >= target * on_track_ratio`
/// is on track, anything lower needs attention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusPolicy {
    pub on_track_ratio: f64,
}

impl StatusPolicy {
    pub const fn new(on_track_ratio: f64) -> Self {
        Self { on_track_ratio }
    }

    pub fn classify(&self, value: f64, target: f64) -> MetricStatus {
        if value >= target {
            MetricStatus::ExceedsTarget
        } else if value >= target * self.on_track_ratio {
            MetricStatus::OnTrack
        } else {
            MetricStatus::NeedsAttention
        }
    }
}

impl Default for StatusPolicy {
    fn default() -> Self {
        Self::new(0.9)
    }
}

/// A single number rendered on a card.
///
/// Built fresh from filter state and time on every request. A metric without
/// a target is reported `on-track`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub id: MetricId,
    pub name: String,
    pub value: f64,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
    pub trend: Trend,
    pub status: MetricStatus,
    pub description: String,
}

impl Metric {
    pub fn new(id: &str, name: &str, value: f64, unit: &str) -> Self {
        Self {
            id: MetricId::from(id),
            name: name.to_string(),
            value,
            unit: unit.to_string(),
            target: None,
            trend: Trend::Stable,
            status: MetricStatus::OnTrack,
            description: String::new(),
        }
    }

    /// Attach a target and derive the status from it.
    pub fn with_target(mut self, target: f64, policy: &StatusPolicy) -> Self {
        self.target = Some(target);
        self.status = policy.classify(self.value, target);
        self
    }

    pub fn with_trend(mut self, trend: impl Into<Trend>) -> Self {
        self.trend = trend.into();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }
}

/// A named group of metrics rolled into one score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiPillar {
    pub id: PillarId,
    pub name: String,
    /// 0–100.
    pub overall_score: u8,
    pub status: MetricStatus,
    pub trend: Trend,
    pub metrics: Vec<Metric>,
}
