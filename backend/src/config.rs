//! Policy configuration file support.
//!
//! Every tunable number behind the metric curves, the status bands and the
//! pillar scoring lives here. All fields have defaults, so an empty file (or
//! no file at all) yields the built-in policy.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{MetricFamily, StatusPolicy, TimeAnchor};

/// Environment variable naming an explicit policy file.
pub const CONFIG_ENV_VAR: &str = "PORTAL_CONFIG";

/// Errors raised while loading a policy file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Invalid policy configuration: {0}")]
    Invalid(String),

    #[error("No portal.toml found in standard locations")]
    NotFound,
}

/// Complete policy for filters, metrics and scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Start of the reporting term.
    #[serde(default = "default_anchor")]
    pub anchor: DateTime<Utc>,
    #[serde(default)]
    pub enrollment: EnrollmentPolicy,
    #[serde(default)]
    pub retention: RetentionPolicy,
    #[serde(default)]
    pub performance: PerformancePolicy,
    #[serde(default)]
    pub strategic: StrategicPolicy,
    #[serde(default)]
    pub scoring: ScoringPolicy,
    #[serde(default)]
    pub status: StatusBands,
}

fn default_anchor() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 24, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            anchor: default_anchor(),
            enrollment: EnrollmentPolicy::default(),
            retention: RetentionPolicy::default(),
            performance: PerformancePolicy::default(),
            strategic: StrategicPolicy::default(),
            scoring: ScoringPolicy::default(),
            status: StatusBands::default(),
        }
    }
}

/// Capped linear enrollment curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrollmentPolicy {
    pub base: f64,
    pub growth_rate_per_day: f64,
    /// Upper bound on the elapsed-time contribution.
    pub growth_cap: f64,
    pub target: f64,
}

impl Default for EnrollmentPolicy {
    fn default() -> Self {
        Self {
            base: 12_450.0,
            growth_rate_per_day: 8.0,
            growth_cap: 650.0,
            target: 13_000.0,
        }
    }
}

/// Retention rate with a seasonal dip and a decaying at-risk headcount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetentionPolicy {
    /// Percent.
    pub base: f64,
    /// Offset applied inside the dip window (negative).
    pub mid_semester_dip: f64,
    pub dip_start_day: i64,
    /// Inclusive.
    pub dip_end_day: i64,
    pub target: f64,
    pub at_risk_initial: f64,
    pub at_risk_rate: f64,
    pub at_risk_floor: f64,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            base: 87.5,
            mid_semester_dip: -2.5,
            dip_start_day: 60,
            dip_end_day: 90,
            target: 90.0,
            at_risk_initial: 420.0,
            at_risk_rate: 1.5,
            at_risk_floor: 180.0,
        }
    }
}

/// Slow monotone academic curves plus an oscillating satisfaction score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformancePolicy {
    pub gpa_base: f64,
    pub gpa_rate: f64,
    pub gpa_ceiling: f64,
    pub gpa_target: f64,
    /// Percent.
    pub completion_base: f64,
    pub completion_rate: f64,
    pub completion_ceiling: f64,
    pub completion_target: f64,
    /// Score out of 5.
    pub satisfaction_base: f64,
    pub satisfaction_amplitude: f64,
    /// Days per radian.
    pub satisfaction_period: f64,
    pub satisfaction_target: f64,
}

impl Default for PerformancePolicy {
    fn default() -> Self {
        Self {
            gpa_base: 3.12,
            gpa_rate: 0.0008,
            gpa_ceiling: 4.0,
            gpa_target: 3.3,
            completion_base: 78.0,
            completion_rate: 0.02,
            completion_ceiling: 100.0,
            completion_target: 85.0,
            satisfaction_base: 4.1,
            satisfaction_amplitude: 0.15,
            satisfaction_period: 14.0,
            satisfaction_target: 4.2,
        }
    }
}

/// Mostly constant strategic facts plus one growth projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategicPolicy {
    pub market_position: String,
    /// Percent.
    pub market_share: f64,
    pub projected_growth_base: f64,
    pub projected_growth_rate: f64,
    pub projected_growth_cap: f64,
    pub projected_growth_target: f64,
    pub risks: Vec<String>,
    pub opportunities: Vec<String>,
}

impl Default for StrategicPolicy {
    fn default() -> Self {
        Self {
            market_position: "Regional leader".to_string(),
            market_share: 12.4,
            projected_growth_base: 3.5,
            projected_growth_rate: 0.005,
            projected_growth_cap: 6.0,
            projected_growth_target: 5.0,
            risks: vec![
                "Demographic decline in feeder regions".to_string(),
                "Rising competition from online programs".to_string(),
                "State funding volatility".to_string(),
            ],
            opportunities: vec![
                "Adult learner micro-credentials".to_string(),
                "Industry research partnerships".to_string(),
                "International recruitment".to_string(),
            ],
        }
    }
}

/// Pillar scoring policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    /// Largest `value / target` ratio a single metric may contribute.
    #[serde(default = "default_cap_multiple")]
    pub cap_multiple: f64,
    /// Pillar score at or above which a pillar exceeds its target.
    #[serde(default = "default_pillar_target")]
    pub pillar_target: f64,
    /// Pillar score at or above which a pillar is on track.
    #[serde(default = "default_pillar_on_track_floor")]
    pub pillar_on_track_floor: f64,
    /// Status bands for the individual metrics inside a pillar.
    #[serde(default)]
    pub metric_status: StatusPolicy,
}

fn default_cap_multiple() -> f64 {
    1.2
}

fn default_pillar_target() -> f64 {
    100.0
}

fn default_pillar_on_track_floor() -> f64 {
    80.0
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            cap_multiple: default_cap_multiple(),
            pillar_target: default_pillar_target(),
            pillar_on_track_floor: default_pillar_on_track_floor(),
            metric_status: StatusPolicy::default(),
        }
    }
}

impl ScoringPolicy {
    /// Status bands expressed as a ratio of the pillar target.
    pub fn pillar_status(&self) -> StatusPolicy {
        if self.pillar_target > 0.0 {
            StatusPolicy::new(self.pillar_on_track_floor / self.pillar_target)
        } else {
            StatusPolicy::new(1.0)
        }
    }
}

/// Per-family status bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusBands {
    #[serde(default = "default_enrollment_band")]
    pub enrollment: StatusPolicy,
    #[serde(default = "default_retention_band")]
    pub retention: StatusPolicy,
    #[serde(default = "default_performance_band")]
    pub performance: StatusPolicy,
    #[serde(default = "default_strategic_band")]
    pub strategic: StatusPolicy,
}

fn default_enrollment_band() -> StatusPolicy {
    StatusPolicy::new(0.95)
}

fn default_retention_band() -> StatusPolicy {
    StatusPolicy::new(0.97)
}

fn default_performance_band() -> StatusPolicy {
    StatusPolicy::new(0.9)
}

fn default_strategic_band() -> StatusPolicy {
    StatusPolicy::new(0.85)
}

impl Default for StatusBands {
    fn default() -> Self {
        Self {
            enrollment: default_enrollment_band(),
            retention: default_retention_band(),
            performance: default_performance_band(),
            strategic: default_strategic_band(),
        }
    }
}

impl StatusBands {
    pub fn for_family(&self, family: MetricFamily) -> &StatusPolicy {
        match family {
            MetricFamily::Enrollment => &self.enrollment,
            MetricFamily::Retention => &self.retention,
            MetricFamily::Performance => &self.performance,
            MetricFamily::Strategic => &self.strategic,
        }
    }
}

impl PolicyConfig {
    pub fn time_anchor(&self) -> TimeAnchor {
        TimeAnchor::new(self.anchor)
    }

    /// Parse and validate a policy from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, "<inline>")
    }

    /// Load a policy from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(PolicyConfig)` if the file was read, parsed and validated
    /// * `Err(ConfigError)` otherwise
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let display = path.as_ref().display().to_string();
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Read {
            path: display.clone(),
            source: e,
        })?;

        let config = Self::parse(&content, &display)?;
        log::info!("loaded portal policy from {}", display);
        Ok(config)
    }

    /// Load a policy from the default location.
    ///
    /// Searches for `portal.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = [
            PathBuf::from("portal.toml"),
            PathBuf::from("backend/portal.toml"),
            PathBuf::from("../portal.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(ConfigError::NotFound)
    }

    /// Resolve the policy for the running process.
    ///
    /// `PORTAL_CONFIG` wins when set (and its errors are reported); otherwise
    /// the default locations are searched, and the built-in policy is used
    /// when no file exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.trim().is_empty() {
                return Self::from_file(path);
            }
        }

        match Self::from_default_location() {
            Err(ConfigError::NotFound) => {
                log::warn!("no portal.toml found, using built-in policy");
                Ok(Self::default())
            }
            other => other,
        }
    }

    fn parse(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: PolicyConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject numbers the curves cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let numbers = [
            ("enrollment.base", self.enrollment.base),
            ("enrollment.growth_rate_per_day", self.enrollment.growth_rate_per_day),
            ("enrollment.growth_cap", self.enrollment.growth_cap),
            ("enrollment.target", self.enrollment.target),
            ("retention.base", self.retention.base),
            ("retention.mid_semester_dip", self.retention.mid_semester_dip),
            ("retention.target", self.retention.target),
            ("retention.at_risk_initial", self.retention.at_risk_initial),
            ("retention.at_risk_rate", self.retention.at_risk_rate),
            ("retention.at_risk_floor", self.retention.at_risk_floor),
            ("performance.gpa_base", self.performance.gpa_base),
            ("performance.gpa_rate", self.performance.gpa_rate),
            ("performance.gpa_ceiling", self.performance.gpa_ceiling),
            ("performance.completion_base", self.performance.completion_base),
            ("performance.completion_rate", self.performance.completion_rate),
            ("performance.completion_ceiling", self.performance.completion_ceiling),
            ("performance.satisfaction_base", self.performance.satisfaction_base),
            ("performance.satisfaction_amplitude", self.performance.satisfaction_amplitude),
            ("performance.satisfaction_period", self.performance.satisfaction_period),
            ("strategic.market_share", self.strategic.market_share),
            ("strategic.projected_growth_base", self.strategic.projected_growth_base),
            ("strategic.projected_growth_rate", self.strategic.projected_growth_rate),
            ("strategic.projected_growth_cap", self.strategic.projected_growth_cap),
            ("scoring.cap_multiple", self.scoring.cap_multiple),
            ("scoring.pillar_target", self.scoring.pillar_target),
            ("scoring.pillar_on_track_floor", self.scoring.pillar_on_track_floor),
        ];
        if let Some((name, _)) = numbers.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::Invalid(format!("{} must be finite", name)));
        }

        let rates = [
            ("enrollment.growth_rate_per_day", self.enrollment.growth_rate_per_day),
            ("enrollment.growth_cap", self.enrollment.growth_cap),
            ("retention.at_risk_rate", self.retention.at_risk_rate),
            ("performance.gpa_rate", self.performance.gpa_rate),
            ("performance.completion_rate", self.performance.completion_rate),
            ("strategic.projected_growth_rate", self.strategic.projected_growth_rate),
        ];
        if let Some((name, _)) = rates.iter().find(|(_, v)| *v < 0.0) {
            return Err(ConfigError::Invalid(format!("{} must not be negative", name)));
        }

        if self.retention.dip_start_day > self.retention.dip_end_day {
            return Err(ConfigError::Invalid(format!(
                "retention dip window is inverted ({} > {})",
                self.retention.dip_start_day, self.retention.dip_end_day
            )));
        }
        if self.performance.satisfaction_period <= 0.0 {
            return Err(ConfigError::Invalid(
                "performance.satisfaction_period must be positive".to_string(),
            ));
        }
        if self.scoring.cap_multiple < 1.0 {
            return Err(ConfigError::Invalid(
                "scoring.cap_multiple must be at least 1.0".to_string(),
            ));
        }
        if self.scoring.pillar_on_track_floor > self.scoring.pillar_target {
            return Err(ConfigError::Invalid(
                "scoring.pillar_on_track_floor must not exceed scoring.pillar_target".to_string(),
            ));
        }

        let bands = [
            ("status.enrollment", &self.status.enrollment),
            ("status.retention", &self.status.retention),
            ("status.performance", &self.status.performance),
            ("status.strategic", &self.status.strategic),
            ("scoring.metric_status", &self.scoring.metric_status),
        ];
        for (name, band) in bands {
            if !(band.on_track_ratio > 0.0 && band.on_track_ratio <= 1.0) {
                return Err(ConfigError::Invalid(format!(
                    "{}.on_track_ratio must be in (0, 1]",
                    name
                )));
            }
        }

        Ok(())
    }
}
