//! Time-anchored synthetic metrics.
//!
//! Every figure is a pure function of the days elapsed since the policy's
//! anchor and of the filter state; nothing is sampled from the clock or an
//! RNG here. Elapsed-time terms use [`clamped_days`], so a future anchor
//! yields the base values.

use chrono::{DateTime, Utc};

use crate::api::{
    EnrollmentMetrics, MetricsSnapshot, PerformanceMetrics, RetentionMetrics, SeriesPoint,
    StrategicMetrics,
};
use crate::config::{
    EnrollmentPolicy, PerformancePolicy, PolicyConfig, RetentionPolicy, StatusBands,
    StrategicPolicy,
};
use crate::models::{clamped_days, DomainType, FilterState, Metric, MetricFamily, TimeRange};
use crate::services::formulas::{change_type, growth_rate, round_to, target_progress};
use crate::services::view_filter;

/// Headcount above base: linear in elapsed days, capped at `growth_cap`.
pub fn admissions_at(policy: &EnrollmentPolicy, days: i64) -> f64 {
    (clamped_days(days) * policy.growth_rate_per_day).min(policy.growth_cap)
}

pub fn enrollment_at(policy: &EnrollmentPolicy, days: i64) -> f64 {
    policy.base + admissions_at(policy, days)
}

/// Inclusive dip window; negative days never fall inside it.
pub fn in_dip_window(policy: &RetentionPolicy, days: i64) -> bool {
    days >= 0 && days >= policy.dip_start_day && days <= policy.dip_end_day
}

pub fn retention_at(policy: &RetentionPolicy, days: i64) -> f64 {
    if in_dip_window(policy, days) {
        policy.base + policy.mid_semester_dip
    } else {
        policy.base
    }
}

/// Non-increasing in `days`, never below `at_risk_floor`.
pub fn at_risk_at(policy: &RetentionPolicy, days: i64) -> u32 {
    let remaining = (policy.at_risk_initial - clamped_days(days) * policy.at_risk_rate)
        .max(policy.at_risk_floor)
        .max(0.0);
    remaining.round() as u32
}

pub fn gpa_at(policy: &PerformancePolicy, days: i64) -> f64 {
    (policy.gpa_base + clamped_days(days) * policy.gpa_rate).min(policy.gpa_ceiling)
}

pub fn completion_at(policy: &PerformancePolicy, days: i64) -> f64 {
    (policy.completion_base + clamped_days(days) * policy.completion_rate)
        .min(policy.completion_ceiling)
}

/// `base + amplitude * sin(days / period)`: bounded, no drift.
pub fn satisfaction_at(policy: &PerformancePolicy, days: i64) -> f64 {
    if policy.satisfaction_period <= 0.0 {
        return policy.satisfaction_base;
    }
    policy.satisfaction_base
        + policy.satisfaction_amplitude * (clamped_days(days) / policy.satisfaction_period).sin()
}

pub fn projected_growth_at(policy: &StrategicPolicy, days: i64) -> f64 {
    (policy.projected_growth_base + clamped_days(days) * policy.projected_growth_rate)
        .min(policy.projected_growth_cap)
}

/// Builds [`MetricsSnapshot`]s under one policy.
pub struct MetricsGenerator<'a> {
    policy: &'a PolicyConfig,
}

impl<'a> MetricsGenerator<'a> {
    pub fn new(policy: &'a PolicyConfig) -> Self {
        Self { policy }
    }

    /// Metrics at `now`, measured from the policy's anchor.
    pub fn compute(&self, filters: &FilterState, now: DateTime<Utc>) -> MetricsSnapshot {
        let days = self.policy.time_anchor().days_elapsed(now);
        self.compute_for_days(days, filters)
    }

    /// Metrics at an explicit elapsed-day count.
    pub fn compute_for_days(&self, days: i64, filters: &FilterState) -> MetricsSnapshot {
        let time_range = TimeRange::from_filters(filters);
        let previous_days = days.saturating_sub(time_range.lookback_days());

        MetricsSnapshot {
            days_elapsed: days,
            time_range,
            enrollment: self.enrollment(days, previous_days),
            retention: self.retention(days, previous_days),
            performance: self.performance(days, previous_days),
            strategic: self.strategic(days, previous_days),
        }
    }

    fn enrollment(&self, days: i64, previous_days: i64) -> EnrollmentMetrics {
        let p = &self.policy.enrollment;
        let current = enrollment_at(p, days);
        let previous = enrollment_at(p, previous_days);

        EnrollmentMetrics {
            current,
            previous,
            target: p.target,
            new_admissions: admissions_at(p, days),
            growth_rate: growth_rate(current, previous),
            target_progress: target_progress(current, p.target),
            change: change_type(current, previous),
        }
    }

    fn retention(&self, days: i64, previous_days: i64) -> RetentionMetrics {
        let p = &self.policy.retention;
        let current = retention_at(p, days);
        let previous = retention_at(p, previous_days);

        RetentionMetrics {
            current,
            previous,
            target: p.target,
            at_risk_students: at_risk_at(p, days),
            previous_at_risk_students: at_risk_at(p, previous_days),
            mid_semester_dip_active: in_dip_window(p, days),
            change: change_type(current, previous),
        }
    }

    fn performance(&self, days: i64, previous_days: i64) -> PerformanceMetrics {
        let p = &self.policy.performance;

        PerformanceMetrics {
            average_gpa: gpa_at(p, days),
            previous_average_gpa: gpa_at(p, previous_days),
            gpa_target: p.gpa_target,
            completion_rate: completion_at(p, days),
            previous_completion_rate: completion_at(p, previous_days),
            completion_target: p.completion_target,
            satisfaction: satisfaction_at(p, days),
            previous_satisfaction: satisfaction_at(p, previous_days),
            satisfaction_target: p.satisfaction_target,
        }
    }

    fn strategic(&self, days: i64, previous_days: i64) -> StrategicMetrics {
        let p = &self.policy.strategic;

        StrategicMetrics {
            market_position: p.market_position.clone(),
            market_share: p.market_share,
            projected_growth: projected_growth_at(p, days),
            previous_projected_growth: projected_growth_at(p, previous_days),
            projected_growth_target: p.projected_growth_target,
            risks: p.risks.clone(),
            opportunities: p.opportunities.clone(),
        }
    }

    /// `points` evenly spaced samples of the enrollment curve from the anchor
    /// to `now` (both ends included). Before the anchor every sample sits at day 0.
    pub fn enrollment_series(&self, now: DateTime<Utc>, points: usize) -> Vec<SeriesPoint> {
        let last_day = self.policy.time_anchor().days_elapsed(now).max(0);
        let p = &self.policy.enrollment;

        match points {
            0 => Vec::new(),
            1 => vec![SeriesPoint {
                day: last_day,
                value: enrollment_at(p, last_day),
            }],
            n => (0..n)
                .map(|i| {
                    let day = (last_day as f64 * i as f64 / (n - 1) as f64).round() as i64;
                    SeriesPoint {
                        day,
                        value: enrollment_at(p, day),
                    }
                })
                .collect(),
        }
    }
}

impl EnrollmentMetrics {
    pub fn metrics(&self, bands: &StatusBands) -> Vec<Metric> {
        let band = bands.for_family(MetricFamily::Enrollment);
        vec![
            Metric::new("total-enrollment", "Total enrollment", self.current, "students")
                .with_target(self.target, band)
                .with_trend(self.change)
                .with_description("Headcount for the current term"),
            Metric::new("new-admissions", "New admissions", self.new_admissions, "students")
                .with_trend(self.change)
                .with_description("Students admitted since the term started"),
            Metric::new(
                "enrollment-growth",
                "Enrollment growth",
                round_to(self.growth_rate, 2),
                "%",
            )
            .with_trend(self.change)
            .with_description("Change against the comparison window"),
        ]
    }
}

impl RetentionMetrics {
    pub fn metrics(&self, bands: &StatusBands) -> Vec<Metric> {
        let band = bands.for_family(MetricFamily::Retention);
        vec![
            Metric::new("retention-rate", "Retention rate", self.current, "%")
                .with_target(self.target, band)
                .with_trend(self.change)
                .with_description("Share of students continuing their studies"),
            Metric::new(
                "at-risk-students",
                "At-risk students",
                self.at_risk_students as f64,
                "students",
            )
            .with_trend(change_type(
                self.at_risk_students as f64,
                self.previous_at_risk_students as f64,
            ))
            .with_description("Students flagged by early-warning indicators"),
        ]
    }
}

impl PerformanceMetrics {
    pub fn metrics(&self, bands: &StatusBands) -> Vec<Metric> {
        let band = bands.for_family(MetricFamily::Performance);
        vec![
            Metric::new("average-gpa", "Average GPA", round_to(self.average_gpa, 2), "gpa")
                .with_target(self.gpa_target, band)
                .with_trend(change_type(self.average_gpa, self.previous_average_gpa))
                .with_description("Mean cumulative GPA"),
            Metric::new("completion-rate", "Course completion", self.completion_rate, "%")
                .with_target(self.completion_target, band)
                .with_trend(change_type(self.completion_rate, self.previous_completion_rate))
                .with_description("Courses completed with a passing grade"),
            Metric::new(
                "student-satisfaction",
                "Student satisfaction",
                round_to(self.satisfaction, 2),
                "score",
            )
            .with_target(self.satisfaction_target, band)
            .with_trend(change_type(self.satisfaction, self.previous_satisfaction))
            .with_description("Average rating out of 5"),
        ]
    }
}

impl StrategicMetrics {
    pub fn metrics(&self, bands: &StatusBands) -> Vec<Metric> {
        let band = bands.for_family(MetricFamily::Strategic);
        vec![
            Metric::new("market-share", "Market share", self.market_share, "%")
                .with_description(&self.market_position),
            Metric::new("projected-growth", "Projected growth", self.projected_growth, "%")
                .with_target(self.projected_growth_target, band)
                .with_trend(change_type(self.projected_growth, self.previous_projected_growth))
                .with_description("Projected enrollment growth over the planning horizon"),
        ]
    }
}

impl MetricsSnapshot {
    /// Every card of the snapshot.
    ///
    /// Only analytics domains select on metric status; elsewhere `status`
    /// means something else (survey state, request outcome) and leaves the
    /// cards alone.
    pub fn cards(&self, bands: &StatusBands, filters: &FilterState, domain: DomainType) -> Vec<Metric> {
        let mut all = self.enrollment.metrics(bands);
        all.extend(self.retention.metrics(bands));
        all.extend(self.performance.metrics(bands));
        all.extend(self.strategic.metrics(bands));

        if !domain.is_analytics() {
            return all;
        }
        all.into_iter()
            .filter(|m| view_filter::matches_attributes(m, filters))
            .collect()
    }
}

#[cfg(test)]
#[path = "metrics_generator_tests.rs"]
mod metrics_generator_tests;
