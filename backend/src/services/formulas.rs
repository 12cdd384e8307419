//! Shared numeric helpers used by the metric generator and KPI scoring.
//!
//! Every function here is total: divisions by zero resolve to `0` instead of
//! infinities or NaN.

use crate::models::ChangeType;

/// Percent change from `previous` to `current`; `0` when `previous` is zero.
pub fn growth_rate(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    (current - previous) / previous * 100.0
}

/// `current` as a percentage of `target`; `0` when `target` is zero.
pub fn target_progress(current: f64, target: f64) -> f64 {
    if target == 0.0 {
        return 0.0;
    }
    current / target * 100.0
}

/// Direction of change. Ties (and NaN comparisons) are neutral.
pub fn change_type(current: f64, previous: f64) -> ChangeType {
    if current > previous {
        ChangeType::Increase
    } else if current < previous {
        ChangeType::Decrease
    } else {
        ChangeType::Neutral
    }
}

/// `min(value / target, cap_multiple) * 100`, floored at zero; `0` when `target` is zero.
pub fn normalized_score(value: f64, target: f64, cap_multiple: f64) -> f64 {
    if target == 0.0 {
        return 0.0;
    }
    ((value / target).min(cap_multiple) * 100.0).max(0.0)
}

/// Arithmetic mean; `0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Separators and currency placement for one locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberLocale {
    pub thousands_separator: char,
    pub decimal_separator: char,
    pub currency_symbol: &'static str,
    pub symbol_after: bool,
}

impl NumberLocale {
    pub const EN_US: NumberLocale = NumberLocale {
        thousands_separator: ',',
        decimal_separator: '.',
        currency_symbol: "$",
        symbol_after: false,
    };

    pub const EN_GB: NumberLocale = NumberLocale {
        thousands_separator: ',',
        decimal_separator: '.',
        currency_symbol: "£",
        symbol_after: false,
    };

    pub const DE_DE: NumberLocale = NumberLocale {
        thousands_separator: '.',
        decimal_separator: ',',
        currency_symbol: "€",
        symbol_after: true,
    };

    /// Locale for a BCP 47 tag; unknown tags render as `en-US`.
    pub fn for_tag(tag: &str) -> NumberLocale {
        match tag.to_lowercase().replace('_', "-").as_str() {
            "en-gb" => Self::EN_GB,
            "de-de" | "de" => Self::DE_DE,
            "en-us" | "en" => Self::EN_US,
            other => {
                log::debug!("no number locale for '{}', using en-US", other);
                Self::EN_US
            }
        }
    }

    /// Grouped number with `decimals` fraction digits.
    ///
    /// Non-finite values render as `"n/a"`.
    pub fn format_number(&self, value: f64, decimals: usize) -> String {
        if !value.is_finite() {
            return "n/a".to_string();
        }

        let fixed = format!("{:.*}", decimals, value.abs());
        let (int_part, frac_part) = match fixed.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (fixed.as_str(), None),
        };

        let mut grouped = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
        for (i, digit) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(self.thousands_separator);
            }
            grouped.push(digit);
        }
        if let Some(frac) = frac_part {
            grouped.push(self.decimal_separator);
            grouped.push_str(frac);
        }

        // No "-0" after rounding.
        let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
        if value < 0.0 && !is_zero {
            format!("-{}", grouped)
        } else {
            grouped
        }
    }

    pub fn format_currency(&self, value: f64, decimals: usize) -> String {
        let number = self.format_number(value, decimals);
        if self.symbol_after {
            format!("{} {}", number, self.currency_symbol)
        } else if let Some(unsigned) = number.strip_prefix('-') {
            format!("-{}{}", self.currency_symbol, unsigned)
        } else {
            format!("{}{}", self.currency_symbol, number)
        }
    }

    /// `value` is already a percentage (e.g. `12.5` renders as `12.5%`).
    pub fn format_percentage(&self, value: f64, decimals: usize) -> String {
        format!("{}%", self.format_number(value, decimals))
    }

    /// Inverse of the formatters above.
    pub fn parse(&self, text: &str) -> Option<f64> {
        let cleaned: String = text
            .trim()
            .trim_end_matches('%')
            .replace(self.currency_symbol, "")
            .chars()
            .filter(|c| !c.is_whitespace() && *c != self.thousands_separator)
            .map(|c| if c == self.decimal_separator { '.' } else { c })
            .collect();
        cleaned.parse().ok()
    }
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self::EN_US
    }
}

pub fn format_number(value: f64, decimals: usize) -> String {
    NumberLocale::EN_US.format_number(value, decimals)
}

pub fn format_currency(value: f64) -> String {
    NumberLocale::EN_US.format_currency(value, 0)
}

pub fn format_percentage(value: f64, decimals: usize) -> String {
    NumberLocale::EN_US.format_percentage(value, decimals)
}
