//! Filter state and catalog types shared by every filterable view.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Values that mean "not filtering on this dimension".
///
/// An absent key is the other way of saying the same thing.
pub const SENTINEL_VALUES: [&str; 3] = ["all", "", "none"];

/// Returns true when `value` is one of the no-op sentinels.
pub fn is_sentinel(value: &str) -> bool {
    SENTINEL_VALUES.contains(&value)
}

/// Mapping from filter-dimension key to selected value.
///
/// Entries keep the order in which their keys were first inserted; replacing
/// the value of an existing key keeps its position. Two states are equal when
/// they hold the same pairs in the same order.
///
/// Mutation is crate-private: callers thread states through the reconciler
/// (`services::reconciler`), which always returns a new value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    entries: Vec<(String, String)>,
}

impl FilterState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected value for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub(crate) fn insert(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((key.to_string(), value.to_string())),
        }
    }

    pub(crate) fn remove(&mut self, key: &str) {
        self.entries.retain(|(k, _)| k != key);
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for FilterState {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut state = FilterState::new();
        for (k, v) in iter {
            state.insert(k.as_ref(), v.as_ref());
        }
        state
    }
}

impl Serialize for FilterState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FilterState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FilterStateVisitor;

        impl<'de> Visitor<'de> for FilterStateVisitor {
            type Value = FilterState;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of filter keys to string values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<FilterState, A::Error> {
                let mut state = FilterState::new();
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    state.insert(&key, &value);
                }
                Ok(state)
            }
        }

        deserializer.deserialize_map(FilterStateVisitor)
    }
}

/// One selectable value of a filter dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub value: &'static str,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

impl FilterOption {
    pub const fn new(value: &'static str, label: &'static str) -> Self {
        Self {
            value,
            label,
            count: None,
        }
    }

    pub const fn with_count(value: &'static str, label: &'static str, count: u32) -> Self {
        Self {
            value,
            label,
            count: Some(count),
        }
    }
}

/// A named filter axis and its legal values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterDimension {
    /// Key used in [`FilterState`] (e.g. `dateRange`).
    pub key: &'static str,
    /// Name of the option list in the catalog (e.g. `dateRanges`).
    pub list_name: &'static str,
    /// Human label shown next to chips.
    pub label: &'static str,
    /// Value a freshly opened view starts with.
    pub default_value: &'static str,
    pub options: &'static [FilterOption],
}

impl FilterDimension {
    pub fn option(&self, value: &str) -> Option<&'static FilterOption> {
        self.options.iter().find(|o| o.value == value)
    }
}

/// Static bundle of option lists for one domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterConfig {
    pub domain: DomainType,
    pub dimensions: &'static [FilterDimension],
}

impl FilterConfig {
    /// Dimension addressed by its [`FilterState`] key.
    pub fn dimension(&self, key: &str) -> Option<&'static FilterDimension> {
        self.dimensions.iter().find(|d| d.key == key)
    }

    /// Option list addressed by its catalog name (`dateRanges`, `statusOptions`, ...).
    pub fn list(&self, list_name: &str) -> Option<&'static [FilterOption]> {
        self.dimensions
            .iter()
            .find(|d| d.list_name == list_name)
            .map(|d| d.options)
    }

    pub fn date_ranges(&self) -> &'static [FilterOption] {
        self.list("dateRanges").unwrap_or(&[])
    }

    pub fn status_options(&self) -> &'static [FilterOption] {
        self.list("statusOptions").unwrap_or(&[])
    }

    /// Whether the catalog knows `value` for dimension `key`.
    pub fn accepts(&self, key: &str, value: &str) -> bool {
        self.dimension(key)
            .map(|d| d.option(value).is_some())
            .unwrap_or(false)
    }

    /// The state a view starts from: every dimension at its default value.
    pub fn default_state(&self) -> FilterState {
        self.dimensions
            .iter()
            .map(|d| (d.key, d.default_value))
            .collect()
    }
}

/// Domain a filter catalog belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DomainType {
    Dashboard,
    Surveys,
    Responses,
    ApiLogs,
    Enrollment,
    Retention,
    Performance,
    Strategic,
}

impl DomainType {
    pub const ALL: [DomainType; 8] = [
        DomainType::Dashboard,
        DomainType::Surveys,
        DomainType::Responses,
        DomainType::ApiLogs,
        DomainType::Enrollment,
        DomainType::Retention,
        DomainType::Performance,
        DomainType::Strategic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DomainType::Dashboard => "dashboard",
            DomainType::Surveys => "surveys",
            DomainType::Responses => "responses",
            DomainType::ApiLogs => "api-logs",
            DomainType::Enrollment => "enrollment",
            DomainType::Retention => "retention",
            DomainType::Performance => "performance",
            DomainType::Strategic => "strategic",
        }
    }

    /// Analytics domains are the ones driven by the metrics generator.
    pub fn is_analytics(&self) -> bool {
        matches!(
            self,
            DomainType::Enrollment
                | DomainType::Retention
                | DomainType::Performance
                | DomainType::Strategic
        )
    }
}

impl fmt::Display for DomainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DomainType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dashboard" => Ok(Self::Dashboard),
            "surveys" | "survey" => Ok(Self::Surveys),
            "responses" | "response" => Ok(Self::Responses),
            "api-logs" | "apilogs" | "api_logs" => Ok(Self::ApiLogs),
            "enrollment" => Ok(Self::Enrollment),
            "retention" => Ok(Self::Retention),
            "performance" => Ok(Self::Performance),
            "strategic" => Ok(Self::Strategic),
            _ => Err(format!("Unknown domain type: {}", s)),
        }
    }
}
