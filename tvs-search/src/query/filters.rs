//! Filter values for the three search axes

use serde::{Deserialize, Serialize};
use std::fmt;
use tvs_common::{normalize_name, same_name};

/// Sentinel meaning "no constraint on this axis"
pub const ANY: &str = "any";

/// One axis of the filter: unconstrained, or a name as submitted by the user
///
/// The sentinel `"any"` (and a missing or empty value) is never a name,
/// even if an entity happens to be called "any".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FilterValue {
    #[default]
    Any,
    Named(String),
}

impl FilterValue {
    /// Parse a raw request parameter
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None => FilterValue::Any,
            Some(value) if value.is_empty() || value == ANY => FilterValue::Any,
            Some(value) => FilterValue::Named(value.to_string()),
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, FilterValue::Any)
    }

    /// The submitted name, if constrained
    pub fn name(&self) -> Option<&str> {
        match self {
            FilterValue::Any => None,
            FilterValue::Named(name) => Some(name),
        }
    }

    /// Canonical key of the submitted name, if constrained
    pub fn normalized(&self) -> Option<String> {
        self.name().map(normalize_name)
    }

    /// True when constrained to a name that normalizes like `candidate`
    pub fn matches(&self, candidate: &str) -> bool {
        self.name().is_some_and(|name| same_name(name, candidate))
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        if value.is_empty() || value == ANY {
            FilterValue::Any
        } else {
            FilterValue::Named(value)
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::parse(Some(value))
    }
}

impl From<FilterValue> for String {
    fn from(value: FilterValue) -> Self {
        match value {
            FilterValue::Any => ANY.to_string(),
            FilterValue::Named(name) => name,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or(ANY))
    }
}

/// The dancer pair and orchestra constraining a video query
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoFilters {
    pub dancer1: FilterValue,
    pub dancer2: FilterValue,
    pub orchestra: FilterValue,
}

impl VideoFilters {
    pub fn new(
        dancer1: impl Into<FilterValue>,
        dancer2: impl Into<FilterValue>,
        orchestra: impl Into<FilterValue>,
    ) -> Self {
        Self {
            dancer1: dancer1.into(),
            dancer2: dancer2.into(),
            orchestra: orchestra.into(),
        }
    }
}

impl fmt::Display for VideoFilters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "dancer1={}, dancer2={}, orchestra={}",
            self.dancer1, self.dancer2, self.orchestra
        )
    }
}
