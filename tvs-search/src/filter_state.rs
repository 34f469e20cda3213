//! Filter-state reducer
//!
//! Pure transitions for clicks on dancer and orchestra names. Dancer picks
//! fill the two slots asymmetrically: a pick matching a slot clears it, an
//! empty pair fills slot one first, and a third distinct dancer is ignored.

use serde::{Deserialize, Serialize};

use crate::pagination::parse_page;
use crate::query::{FilterValue, VideoFilters};

/// Which kind of name was picked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Dancer,
    Orchestra,
}

/// One of the three filter slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Dancer1,
    Dancer2,
    Orchestra,
}

/// The active filters and page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub dancer1: FilterValue,
    #[serde(default)]
    pub dancer2: FilterValue,
    #[serde(default)]
    pub orchestra: FilterValue,
    #[serde(default = "first_page")]
    pub page: i64,
}

fn first_page() -> i64 {
    1
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            dancer1: FilterValue::Any,
            dancer2: FilterValue::Any,
            orchestra: FilterValue::Any,
            page: first_page(),
        }
    }
}

impl FilterState {
    /// Build from raw request parameters; missing or empty values mean "any"
    pub fn from_params(
        dancer1: Option<&str>,
        dancer2: Option<&str>,
        orchestra: Option<&str>,
        page: Option<&str>,
    ) -> Self {
        Self {
            dancer1: FilterValue::parse(dancer1),
            dancer2: FilterValue::parse(dancer2),
            orchestra: FilterValue::parse(orchestra),
            page: parse_page(page),
        }
    }

    /// No filters, page 1
    pub fn reset() -> Self {
        Self::default()
    }

    /// True when any axis is constrained
    pub fn has_filters(&self) -> bool {
        !(self.dancer1.is_any() && self.dancer2.is_any() && self.orchestra.is_any())
    }

    /// The filter triple without the page
    pub fn filters(&self) -> VideoFilters {
        VideoFilters {
            dancer1: self.dancer1.clone(),
            dancer2: self.dancer2.clone(),
            orchestra: self.orchestra.clone(),
        }
    }

    /// Set one slot directly ("any" clears it); the page resets to 1
    pub fn with_slot(&self, slot: Slot, value: impl Into<FilterValue>) -> Self {
        let value = value.into();
        let mut next = self.clone();
        match slot {
            Slot::Dancer1 => next.dancer1 = value,
            Slot::Dancer2 => next.dancer2 = value,
            Slot::Orchestra => next.orchestra = value,
        }
        next.page = first_page();
        next
    }

    /// Next state after clicking `value` on `axis`; the page always resets to 1
    pub fn apply_filter_pick(&self, axis: Axis, value: &str) -> Self {
        let mut next = self.clone();
        next.page = first_page();

        let picked = FilterValue::parse(Some(value.trim()));
        let Some(name) = picked.name() else {
            return next;
        };

        match axis {
            Axis::Orchestra => {
                next.orchestra = if self.orchestra.matches(name) {
                    FilterValue::Any
                } else {
                    picked.clone()
                };
            }
            Axis::Dancer => {
                if self.dancer1.matches(name) {
                    next.dancer1 = FilterValue::Any;
                } else if self.dancer2.matches(name) {
                    next.dancer2 = FilterValue::Any;
                } else if self.dancer1.is_any() {
                    next.dancer1 = picked.clone();
                } else if self.dancer2.is_any() {
                    next.dancer2 = picked.clone();
                }
                // Both slots already hold two other dancers: ignore the pick
            }
        }

        next
    }
}
