//! Treemap input: exchanges (groups) holding weighted coins (items).

use crate::normalize::normalize_weight;
use serde::{Deserialize, Serialize};

/// A leaf data point, e.g. one coin listed on an exchange.
///
/// Serializes with the field names the web client uses: the weight travels
/// as `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Display key (coin name).
    pub key: String,
    /// Raw weight. See [`Item::weight`] for the value the layout uses.
    #[serde(rename = "data")]
    pub value: f64,
    /// Ticker symbol, display only.
    #[serde(default)]
    pub symbol: String,
    /// Quote unit, display only.
    #[serde(default)]
    pub unit: String,
}

impl Item {
    /// Create an item with empty display metadata.
    #[must_use]
    pub fn new(key: impl Into<String>, value: f64) -> Self {
        Self {
            key: key.into(),
            value,
            symbol: String::new(),
            unit: String::new(),
        }
    }

    /// Set symbol and unit.
    #[must_use]
    pub fn quoted(mut self, symbol: impl Into<String>, unit: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self.unit = unit.into();
        self
    }

    /// Weight used for layout: the raw value with NaN, infinities and
    /// negatives mapped to zero.
    #[must_use]
    pub fn weight(&self) -> f64 {
        normalize_weight(self.value)
    }

    /// Cell label, `"{key} ({symbol}/{unit})"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({}/{})", self.key, self.symbol, self.unit)
    }
}

/// A top-level category, e.g. an exchange, with its items in display order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Group {
    /// Group key, unique within one input set.
    pub key: String,
    /// Items in placement order.
    #[serde(rename = "data", default)]
    pub items: Vec<Item>,
}

impl Group {
    /// Create an empty group.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            items: Vec::new(),
        }
    }

    /// Create a group from a list of items.
    #[must_use]
    pub fn with_items(key: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            key: key.into(),
            items,
        }
    }

    /// Append an item.
    #[must_use]
    pub fn item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    /// Sum of normalized item weights.
    #[must_use]
    pub fn total_value(&self) -> f64 {
        self.items.iter().map(Item::weight).sum()
    }

    /// Check if the group has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Sum of every group's normalized weight.
#[must_use]
pub fn total_value(groups: &[Group]) -> f64 {
    groups.iter().map(Group::total_value).sum()
}
