//! Tracked products and the categories they are grouped into.
//!
//! A [`Product`] ties the short key used throughout the page (e.g. `silver`)
//! to the provider's own series identifier and a human-readable name.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Grouping of tracked products.
///
/// The order of the variants is the order groups appear in on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Upstream materials (silver paste, wafers, polysilicon, cells).
    RawMaterial,
    /// Finished modules and traded cells.
    Component,
    /// Weekly production cost indices.
    CostIndex,
}

/// Returned when a category code is not one of the known snake_case names.
#[derive(Debug, Error)]
#[error("unknown product category: {0}")]
pub struct UnknownCategoryError(pub String);

impl Category {
    /// Snake-case code as used in configuration files.
    pub fn code(self) -> &'static str {
        match self {
            Category::RawMaterial => "raw_material",
            Category::Component => "component",
            Category::CostIndex => "cost_index",
        }
    }

    /// Label written as the group comment inside the generated page block.
    pub fn label(self) -> &'static str {
        match self {
            Category::RawMaterial => "原材料",
            Category::Component => "组件",
            Category::CostIndex => "成本指数",
        }
    }

    /// Cost indices are published weekly rather than daily.
    pub fn is_weekly(self) -> bool {
        matches!(self, Category::CostIndex)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Category {
    type Err = UnknownCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "raw_material" => Ok(Category::RawMaterial),
            "component" => Ok(Category::Component),
            "cost_index" => Ok(Category::CostIndex),
            other => Err(UnknownCategoryError(other.to_string())),
        }
    }
}

/// One tracked price series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Short stable key, also the field name in the page's data block.
    pub key: String,
    /// The provider's identifier for this series.
    pub external_id: String,
    /// Human-readable name used in console output.
    pub display_name: String,
    pub category: Category,
    /// The run is aborted when a required product comes back empty.
    #[serde(default)]
    pub required: bool,
    /// Listed in the summary printed after a successful update.
    #[serde(default)]
    pub summary: bool,
}

impl Product {
    pub fn new(
        key: impl Into<String>,
        external_id: impl Into<String>,
        display_name: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            key: key.into(),
            external_id: external_id.into(),
            display_name: display_name.into(),
            category,
            required: false,
            summary: false,
        }
    }

    /// Marks the product as required for a run to proceed.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Marks the product for inclusion in the final summary.
    pub fn in_summary(mut self) -> Self {
        self.summary = true;
        self
    }
}
