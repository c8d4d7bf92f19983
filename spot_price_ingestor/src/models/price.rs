//! Normalized price observations.
//!
//! Whatever fields a provider reports (average, low/high band, ...), the
//! pipeline only carries a date and a single price per observation.

use serde::{Deserialize, Serialize};

/// A single observation: the ISO date (`YYYY-MM-DD`) and the resolved price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: String,
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: impl Into<String>, price: f64) -> Self {
        Self {
            date: date.into(),
            price,
        }
    }
}

/// Price observations for one product, ascending by date.
///
/// Dates are zero-padded ISO strings, so lexicographic order is chronological.
/// Duplicate dates are kept in the order the provider sent them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// An empty series, used whenever a fetch yields nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a series from points in any order.
    pub fn from_points(mut points: Vec<PricePoint>) -> Self {
        // stable: duplicates keep their arrival order
        points.sort_by(|a, b| a.date.cmp(&b.date));
        Self { points }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PricePoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The most recent observation, if any.
    pub fn latest(&self) -> Option<&PricePoint> {
        self.points.last()
    }
}

impl<'a> IntoIterator for &'a PriceSeries {
    type Item = &'a PricePoint;
    type IntoIter = std::slice::Iter<'a, PricePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
