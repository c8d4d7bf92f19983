//! Per-run collection of fetched series keyed by product key.

use indexmap::IndexMap;

use crate::models::price::{PricePoint, PriceSeries};

/// Series gathered during one fetch pass, in fetch order.
///
/// Only products that returned data are stored; a product with no entry is
/// treated as an empty series by consumers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataSet {
    series: IndexMap<String, PriceSeries>,
}

impl DataSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores (or replaces) the series for `key`.
    pub fn insert(&mut self, key: impl Into<String>, series: PriceSeries) {
        self.series.insert(key.into(), series);
    }

    pub fn get(&self, key: &str) -> Option<&PriceSeries> {
        self.series.get(key)
    }

    /// Latest observation for `key`, if the product has any data.
    pub fn latest(&self, key: &str) -> Option<&PricePoint> {
        self.series.get(key).and_then(PriceSeries::latest)
    }

    /// `true` if `key` has at least one observation.
    pub fn has_data(&self, key: &str) -> bool {
        self.series.get(key).is_some_and(|s| !s.is_empty())
    }

    /// Keys from `required` that are absent or empty, in the order given.
    pub fn missing<'a, I>(&self, required: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        required
            .into_iter()
            .filter(|k| !self.has_data(k))
            .map(str::to_string)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, PriceSeries> {
        self.series.iter()
    }
}
