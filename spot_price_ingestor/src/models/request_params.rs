use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Date format used by the provider's URL scheme and by [`PricePoint`](crate::models::price::PricePoint).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error)]
pub enum RequestParamsError {
    #[error("start date {start} is after end date {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },

    #[error("product id cannot be empty")]
    EmptyProductId,
}

/// Parameters for requesting the price history of one product.
///
/// This is the standard input for all
/// [`DataProvider`](crate::providers::DataProvider) implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRequestParams {
    /// The provider's identifier for the series (e.g. `"202512220022"`).
    pub product_id: String,

    /// First day of the requested window (inclusive).
    pub start: NaiveDate,

    /// Last day of the requested window (inclusive).
    pub end: NaiveDate,
}

impl HistoryRequestParams {
    pub fn new(
        product_id: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self, RequestParamsError> {
        let product_id = product_id.into().trim().to_string();
        if product_id.is_empty() {
            return Err(RequestParamsError::EmptyProductId);
        }
        if start > end {
            return Err(RequestParamsError::InvertedRange { start, end });
        }
        Ok(Self {
            product_id,
            start,
            end,
        })
    }

    pub fn start_str(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    pub fn end_str(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }
}
