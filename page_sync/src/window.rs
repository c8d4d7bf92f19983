//! Fetch windows per product category.

use chrono::{Days, NaiveDate};
use spot_price_ingestor::models::{
    product::{Category, Product},
    request_params::{HistoryRequestParams, RequestParamsError},
};

pub const DEFAULT_SPOT_DAYS: u32 = 45;
pub const DEFAULT_COST_INDEX_DAYS: u32 = 90;

/// Date windows for one run. All windows end on the run date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchWindows {
    pub end: NaiveDate,
    /// Start for daily spot series.
    pub spot_start: NaiveDate,
    /// Start for weekly cost indices, which need a longer lookback.
    pub cost_index_start: NaiveDate,
}

impl FetchWindows {
    pub fn new(today: NaiveDate, spot_days: u32, cost_index_days: u32) -> Self {
        let back = |days: u32| {
            today
                .checked_sub_days(Days::new(u64::from(days)))
                .unwrap_or(NaiveDate::MIN)
        };
        Self {
            end: today,
            spot_start: back(spot_days),
            cost_index_start: back(cost_index_days),
        }
    }

    /// Window start for a product category.
    pub fn start_for(&self, category: Category) -> NaiveDate {
        if category.is_weekly() {
            self.cost_index_start
        } else {
            self.spot_start
        }
    }

    /// Request parameters for one product.
    pub fn params_for(&self, product: &Product) -> Result<HistoryRequestParams, RequestParamsError> {
        HistoryRequestParams::new(
            product.external_id.clone(),
            self.start_for(product.category),
            self.end,
        )
    }
}
