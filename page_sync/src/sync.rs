//! One refresh run: fetch every product, check the required ones, write the page.
//!
//! ## Flow
//! 1. For each product, in catalog order, fetch its window
//!    ([`FetchWindows::params_for`]). Failures degrade to "no data" for that
//!    product only.
//! 2. If any required product has no data, stop with
//!    [`SyncError::MissingData`]. The sink is not touched.
//! 3. Hand the collected [`DataSet`] to the sink, stamped with the run date.
//!
//! Fetches are sequential, one request in flight at a time.

use spot_price_ingestor::{
    models::{data_set::DataSet, product::Product, request_params::RequestParamsError},
    providers::{DataProvider, fetch_or_empty},
};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    render::format_price,
    sink::{DataSink, SinkError},
    window::FetchWindows,
};

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("required products returned no data: {}", missing.join(", "))]
    MissingData { missing: Vec<String> },
    #[error("invalid fetch window for '{key}'")]
    Window {
        key: String,
        source: RequestParamsError,
    },
    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Result of a successful run.
#[derive(Debug)]
pub struct SyncReport<T> {
    /// Run date written into the page.
    pub update_date: String,
    pub data: DataSet,
    /// Whatever the sink returned.
    pub output: T,
}

/// Fetches every product. Products that fail or return nothing are absent
/// from the result.
pub async fn collect_data(
    provider: &dyn DataProvider,
    products: &[Product],
    windows: &FetchWindows,
) -> Result<DataSet, SyncError> {
    let mut data = DataSet::new();
    for product in products {
        let params = windows.params_for(product).map_err(|source| SyncError::Window {
            key: product.key.clone(),
            source,
        })?;
        info!(
            key = %product.key,
            id = %params.product_id,
            start = %params.start_str(),
            end = %params.end_str(),
            "fetching {}",
            product.display_name
        );

        let series = fetch_or_empty(provider, &params).await;
        match series.latest() {
            Some(latest) => {
                info!(
                    key = %product.key,
                    points = series.len(),
                    "latest {} = {}",
                    latest.date,
                    format_price(latest.price)
                );
                data.insert(product.key.clone(), series);
            }
            None => warn!(key = %product.key, "no data for {}", product.display_name),
        }
    }
    Ok(data)
}

/// Fails with [`SyncError::MissingData`] if a required product has no data.
pub fn check_required(products: &[Product], data: &DataSet) -> Result<(), SyncError> {
    let missing = data.missing(
        products
            .iter()
            .filter(|p| p.required)
            .map(|p| p.key.as_str()),
    );
    if missing.is_empty() {
        Ok(())
    } else {
        Err(SyncError::MissingData { missing })
    }
}

/// Runs one refresh against `sink`.
pub async fn run_sync<S: DataSink>(
    provider: &dyn DataProvider,
    sink: &S,
    products: &[Product],
    windows: &FetchWindows,
) -> Result<SyncReport<S::Output>, SyncError> {
    info!(
        spot_start = %windows.spot_start,
        cost_index_start = %windows.cost_index_start,
        end = %windows.end,
        products = products.len(),
        "starting refresh"
    );

    let data = collect_data(provider, products, windows).await?;
    check_required(products, &data)?;

    let update_date = windows.end.format("%Y-%m-%d").to_string();
    let output = sink.write(&data, &update_date).await?;

    Ok(SyncReport {
        update_date,
        data,
        output,
    })
}

/// Latest price of each summary product, one line each, e.g.
/// `N型硅片-183mm: 1.2000 (2024-06-01)`. Products without data are skipped.
pub fn summary_lines(products: &[Product], data: &DataSet) -> Vec<String> {
    products
        .iter()
        .filter(|p| p.summary)
        .filter_map(|p| {
            data.latest(&p.key)
                .map(|latest| format!("{}: {:.4} ({})", p.display_name, latest.price, latest.date))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use spot_price_ingestor::models::{
        price::{PricePoint, PriceSeries},
        product::Category,
    };

    fn products() -> Vec<Product> {
        vec![
            Product::new("silver", "1", "银浆", Category::RawMaterial)
                .required()
                .in_summary(),
            Product::new("wafer", "2", "硅片", Category::RawMaterial).required(),
            Product::new("topconSemi", "3", "成本指数", Category::CostIndex).in_summary(),
        ]
    }

    fn one(date: &str, price: f64) -> PriceSeries {
        PriceSeries::from_points(vec![PricePoint::new(date, price)])
    }

    #[test]
    fn required_check_lists_missing_in_catalog_order() {
        let mut data = DataSet::new();
        data.insert("topconSemi", one("2024-06-01", 1.0));
        data.insert("wafer", PriceSeries::empty());

        match check_required(&products(), &data) {
            Err(SyncError::MissingData { missing }) => assert_eq!(missing, ["silver", "wafer"]),
            other => panic!("unexpected: {other:?}"),
        }

        data.insert("silver", one("2024-06-01", 7.5));
        data.insert("wafer", one("2024-06-01", 1.2));
        assert!(check_required(&products(), &data).is_ok());
    }

    #[test]
    fn summary_uses_four_decimals_and_skips_empty() {
        let mut data = DataSet::new();
        data.insert("silver", one("2024-05-31", 7715.0));
        data.insert("wafer", one("2024-05-31", 1.2));

        assert_eq!(
            summary_lines(&products(), &data),
            ["银浆: 7715.0000 (2024-05-31)"]
        );
    }

    #[test]
    fn missing_data_message_names_keys() {
        let err = SyncError::MissingData {
            missing: vec!["silicon".into(), "cell".into()],
        };
        assert_eq!(
            err.to_string(),
            "required products returned no data: silicon, cell"
        );
    }
}
