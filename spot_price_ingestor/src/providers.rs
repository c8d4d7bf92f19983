//! Provider abstraction for spot price sources.
//!
//! This module defines the [`DataProvider`] trait, the interface for fetching
//! the daily price history of one product from a data vendor (e.g. SMM).
//!
//! Each concrete provider implements [`DataProvider`] to handle vendor-specific
//! URL schemes, headers and response shapes, and returns a normalized
//! [`PriceSeries`].
//!
//! Callers that must never fail on a single product use [`fetch_or_empty`],
//! which logs the provider error and degrades to an empty series.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use spot_price_ingestor::models::{
//!     price::PriceSeries,
//!     request_params::HistoryRequestParams,
//! };
//! use spot_price_ingestor::providers::{DataProvider, ProviderError};
//!
//! struct MyProvider;
//!
//! #[async_trait]
//! impl DataProvider for MyProvider {
//!     async fn fetch_history(
//!         &self,
//!         _params: &HistoryRequestParams,
//!     ) -> Result<PriceSeries, ProviderError> {
//!         Ok(PriceSeries::empty())
//!     }
//! }
//! ```
//!

pub mod smm_rest;

use async_trait::async_trait;
use snafu::{Backtrace, Snafu};
use tracing::warn;

use crate::models::{price::PriceSeries, request_params::HistoryRequestParams};

/// Trait for fetching the price history of a product from a data provider.
///
/// Supports dynamic dispatch (`&dyn DataProvider`) so the orchestrating code
/// and its tests can swap implementations.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Fetches the price history for the given product and date window.
    ///
    /// # Returns
    ///
    /// * `Ok(PriceSeries)` - Observations sorted ascending by date (possibly empty).
    /// * `Err(ProviderError)` - Transport, HTTP status or payload problems.
    async fn fetch_history(
        &self,
        params: &HistoryRequestParams,
    ) -> Result<PriceSeries, ProviderError>;
}

/// Errors that can occur during the creation of a provider instance
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// A configured header value contains invalid characters.
    #[snafu(display("Invalid value for header {name}"))]
    InvalidHeader {
        name: &'static str,
        source: reqwest::header::InvalidHeaderValue,
        backtrace: Backtrace,
    },

    /// The base URL is not an http(s) URL.
    #[snafu(display("Invalid base URL: {base_url}"))]
    InvalidBaseUrl {
        base_url: String,
        backtrace: Backtrace,
    },
}

/// Errors that can occur within a `DataProvider` implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// An error during an API request (e.g., network failure, timeout, undecodable body).
    #[snafu(display("API request failed: {source}"))]
    Reqwest {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The server answered with a non-success HTTP status.
    #[snafu(display("HTTP error: {status}"))]
    HttpStatus {
        status: u16,
        backtrace: Backtrace,
    },

    /// The provider's payload reported a failure status.
    #[snafu(display("API error: {message}"))]
    Api {
        message: String,
        backtrace: Backtrace,
    },

    /// A record in the payload could not be interpreted.
    #[snafu(display("Malformed record: {message}"))]
    MalformedRecord {
        message: String,
        backtrace: Backtrace,
    },
}

/// Fetches a product's history, degrading every failure to an empty series.
///
/// A single product failing must not abort a refresh, so errors are logged
/// here and never returned.
pub async fn fetch_or_empty(
    provider: &dyn DataProvider,
    params: &HistoryRequestParams,
) -> PriceSeries {
    match provider.fetch_history(params).await {
        Ok(series) => series,
        Err(ProviderError::Api { message, .. }) => {
            warn!(product_id = %params.product_id, "provider returned an unexpected status: {message}");
            PriceSeries::empty()
        }
        Err(e) => {
            warn!(product_id = %params.product_id, error = %e, "fetch failed");
            PriceSeries::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::models::price::PricePoint;

    use super::*;

    struct FixedProvider;
    struct FailingProvider;

    #[async_trait]
    impl DataProvider for FixedProvider {
        async fn fetch_history(
            &self,
            params: &HistoryRequestParams,
        ) -> Result<PriceSeries, ProviderError> {
            Ok(PriceSeries::from_points(vec![PricePoint::new(
                params.end_str(),
                1.0,
            )]))
        }
    }

    #[async_trait]
    impl DataProvider for FailingProvider {
        async fn fetch_history(
            &self,
            _params: &HistoryRequestParams,
        ) -> Result<PriceSeries, ProviderError> {
            HttpStatusSnafu { status: 404u16 }.fail()
        }
    }

    // Decides at runtime which provider to hand back.
    fn get_provider(name: &str) -> Box<dyn DataProvider> {
        if name == "fixed" {
            Box::new(FixedProvider)
        } else {
            Box::new(FailingProvider)
        }
    }

    fn params() -> HistoryRequestParams {
        let day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        HistoryRequestParams::new("202303220001", day, day).unwrap()
    }

    #[tokio::test]
    async fn test_dynamic_provider() {
        let provider = get_provider("fixed");
        let series = fetch_or_empty(provider.as_ref(), &params()).await;
        assert_eq!(series.len(), 1);
        assert_eq!(series.latest().unwrap().date, "2025-03-01");
    }

    #[tokio::test]
    async fn errors_degrade_to_empty_series() {
        let provider = get_provider("failing");
        assert!(provider.fetch_history(&params()).await.is_err());
        let series = fetch_or_empty(provider.as_ref(), &params()).await;
        assert!(series.is_empty());
    }
}
