//! Fetches spot price histories from market data providers and normalizes
//! them into date-sorted [`PriceSeries`](models::price::PriceSeries).

#[cfg(feature = "cli")]
pub mod cli;
pub mod models;
pub mod providers;
