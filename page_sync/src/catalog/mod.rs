//! Catalog subsystem.
//!
//! The product catalog is the single ordered list of tracked products. See
//! [`crate::catalog::config`] for the TOML model and normalization helpers.

pub mod config;

pub use config::{Catalog, ProductCfg, load_catalog_str, normalize_catalog};
