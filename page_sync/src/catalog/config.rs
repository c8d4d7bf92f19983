//! Product catalog: parsing, normalization, and conversion to [`Product`]s.
//!
//! The catalog is a TOML-backed, ordered list of tracked products:
//! - Product keys (the field names used inside the page's data block)
//! - The provider's series identifier for each product
//! - A display name and a category (raw material, component, cost index)
//! - Flags marking products as required for a run, or listed in the summary
//!
//! Order matters: products are fetched in catalog order and written into the
//! page in catalog order, so a single list drives both.
//!
//! Key behaviors:
//! - Normalization trims keys, ids and names, parses categories
//!   case-insensitively into their canonical code, and rejects duplicate keys.
//! - Keys must be usable as bare JavaScript property names.
//! - A blank display name falls back to the key.
//!
//! Entrypoints:
//! - Normalize in place: [`normalize_catalog`]
//! - Parse + normalize from a TOML string: [`load_catalog_str`]
//! - Build the runtime list: [`Catalog::to_products`]

use std::collections::HashSet;

use anyhow::{Context, bail};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use spot_price_ingestor::models::product::{Category, Product};

/// Ordered map of product key -> configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Catalog {
    /// Product key -> configuration, in page order.
    pub products: IndexMap<String, ProductCfg>,
}

/// Configuration payload for one product key.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProductCfg {
    /// Provider series identifier (e.g., "202512220022").
    pub id: String,
    /// Human-readable name (e.g., "N型硅片-183mm").
    #[serde(default)]
    pub name: String,
    /// Category code: "raw_material", "component" or "cost_index".
    pub category: String,
    /// Abort the run when this product comes back empty.
    #[serde(default)]
    pub required: bool,
    /// Print the latest price of this product after a successful update.
    #[serde(default)]
    pub summary: bool,
}

/// Summary of changes performed during normalization.
#[derive(Debug, Default)]
pub struct NormalizationReport {
    /// Number of keys that changed when trimming.
    pub keys_trimmed: usize,
    /// Number of products whose blank name was replaced by the key.
    pub names_defaulted: usize,
    /// Provider ids that appear under more than one key.
    pub shared_ids: Vec<String>,
}

fn is_js_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Normalize a catalog in place.
///
/// What normalization does:
/// - Trims keys; rejects empty, non-identifier and duplicate keys
/// - Trims ids and rejects empty ones or ones containing `/`
/// - Parses and rewrites `category` to its canonical code
/// - Defaults blank names to the key
///
/// Errors:
/// - Empty catalog
/// - Any of the rejections above
pub fn normalize_catalog(cat: &mut Catalog) -> anyhow::Result<NormalizationReport> {
    let mut report = NormalizationReport::default();

    if cat.products.is_empty() {
        bail!("catalog must list at least one product");
    }

    let mut rebuilt: IndexMap<String, ProductCfg> = IndexMap::new();
    let mut seen_ids = HashSet::new();
    let old = std::mem::take(&mut cat.products);

    for (raw_key, mut cfg) in old {
        let key = raw_key.trim().to_string();
        if key.is_empty() {
            bail!("product key cannot be empty after trimming");
        }
        if !is_js_identifier(&key) {
            bail!("product key '{key}' is not a valid JavaScript identifier");
        }
        if key != raw_key {
            report.keys_trimmed += 1;
        }
        if rebuilt.contains_key(&key) {
            bail!("duplicate product key after normalization: {key}");
        }

        cfg.id = cfg.id.trim().to_string();
        if cfg.id.is_empty() {
            bail!("product '{key}' has an empty id");
        }
        if cfg.id.contains('/') {
            bail!("product '{key}' id '{}' must not contain '/'", cfg.id);
        }
        if !seen_ids.insert(cfg.id.clone()) {
            report.shared_ids.push(cfg.id.clone());
        }

        let category: Category = cfg
            .category
            .parse()
            .with_context(|| format!("product '{key}'"))?;
        cfg.category = category.code().to_string();

        cfg.name = cfg.name.trim().to_string();
        if cfg.name.is_empty() {
            cfg.name = key.clone();
            report.names_defaulted += 1;
        }

        rebuilt.insert(key, cfg);
    }

    cat.products = rebuilt;
    Ok(report)
}

/// Parse and normalize a catalog from a TOML string.
///
/// Errors:
/// - TOML parse failures
/// - Normalization errors (see [`normalize_catalog`])
pub fn load_catalog_str(toml_str: &str) -> anyhow::Result<Catalog> {
    let mut cat: Catalog = toml::from_str(toml_str).context("failed to parse catalog TOML")?;
    normalize_catalog(&mut cat).context("normalize_catalog failed")?;
    Ok(cat)
}

impl Catalog {
    /// Builds the runtime product list, in catalog order.
    ///
    /// Expects a normalized catalog; categories are parsed again so an
    /// unnormalized one still errors instead of panicking.
    pub fn to_products(&self) -> anyhow::Result<Vec<Product>> {
        self.products
            .iter()
            .map(|(key, cfg)| {
                let category: Category = cfg
                    .category
                    .parse()
                    .with_context(|| format!("product '{key}'"))?;
                Ok(Product {
                    key: key.clone(),
                    external_id: cfg.id.clone(),
                    display_name: cfg.name.clone(),
                    category,
                    required: cfg.required,
                    summary: cfg.summary,
                })
            })
            .collect()
    }
}
