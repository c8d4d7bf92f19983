//! Run configuration for `page-sync`.
//!
//! One TOML file carries everything a run needs:
//! - `timezone`: optional IANA zone deciding "today"
//! - `[provider]`: SMM client settings
//! - `[windows]`: lookback days for spot series and cost indices
//! - `[page]`: the HTML document to rewrite
//! - `[products.<key>]`: the ordered product catalog (see [`crate::catalog`])
//!
//! The shipped defaults are compiled in ([`DEFAULT_CONFIG`]), so the binary
//! runs without a config file. Environment overrides are applied on top by
//! [`apply_env_overrides`].

use std::{path::Path, time::Duration};

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use shared_utils::env::get_env_var_opt;
use spot_price_ingestor::providers::smm_rest::{
    SmmClientOptions,
    params::{DEFAULT_BASE_URL, DEFAULT_REFERER, DEFAULT_USER_AGENT, DEFAULT_TIMEOUT},
};
use tracing::debug;

use crate::{
    catalog::{Catalog, normalize_catalog},
    window::{DEFAULT_COST_INDEX_DAYS, DEFAULT_SPOT_DAYS},
};

/// Built-in configuration, identical to `config/page_sync.toml`.
pub const DEFAULT_CONFIG: &str = include_str!("../config/page_sync.toml");

/// Overrides `[page].path`.
pub const PAGE_PATH_ENV: &str = "SMM_PAGE_PATH";
/// Overrides `[provider].base_url`.
pub const BASE_URL_ENV: &str = "SMM_BASE_URL";

#[derive(Debug, Deserialize, Serialize)]
pub struct SyncConfig {
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub provider: ProviderSection,
    #[serde(default)]
    pub windows: WindowSection,
    #[serde(default)]
    pub page: PageSection,
    #[serde(flatten)]
    pub catalog: Catalog,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderSection {
    pub base_url: String,
    pub referer: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub accept_invalid_certs: bool,
}

impl Default for ProviderSection {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            referer: DEFAULT_REFERER.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            accept_invalid_certs: false,
        }
    }
}

impl ProviderSection {
    pub fn to_client_options(&self) -> SmmClientOptions {
        SmmClientOptions {
            base_url: self.base_url.clone(),
            user_agent: self.user_agent.clone(),
            referer: self.referer.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            accept_invalid_certs: self.accept_invalid_certs,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowSection {
    pub spot_days: u32,
    pub cost_index_days: u32,
}

impl Default for WindowSection {
    fn default() -> Self {
        Self {
            spot_days: DEFAULT_SPOT_DAYS,
            cost_index_days: DEFAULT_COST_INDEX_DAYS,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageSection {
    pub path: String,
    /// Fail instead of skipping when the page has no data block.
    pub require_block: bool,
}

impl Default for PageSection {
    fn default() -> Self {
        Self {
            path: "index.html".to_string(),
            require_block: false,
        }
    }
}

fn validate(cfg: &mut SyncConfig) -> anyhow::Result<()> {
    if cfg.windows.spot_days == 0 || cfg.windows.cost_index_days == 0 {
        bail!("window lengths must be at least one day");
    }
    if cfg.provider.timeout_secs == 0 {
        bail!("provider timeout must be at least one second");
    }
    if cfg.page.path.trim().is_empty() {
        bail!("page path cannot be empty");
    }
    let report = normalize_catalog(&mut cfg.catalog).context("invalid product catalog")?;
    if !report.shared_ids.is_empty() {
        debug!(ids = ?report.shared_ids, "provider ids shared between product keys");
    }
    Ok(())
}

/// Parse and validate a configuration from a TOML string.
pub fn load_config_str(toml_str: &str) -> anyhow::Result<SyncConfig> {
    let mut cfg: SyncConfig = toml::from_str(toml_str).context("failed to parse config TOML")?;
    validate(&mut cfg)?;
    Ok(cfg)
}

/// Read, parse and validate a configuration file.
pub fn load_config_path(path: &Path) -> anyhow::Result<SyncConfig> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    load_config_str(&s).with_context(|| format!("in config {}", path.display()))
}

/// The built-in configuration.
pub fn default_config() -> anyhow::Result<SyncConfig> {
    load_config_str(DEFAULT_CONFIG)
}

/// Apply `SMM_PAGE_PATH` and `SMM_BASE_URL` when set and non-blank.
pub fn apply_env_overrides(cfg: &mut SyncConfig) {
    if let Some(path) = get_env_var_opt(PAGE_PATH_ENV) {
        debug!(%path, "page path from environment");
        cfg.page.path = path;
    }
    if let Some(url) = get_env_var_opt(BASE_URL_ENV) {
        debug!(%url, "provider base url from environment");
        cfg.provider.base_url = url;
    }
}
