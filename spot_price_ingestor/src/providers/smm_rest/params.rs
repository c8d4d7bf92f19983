use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::request_params::HistoryRequestParams;

pub const DEFAULT_BASE_URL: &str = "https://hq.smm.cn";
pub const DEFAULT_REFERER: &str = "https://hq.smm.cn/";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client settings for the SMM provider.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SmmClientOptions {
    /// Scheme and host, without the `/ajax/...` path.
    pub base_url: String,
    pub user_agent: String,
    pub referer: String,
    /// Upper bound for a single request, connect to last byte.
    pub timeout: Duration,
    /// Skip TLS certificate validation for this provider's client only.
    ///
    /// SMM's certificate chain does not validate against common root stores.
    /// Turning this on exposes the fetch to interception; the page update is
    /// the only consumer of the data.
    pub accept_invalid_certs: bool,
}

impl Default for SmmClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            referer: DEFAULT_REFERER.to_string(),
            timeout: DEFAULT_TIMEOUT,
            accept_invalid_certs: false,
        }
    }
}

/// Builds the history URL for one product and window.
pub fn history_url(base_url: &str, params: &HistoryRequestParams) -> String {
    format!(
        "{}/ajax/spot/history/{}/{}/{}",
        base_url.trim_end_matches('/'),
        params.product_id,
        params.start_str(),
        params.end_str()
    )
}
