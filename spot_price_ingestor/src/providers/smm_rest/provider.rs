use async_trait::async_trait;
use reqwest::{Client, header};
use snafu::ResultExt;
use tracing::{debug, warn};

use crate::{
    models::{price::PriceSeries, request_params::HistoryRequestParams},
    providers::{
        ClientBuildSnafu, DataProvider, HttpStatusSnafu, InvalidBaseUrlSnafu, InvalidHeaderSnafu,
        ProviderError, ProviderInitError, ReqwestSnafu,
        smm_rest::{
            params::{SmmClientOptions, history_url},
            response::SmmResponse,
        },
    },
};

pub struct SmmProvider {
    client: Client,
    base_url: String,
}

impl SmmProvider {
    /// Creates a provider with explicit client options.
    ///
    /// The browser-like headers are installed as client defaults so every
    /// request carries them.
    pub fn with_options(options: SmmClientOptions) -> Result<Self, ProviderInitError> {
        let base_url = options.base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return InvalidBaseUrlSnafu { base_url }.fail();
        }

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::REFERER,
            header::HeaderValue::from_str(&options.referer)
                .context(InvalidHeaderSnafu { name: "Referer" })?,
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(&options.user_agent)
                .context(InvalidHeaderSnafu { name: "User-Agent" })?,
        );

        if options.accept_invalid_certs {
            warn!(%base_url, "TLS certificate validation is disabled for this provider");
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(options.timeout)
            .danger_accept_invalid_certs(options.accept_invalid_certs)
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl DataProvider for SmmProvider {
    async fn fetch_history(
        &self,
        params: &HistoryRequestParams,
    ) -> Result<PriceSeries, ProviderError> {
        let url = history_url(&self.base_url, params);
        debug!(%url, "requesting price history");

        let response = self.client.get(&url).send().await.context(ReqwestSnafu)?;

        let status = response.status();
        if !status.is_success() {
            return HttpStatusSnafu {
                status: status.as_u16(),
            }
            .fail();
        }

        let body = response
            .json::<SmmResponse>()
            .await
            .context(ReqwestSnafu)?;

        let series = body.into_series()?;
        debug!(product_id = %params.product_id, points = series.len(), "parsed price history");
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_http_base_url() {
        let options = SmmClientOptions {
            base_url: "hq.smm.cn".into(),
            ..Default::default()
        };
        assert!(matches!(
            SmmProvider::with_options(options),
            Err(ProviderInitError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn rejects_header_with_newline() {
        let options = SmmClientOptions {
            referer: "https://hq.smm.cn/\n".into(),
            ..Default::default()
        };
        assert!(matches!(
            SmmProvider::with_options(options),
            Err(ProviderInitError::InvalidHeader { name: "Referer", .. })
        ));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let options = SmmClientOptions {
            base_url: "https://hq.smm.cn/".into(),
            ..Default::default()
        };
        let provider = SmmProvider::with_options(options).unwrap();
        assert_eq!(provider.base_url(), "https://hq.smm.cn");
    }
}
