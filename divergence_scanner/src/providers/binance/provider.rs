use std::{num::NonZeroU32, time::Duration};

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use nonzero_ext::nonzero;
use reqwest::{Client, header};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use shared_utils::env::get_optional_env_var;
use snafu::ResultExt;
use tracing::{debug, warn};

use crate::{
    models::{candle::CandleSeries, request_params::CandleRequest},
    providers::{
        ApiSnafu, CandleProvider, ClientBuildSnafu, InvalidApiKeySnafu, ProviderError,
        ProviderInitError, ReqwestSnafu, normalize_symbol,
        binance::{
            params::{construct_kline_params, validate_limit},
            response::{BinanceErrorBody, BinanceKline, ExchangeInfo},
        },
    },
};

pub const BASE_URL: &str = "https://api.binance.com";
const API_KEY_ENV: &str = "BINANCE_API_KEY";
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// Connection and pacing settings for [`BinanceProvider`].
#[derive(Debug, Clone)]
pub struct BinanceSettings {
    pub base_url: String,
    /// Client-side cap on outgoing requests.
    pub requests_per_second: NonZeroU32,
    /// Extra attempts for retryable failures.
    pub max_retries: u32,
    /// Backoff before the first retry; doubled on each further attempt.
    pub base_delay: Duration,
    /// Timeout of a single HTTP request.
    pub request_timeout: Duration,
    /// Sent as `X-MBX-APIKEY` when present. Public market data works without it.
    pub api_key: Option<SecretString>,
}

impl Default for BinanceSettings {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            requests_per_second: nonzero!(10u32),
            max_retries: 3,
            base_delay: Duration::from_millis(500),
            request_timeout: Duration::from_secs(10),
            api_key: get_optional_env_var(API_KEY_ENV).map(|key| SecretString::new(key.into())),
        }
    }
}

pub struct BinanceProvider {
    client: Client,
    base_url: String,
    limiter: DefaultDirectRateLimiter,
    max_retries: u32,
    base_delay: Duration,
}

impl BinanceProvider {
    /// Creates a provider against the public Binance endpoint with default settings.
    ///
    /// Reads the optional API key from the `BINANCE_API_KEY` environment variable.
    pub fn new() -> Result<Self, ProviderInitError> {
        Self::with_settings(BinanceSettings::default())
    }

    pub fn with_settings(settings: BinanceSettings) -> Result<Self, ProviderInitError> {
        let mut headers = header::HeaderMap::new();
        if let Some(key) = &settings.api_key {
            let mut value =
                header::HeaderValue::from_str(key.expose_secret()).context(InvalidApiKeySnafu)?;
            value.set_sensitive(true);
            headers.insert(API_KEY_HEADER, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(settings.request_timeout)
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            limiter: RateLimiter::direct(Quota::per_second(settings.requests_per_second)),
            max_retries: settings.max_retries,
            base_delay: settings.base_delay,
        })
    }

    /// GETs `path` and decodes the JSON body, retrying retryable failures with
    /// exponential backoff.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, ProviderError> {
        let url = format!("{}{}", self.base_url, path);
        let mut attempt = 0;

        loop {
            self.limiter.until_ready().await;
            match self.send(&url, query).await {
                Ok(body) => return Ok(body),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    let delay = self.base_delay.saturating_mul(2u32.saturating_pow(attempt));
                    attempt += 1;
                    warn!(
                        url = %url,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Retrying Binance request"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> Result<T, ProviderError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .context(ReqwestSnafu)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown API error".to_string());
            let message = match serde_json::from_str::<BinanceErrorBody>(&body) {
                Ok(err) => format!("{} (code {})", err.msg, err.code),
                Err(_) => body,
            };
            return ApiSnafu {
                status: status.as_u16(),
                message,
            }
            .fail();
        }

        response.json::<T>().await.context(ReqwestSnafu)
    }
}

#[async_trait]
impl CandleProvider for BinanceProvider {
    async fn list_symbols(&self, quote_asset: &str) -> Result<Vec<String>, ProviderError> {
        let quote = normalize_symbol(quote_asset);
        let info: ExchangeInfo = self.get_json("/api/v3/exchangeInfo", &[]).await?;

        let symbols: Vec<String> = info
            .symbols
            .into_iter()
            .filter(|s| s.is_trading() && s.quote_asset == quote)
            .map(|s| s.symbol)
            .collect();

        debug!(quote = %quote, count = symbols.len(), "Listed Binance symbols");
        Ok(symbols)
    }

    async fn fetch_candles(&self, request: CandleRequest) -> Result<CandleSeries, ProviderError> {
        validate_limit(request.limit)?;

        let query = construct_kline_params(&request);
        let rows: Vec<BinanceKline> = self.get_json("/api/v3/klines", &query).await?;
        let candles = rows
            .into_iter()
            .map(BinanceKline::into_candle)
            .collect::<Result<Vec<_>, _>>()?;

        let symbol = normalize_symbol(&request.symbol);
        debug!(symbol = %symbol, interval = %request.interval, count = candles.len(), "Fetched klines");
        Ok(CandleSeries::new(symbol, request.interval, candles))
    }
}
