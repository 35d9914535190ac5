//! Provider abstraction for candle data sources.
//!
//! This module defines the [`CandleProvider`] trait, the single interface the
//! scanner uses to list tradable symbols and to fetch recent candles. Concrete
//! sources implement it:
//!
//! - [`binance::BinanceProvider`] talks to the Binance spot REST API.
//! - [`fixture::FixtureProvider`] reads JSON files from a directory, for offline
//!   runs and tests.
//!
//! The trait is async and object safe, so the scanner holds an
//! `Arc<dyn CandleProvider>` chosen at runtime from configuration.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use divergence_scanner::models::{candle::CandleSeries, request_params::CandleRequest};
//! use divergence_scanner::providers::{CandleProvider, ProviderError};
//!
//! struct EmptyProvider;
//!
//! #[async_trait]
//! impl CandleProvider for EmptyProvider {
//!     async fn list_symbols(&self, _quote_asset: &str) -> Result<Vec<String>, ProviderError> {
//!         Ok(vec![])
//!     }
//!
//!     async fn fetch_candles(&self, request: CandleRequest) -> Result<CandleSeries, ProviderError> {
//!         Ok(CandleSeries::new(request.symbol, request.interval, vec![]))
//!     }
//! }
//! ```

pub mod binance;
pub mod fixture;

use std::path::PathBuf;

use async_trait::async_trait;
use snafu::{Backtrace, Snafu};

use crate::models::{candle::CandleSeries, interval::Interval, request_params::CandleRequest};

/// Source of candle data for the scanner.
#[async_trait]
pub trait CandleProvider: Send + Sync {
    /// Lists the tradable symbols quoted in `quote_asset` (e.g. `"USDT"`).
    async fn list_symbols(&self, quote_asset: &str) -> Result<Vec<String>, ProviderError>;

    /// Fetches the most recent `request.limit` candles, oldest first.
    async fn fetch_candles(&self, request: CandleRequest) -> Result<CandleSeries, ProviderError>;
}

/// Canonical exchange form of a symbol: `"btc/usdt"` → `"BTCUSDT"`.
pub fn normalize_symbol(symbol: &str) -> String {
    symbol
        .trim()
        .chars()
        .filter(|c| *c != '/' && !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// Errors that can occur during the creation of a provider instance.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// Failed to init the reqwest client.
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// API key contains characters that are not valid in a header.
    #[snafu(display("Invalid API key format: {source}"))]
    InvalidApiKey {
        source: reqwest::header::InvalidHeaderValue,
        backtrace: Backtrace,
    },
}

/// Errors that can occur within a `CandleProvider` implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// An error during an API request (e.g. network failure, timeout).
    #[snafu(display("API request failed: {source}"))]
    Reqwest {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The exchange answered with a non-success status.
    #[snafu(display("API error (HTTP {status}): {message}"))]
    Api {
        status: u16,
        message: String,
        backtrace: Backtrace,
    },

    /// The response could not be turned into candles.
    #[snafu(display("Malformed response: {message}"))]
    Decode {
        message: String,
        backtrace: Backtrace,
    },

    /// The request parameters were invalid for this specific provider.
    #[snafu(display("Invalid parameters for provider: {message}"))]
    Validation {
        message: String,
        backtrace: Backtrace,
    },

    /// The provider has no data for this symbol and interval.
    #[snafu(display("No {interval} data for {symbol}"))]
    NotFound {
        symbol: String,
        interval: Interval,
        backtrace: Backtrace,
    },

    #[snafu(display("Failed to read {}: {source}", path.display()))]
    Io {
        path: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },

    #[snafu(display("Failed to parse {}: {source}", path.display()))]
    Json {
        path: PathBuf,
        source: serde_json::Error,
        backtrace: Backtrace,
    },
}

impl ProviderError {
    /// Whether repeating the same request may succeed: timeouts, connection
    /// failures, rate limiting and server-side errors.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::Reqwest { source, .. } => source.is_timeout() || source.is_connect(),
            ProviderError::Api { status, .. } => *status == 429 || (500..600).contains(status),
            _ => false,
        }
    }
}
