//! Candles recorded as JSON files, one file per symbol and interval.
//!
//! The directory layout is `<dir>/<SYMBOL>_<interval>.json`, e.g.
//! `fixtures/BTCUSDT_4h.json`, each file holding a JSON array of
//! [`Candle`]s.

use std::{
    io::ErrorKind,
    path::PathBuf,
};

use async_trait::async_trait;
use snafu::ResultExt;
use tracing::debug;

use crate::{
    models::{
        candle::{Candle, CandleSeries},
        interval::Interval,
        request_params::CandleRequest,
    },
    providers::{CandleProvider, IoSnafu, JsonSnafu, NotFoundSnafu, ProviderError, normalize_symbol},
};

#[derive(Debug, Clone)]
pub struct FixtureProvider {
    dir: PathBuf,
}

impl FixtureProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file holding `symbol` candles at `interval`.
    pub fn fixture_path(&self, symbol: &str, interval: Interval) -> PathBuf {
        self.dir
            .join(format!("{}_{}.json", normalize_symbol(symbol), interval))
    }
}

/// Splits `BTCUSDT_4h.json` into its symbol, ignoring names that do not
/// follow the layout.
fn symbol_from_file_name(name: &str) -> Option<&str> {
    let stem = name.strip_suffix(".json")?;
    let (symbol, interval) = stem.rsplit_once('_')?;
    interval.parse::<Interval>().ok()?;
    (!symbol.is_empty()).then_some(symbol)
}

#[async_trait]
impl CandleProvider for FixtureProvider {
    async fn list_symbols(&self, quote_asset: &str) -> Result<Vec<String>, ProviderError> {
        let quote = normalize_symbol(quote_asset);
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .context(IoSnafu { path: &self.dir })?;

        let mut symbols = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .context(IoSnafu { path: &self.dir })?
        {
            let file_name = entry.file_name();
            let Some(symbol) = file_name.to_str().and_then(symbol_from_file_name) else {
                continue;
            };
            if symbol.ends_with(&quote) && symbol.len() > quote.len() {
                symbols.push(symbol.to_string());
            }
        }

        symbols.sort();
        symbols.dedup();
        Ok(symbols)
    }

    async fn fetch_candles(&self, request: CandleRequest) -> Result<CandleSeries, ProviderError> {
        let symbol = normalize_symbol(&request.symbol);
        let path = self.fixture_path(&symbol, request.interval);

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return NotFoundSnafu {
                    symbol,
                    interval: request.interval,
                }
                .fail();
            }
            Err(e) => return Err(e).context(IoSnafu { path }),
        };

        let mut candles: Vec<Candle> =
            serde_json::from_str(&content).context(JsonSnafu { path: &path })?;
        candles.sort_by_key(|c| c.timestamp);

        // Keep the most recent `limit` candles, as an exchange would.
        let skip = candles.len().saturating_sub(request.limit as usize);
        candles.drain(..skip);

        debug!(symbol = %symbol, path = %path.display(), count = candles.len(), "Loaded fixture candles");
        Ok(CandleSeries::new(symbol, request.interval, candles))
    }
}
