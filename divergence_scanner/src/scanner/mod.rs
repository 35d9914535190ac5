//! Scan driver: fetch → indicators → divergence, for many symbols.
//!
//! Symbols are independent, so they are processed concurrently up to
//! [`ScanSettings::concurrency`]. A failing or slow symbol is recorded in the
//! [`ScanReport`] and never aborts the rest of the scan.

pub mod report;

use std::{sync::Arc, time::Duration};

use futures::{StreamExt, stream};
use indexmap::IndexSet;
use tracing::{debug, info, warn};

use crate::{
    divergence::DivergenceDetector,
    indicators::IndicatorSource,
    models::{interval::Interval, request_params::CandleRequest},
    providers::{CandleProvider, ProviderError, normalize_symbol},
};

pub use report::{FailedSymbol, ScanError, ScanReport, ScanSummary, SymbolAnalysis};

/// Which symbols a scan covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolUniverse {
    /// Exactly these symbols.
    Explicit(Vec<String>),
    /// Every tradable symbol quoted in this asset.
    Quote(String),
}

#[derive(Debug, Clone)]
pub struct ScanSettings {
    /// Candles requested per symbol.
    pub candle_limit: u32,
    /// Symbols in flight at once.
    pub concurrency: usize,
    /// Upper bound on fetching one symbol, retries included.
    pub fetch_timeout: Duration,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            candle_limit: 500,
            concurrency: 8,
            fetch_timeout: Duration::from_secs(30),
        }
    }
}

pub struct Scanner {
    provider: Arc<dyn CandleProvider>,
    indicators: Arc<dyn IndicatorSource>,
    detector: DivergenceDetector,
    settings: ScanSettings,
}

impl Scanner {
    pub fn new(
        provider: Arc<dyn CandleProvider>,
        indicators: Arc<dyn IndicatorSource>,
        detector: DivergenceDetector,
        settings: ScanSettings,
    ) -> Self {
        Self {
            provider,
            indicators,
            detector,
            settings,
        }
    }

    /// Turns a universe into a concrete, duplicate-free symbol list.
    pub async fn resolve_symbols(&self, universe: &SymbolUniverse) -> Result<Vec<String>, ProviderError> {
        let symbols: IndexSet<String> = match universe {
            SymbolUniverse::Explicit(symbols) => symbols
                .iter()
                .map(|s| normalize_symbol(s))
                .filter(|s| !s.is_empty())
                .collect(),
            SymbolUniverse::Quote(quote) => self.provider.list_symbols(quote).await?.into_iter().collect(),
        };
        Ok(symbols.into_iter().collect())
    }

    /// Fetches, computes indicators for, and classifies one symbol.
    pub async fn check_symbol(&self, symbol: &str, interval: Interval) -> Result<SymbolAnalysis, ScanError> {
        let request = CandleRequest::new(symbol, interval).with_limit(self.settings.candle_limit);
        let fetch = self.provider.fetch_candles(request);

        let series = match tokio::time::timeout(self.settings.fetch_timeout, fetch).await {
            Ok(Ok(series)) => series,
            Ok(Err(source)) => {
                return Err(ScanError::Fetch {
                    symbol: symbol.to_string(),
                    source,
                });
            }
            Err(_) => {
                return Err(ScanError::Timeout {
                    symbol: symbol.to_string(),
                    after: self.settings.fetch_timeout,
                });
            }
        };

        let indicators = self.indicators.compute(&series);
        let divergence = self
            .detector
            .evaluate(&series.candles, indicators.macd_hist(), indicators.rsi());

        debug!(
            symbol,
            candles = series.len(),
            macd = divergence.macd,
            rsi = divergence.rsi,
            "Analyzed symbol"
        );

        Ok(SymbolAnalysis {
            symbol: symbol.to_string(),
            interval,
            candles: series.len(),
            last_close: series.last_close(),
            divergence,
        })
    }

    /// Analyzes every symbol once, in first-seen order. Failures are logged
    /// and recorded, not propagated.
    pub async fn scan(&self, symbols: &[String], interval: Interval) -> ScanReport {
        let unique: IndexSet<&str> = symbols.iter().map(String::as_str).collect();
        if unique.len() < symbols.len() {
            debug!(duplicates = symbols.len() - unique.len(), "Skipping repeated symbols");
        }
        info!(count = unique.len(), interval = %interval, "Starting divergence scan");

        let outcomes: Vec<(String, Result<SymbolAnalysis, ScanError>)> = stream::iter(unique)
            .map(|symbol| async move {
                (symbol.to_string(), self.check_symbol(symbol, interval).await)
            })
            .buffered(self.settings.concurrency.max(1))
            .collect()
            .await;

        let mut report = ScanReport::new(interval);
        for (symbol, outcome) in outcomes {
            if let Err(e) = &outcome {
                warn!(symbol = %symbol, error = %e, "Could not analyze symbol");
            }
            report.outcomes.insert(symbol, outcome);
        }

        info!(
            analyzed = report.analyzed().count(),
            matched = report.matches().len(),
            failed = report.failures().count(),
            "Scan finished"
        );
        report
    }

    /// Resolves `universe` and scans it.
    pub async fn run(&self, universe: &SymbolUniverse, interval: Interval) -> Result<ScanReport, ProviderError> {
        let symbols = self.resolve_symbols(universe).await?;
        Ok(self.scan(&symbols, interval).await)
    }
}
