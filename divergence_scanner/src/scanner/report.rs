use std::time::Duration;

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

use crate::{divergence::DivergenceReport, models::interval::Interval, providers::ProviderError};

/// Why a symbol could not be analyzed.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to fetch candles for {symbol}: {source}")]
    Fetch {
        symbol: String,
        #[source]
        source: ProviderError,
    },

    #[error("fetching candles for {symbol} timed out after {after:?}")]
    Timeout { symbol: String, after: Duration },
}

impl ScanError {
    pub fn symbol(&self) -> &str {
        match self {
            ScanError::Fetch { symbol, .. } | ScanError::Timeout { symbol, .. } => symbol,
        }
    }
}

/// Result of analyzing one symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolAnalysis {
    pub symbol: String,
    pub interval: Interval,
    /// Number of candles the decision was made on.
    pub candles: usize,
    pub last_close: Option<f64>,
    pub divergence: DivergenceReport,
}

impl SymbolAnalysis {
    pub fn is_bullish(&self) -> bool {
        self.divergence.is_bullish()
    }
}

/// Per-symbol outcomes of one scan, in the order the symbols were given.
#[derive(Debug)]
pub struct ScanReport {
    pub interval: Interval,
    pub outcomes: IndexMap<String, Result<SymbolAnalysis, ScanError>>,
}

impl ScanReport {
    pub fn new(interval: Interval) -> Self {
        Self {
            interval,
            outcomes: IndexMap::new(),
        }
    }

    /// Symbols whose bullish divergence signal is set.
    pub fn matches(&self) -> Vec<&str> {
        self.analyzed()
            .filter(|a| a.is_bullish())
            .map(|a| a.symbol.as_str())
            .collect()
    }

    pub fn analyzed(&self) -> impl Iterator<Item = &SymbolAnalysis> {
        self.outcomes.values().filter_map(|outcome| outcome.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &ScanError> {
        self.outcomes.values().filter_map(|outcome| outcome.as_ref().err())
    }

    pub fn summary(&self) -> ScanSummary {
        ScanSummary {
            interval: self.interval,
            scanned: self.outcomes.len(),
            matches: self.matches().into_iter().map(str::to_string).collect(),
            failures: self
                .failures()
                .map(|e| FailedSymbol {
                    symbol: e.symbol().to_string(),
                    reason: e.to_string(),
                })
                .collect(),
        }
    }
}

/// Serializable digest of a [`ScanReport`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanSummary {
    pub interval: Interval,
    pub scanned: usize,
    pub matches: Vec<String>,
    pub failures: Vec<FailedSymbol>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedSymbol {
    pub symbol: String,
    pub reason: String,
}
