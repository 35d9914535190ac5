use serde::{Deserialize, Serialize};

use crate::models::interval::Interval;

/// Default number of candles requested per symbol.
pub const DEFAULT_CANDLE_LIMIT: u32 = 500;

/// Vendor-agnostic parameters for requesting the most recent candles of one
/// symbol.
///
/// This is the standard input of every
/// [`CandleProvider`](crate::providers::CandleProvider). **Validation of the
/// allowed `limit` range is performed by each provider**, according to its
/// own API rules.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CandleRequest {
    /// Symbol to request (e.g. `"BTCUSDT"` or `"BTC/USDT"`).
    pub symbol: String,

    /// Sampling interval of the candles.
    pub interval: Interval,

    /// Number of most recent candles to return.
    pub limit: u32,
}

impl CandleRequest {
    pub fn new(symbol: impl Into<String>, interval: Interval) -> Self {
        Self {
            symbol: symbol.into(),
            interval,
            limit: DEFAULT_CANDLE_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}
