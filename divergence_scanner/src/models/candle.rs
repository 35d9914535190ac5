//! Canonical in-memory representation of a candle (OHLCV).
//!
//! This struct is the standard output of every
//! [`CandleProvider`](crate::providers::CandleProvider), whatever exchange or
//! fixture it came from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::interval::Interval;

/// A single OHLCV candle for one sampling period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Open time of the period (UTC).
    pub timestamp: DateTime<Utc>,

    /// Opening price.
    pub open: f64,

    /// Highest price during the period.
    pub high: f64,

    /// Lowest price during the period.
    pub low: f64,

    /// Closing price.
    pub close: f64,

    /// Base-asset volume traded during the period.
    pub volume: f64,
}

/// A chronologically ordered set of candles for a single symbol.
///
/// Groups the [`Candle`]s with their symbol and [`Interval`] so the data set
/// is self-describing.
#[derive(Debug, Clone, PartialEq)]
pub struct CandleSeries {
    /// Exchange symbol (e.g. "BTCUSDT").
    pub symbol: String,
    /// Sampling interval of every candle in the series.
    pub interval: Interval,
    /// Candles, oldest first.
    pub candles: Vec<Candle>,
}

impl CandleSeries {
    pub fn new(symbol: impl Into<String>, interval: Interval, candles: Vec<Candle>) -> Self {
        Self {
            symbol: symbol.into(),
            interval,
            candles,
        }
    }

    /// Closing prices in candle order.
    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    pub fn last_close(&self) -> Option<f64> {
        self.candles.last().map(|c| c.close)
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }
}
