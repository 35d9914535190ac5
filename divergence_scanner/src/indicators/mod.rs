//! Technical indicators consumed by the divergence detector.
//!
//! The detector only needs two series per symbol, the MACD histogram and the
//! RSI. [`IndicatorSource`] is the seam through which the scanner obtains
//! them; [`StandardIndicators`] is the production implementation.

pub mod ema;
pub mod macd;
pub mod rsi;

use serde::{Deserialize, Serialize};

use crate::models::{candle::CandleSeries, indicator_series::IndicatorSeries};

/// Window lengths for the indicators. Defaults are the conventional
/// MACD(12, 26, 9) and RSI(14).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorParams {
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub rsi_window: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            rsi_window: 14,
        }
    }
}

/// Produces indicator values aligned with a candle series.
pub trait IndicatorSource: Send + Sync {
    fn compute(&self, series: &CandleSeries) -> IndicatorSeries;
}

/// MACD histogram and RSI computed from close prices.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardIndicators {
    params: IndicatorParams,
}

impl StandardIndicators {
    pub fn new(params: IndicatorParams) -> Self {
        Self { params }
    }
}

impl IndicatorSource for StandardIndicators {
    fn compute(&self, series: &CandleSeries) -> IndicatorSeries {
        let closes = series.closes();
        let p = &self.params;
        let macd_hist = macd::macd_histogram(&closes, p.macd_fast, p.macd_slow, p.macd_signal);
        let rsi = rsi::rsi(&closes, p.rsi_window);
        // Both vectors are mapped one-to-one from `closes`.
        IndicatorSeries::new(macd_hist, rsi).unwrap_or_default()
    }
}
