//! Bullish MACD + RSI divergence detection.
//!
//! A symbol signals when, over its recent history, the close price made a
//! higher low while both momentum indicators made a lower low:
//!
//! - **MACD**: among the bars with a negative histogram, the latest close is
//!   above the previous one while the latest histogram is below the previous
//!   one.
//! - **RSI**: among the oversold bars, see [`RsiPairing`] for which two points
//!   are compared.
//!
//! Detection is a total function: any input, including empty or misaligned
//! series, yields a [`DivergenceReport`], never an error. Warm-up `NaN`s
//! never compare below a threshold and so never qualify.

mod macd;
mod rsi;

use serde::{Deserialize, Serialize};

use crate::models::candle::Candle;

pub use macd::macd_divergence;
pub use rsi::rsi_divergence;

/// Which two oversold points the RSI condition compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiPairing {
    /// With `N` oversold bars: the last close against the close `N` bars from
    /// the end of the whole series, and the last oversold RSI against the
    /// first oversold RSI. The pairing the scanner has always used.
    #[default]
    Positional,
    /// The two most recent oversold bars against each other, close to close
    /// and RSI to RSI, mirroring the MACD condition.
    RecentLows,
}

/// Thresholds and pairing used by [`DivergenceDetector`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DivergencePolicy {
    /// A bar is a MACD low when its histogram is strictly below this value.
    pub macd_threshold: f64,
    /// A bar is oversold when its RSI is strictly below this value.
    pub rsi_oversold: f64,
    pub rsi_pairing: RsiPairing,
}

impl Default for DivergencePolicy {
    fn default() -> Self {
        Self {
            macd_threshold: 0.0,
            rsi_oversold: 30.0,
            rsi_pairing: RsiPairing::Positional,
        }
    }
}

/// Outcome of both sub-conditions for one series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DivergenceReport {
    pub macd: bool,
    pub rsi: bool,
}

impl DivergenceReport {
    pub fn is_bullish(&self) -> bool {
        self.macd && self.rsi
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DivergenceDetector {
    policy: DivergencePolicy,
}

impl DivergenceDetector {
    pub fn new(policy: DivergencePolicy) -> Self {
        Self { policy }
    }

    /// Evaluates both conditions over index-aligned close, histogram and RSI
    /// series. Series of unequal length are malformed and evaluate to
    /// all-false.
    pub fn evaluate_closes(&self, closes: &[f64], macd_hist: &[f64], rsi: &[f64]) -> DivergenceReport {
        if closes.len() != macd_hist.len() || closes.len() != rsi.len() {
            return DivergenceReport::default();
        }
        DivergenceReport {
            macd: macd_divergence(closes, macd_hist, self.policy.macd_threshold),
            rsi: rsi_divergence(closes, rsi, self.policy.rsi_oversold, self.policy.rsi_pairing),
        }
    }

    pub fn evaluate(&self, candles: &[Candle], macd_hist: &[f64], rsi: &[f64]) -> DivergenceReport {
        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        self.evaluate_closes(&closes, macd_hist, rsi)
    }
}

/// `true` when both the MACD and the RSI bullish divergence hold under the
/// default [`DivergencePolicy`].
pub fn is_bullish_divergence(candles: &[Candle], macd_hist: &[f64], rsi: &[f64]) -> bool {
    DivergenceDetector::default()
        .evaluate(candles, macd_hist, rsi)
        .is_bullish()
}

/// Returns the last two `(close, value)` pairs whose value is below
/// `threshold`, most recent first.
fn last_two_below(closes: &[f64], values: &[f64], threshold: f64) -> Option<((f64, f64), (f64, f64))> {
    let mut lows = closes
        .iter()
        .zip(values)
        .rev()
        .filter(|(_, value)| **value < threshold)
        .map(|(close, value)| (*close, *value));
    let last = lows.next()?;
    let prev = lows.next()?;
    Some((last, prev))
}
