#![allow(dead_code)]

use std::path::Path;

use chrono::{DateTime, TimeZone, Utc};
use divergence_scanner::models::{candle::Candle, interval::Interval};

/// Closes whose standard MACD(12, 26, 9) and RSI(14) show both bullish
/// divergences: the last two negative-histogram bars are 58 and 59 (higher
/// close, lower histogram) and the 16 oversold RSI bars go from 27.11 down
/// to 23.34 while price closes above bar 44.
pub const BULLISH_CLOSES: [f64; 60] = [
    98.34, 99.17, 101.01, 99.38, 98.89, 98.65, 99.46, 100.31, 98.52, 99.13, 97.37, 95.48, 94.51,
    93.76, 95.52, 93.15, 91.76, 88.28, 86.61, 84.33, 84.08, 83.21, 82.67, 82.41, 80.65, 80.91,
    83.59, 82.12, 80.85, 81.18, 79.54, 82.5, 84.19, 84.62, 84.19, 84.93, 82.37, 83.97, 83.19,
    85.18, 84.77, 88.09, 86.2, 87.95, 88.48, 89.58, 88.8, 91.09, 93.49, 96.08, 94.45, 88.57,
    89.67, 88.32, 89.42, 89.4, 91.49, 91.4, 89.2, 89.87,
];

pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
}

pub fn candles(closes: &[f64], interval: Interval) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Candle {
            timestamp: start() + interval.duration() * i as i32,
            open: close,
            high: close + 0.5,
            low: close - 0.5,
            close,
            volume: 1_000.0,
        })
        .collect()
}

/// A straight decline: RSI pins at 0 and price never recovers.
pub fn falling_closes(len: usize) -> Vec<f64> {
    (0..len).map(|i| 100.0 - i as f64 * 0.5).collect()
}

pub fn write_fixture(dir: &Path, symbol: &str, interval: Interval, candles: &[Candle]) {
    let path = dir.join(format!("{symbol}_{interval}.json"));
    std::fs::write(path, serde_json::to_string(candles).unwrap()).unwrap();
}
