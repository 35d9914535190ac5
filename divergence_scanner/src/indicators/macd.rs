use super::ema::Ema;

/// MACD histogram = MACD line − signal line.
/// Matches Python `ta.trend.MACD(...).macd_diff()`.
#[derive(Debug, Clone)]
pub struct MacdIndicator {
    ema_fast: Ema,
    ema_slow: Ema,
    ema_signal: Ema,
}

impl MacdIndicator {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        Self {
            ema_fast: Ema::new(fast),
            ema_slow: Ema::new(slow),
            ema_signal: Ema::new(signal),
        }
    }

    /// Feed one close price, return the histogram value (`NaN` while warming up).
    pub fn update(&mut self, close: f64) -> f64 {
        let macd_line = self.ema_fast.update(close) - self.ema_slow.update(close);
        let signal = self.ema_signal.update(macd_line);
        macd_line - signal
    }
}

/// Histogram for a whole close series, index-aligned with it.
pub fn macd_histogram(closes: &[f64], fast: usize, slow: usize, signal: usize) -> Vec<f64> {
    let mut macd = MacdIndicator::new(fast, slow, signal);
    closes.iter().map(|&c| macd.update(c)).collect()
}
