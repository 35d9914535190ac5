use super::ema::Ema;

/// RSI (Relative Strength Index) with Wilder smoothing of average gain/loss.
/// Matches Python `ta.momentum.RSIIndicator(...).rsi()`, including its
/// treatment of the first bar as a zero change.
#[derive(Debug, Clone)]
pub struct RsiIndicator {
    prev_close: Option<f64>,
    avg_gain: Ema,
    avg_loss: Ema,
}

impl RsiIndicator {
    pub fn new(window: usize) -> Self {
        let alpha = 1.0 / window.max(1) as f64;
        Self {
            prev_close: None,
            avg_gain: Ema::with_alpha(alpha, window),
            avg_loss: Ema::with_alpha(alpha, window),
        }
    }

    /// Feed one close price, return the RSI in `[0, 100]` (`NaN` while warming up).
    pub fn update(&mut self, close: f64) -> f64 {
        // f64::max maps a NaN change to zero, same as pandas `where(diff > 0, 0.0)`.
        let change = self.prev_close.map_or(0.0, |prev| close - prev);
        self.prev_close = Some(close);

        let gain = self.avg_gain.update(change.max(0.0));
        let loss = self.avg_loss.update((-change).max(0.0));

        if gain.is_nan() || loss.is_nan() {
            f64::NAN
        } else if loss == 0.0 {
            100.0
        } else {
            100.0 - 100.0 / (1.0 + gain / loss)
        }
    }
}

/// RSI for a whole close series, index-aligned with it.
pub fn rsi(closes: &[f64], window: usize) -> Vec<f64> {
    let mut indicator = RsiIndicator::new(window);
    closes.iter().map(|&c| indicator.update(c)).collect()
}
