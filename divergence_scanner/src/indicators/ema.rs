/// Exponentially weighted moving average, computed incrementally.
///
/// Follows pandas `ewm(adjust=False, min_periods=n).mean()`, which is what the
/// `ta` package builds MACD and RSI on:
///   first observation → value = x
///   later             → value = α·x + (1−α)·prev
///
/// The output is `NaN` until `min_periods` non-NaN observations have been fed.
/// `NaN` inputs are skipped and leave the state untouched.
#[derive(Debug, Clone)]
pub struct Ema {
    alpha: f64,
    min_periods: usize,
    value: f64,
    count: usize,
}

impl Ema {
    /// Span-parameterised EMA: α = 2/(span+1), warm after `span` observations.
    pub fn new(span: usize) -> Self {
        Self::with_alpha(2.0 / (span as f64 + 1.0), span)
    }

    pub fn with_alpha(alpha: f64, min_periods: usize) -> Self {
        Self {
            alpha,
            min_periods,
            value: f64::NAN,
            count: 0,
        }
    }

    /// Feed one observation, return the current (possibly `NaN`) average.
    pub fn update(&mut self, x: f64) -> f64 {
        if x.is_nan() {
            return self.current();
        }
        if self.count == 0 {
            self.value = x;
        } else {
            self.value = self.alpha * x + (1.0 - self.alpha) * self.value;
        }
        self.count += 1;
        self.current()
    }

    pub fn current(&self) -> f64 {
        if self.count > 0 && self.count >= self.min_periods {
            self.value
        } else {
            f64::NAN
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ema_matches_pandas_ewm_adjust_false() {
        // pd.Series([10,11,12,13]).ewm(span=3, adjust=False, min_periods=3).mean()
        let mut ema = Ema::new(3);

        assert!(ema.update(10.0).is_nan());
        assert!(ema.update(11.0).is_nan());
        // 0.5*12 + 0.5*10.5
        assert!((ema.update(12.0) - 11.25).abs() < 1e-10);
        assert!((ema.update(13.0) - 12.125).abs() < 1e-10);
    }

    #[test]
    fn test_leading_nan_is_skipped() {
        let mut ema = Ema::new(2);
        assert!(ema.update(f64::NAN).is_nan());
        assert!(ema.update(f64::NAN).is_nan());
        assert!(ema.update(4.0).is_nan());
        // alpha = 2/3: 2/3*7 + 1/3*4
        assert!((ema.update(7.0) - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_mid_series_nan_keeps_state() {
        let mut ema = Ema::with_alpha(0.5, 1);
        assert_eq!(ema.update(2.0), 2.0);
        assert_eq!(ema.update(f64::NAN), 2.0);
        assert_eq!(ema.update(4.0), 3.0);
    }
}
