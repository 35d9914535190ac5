//! Indicator values aligned index-for-index with a candle series.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndicatorError {
    #[error("Indicator series length mismatch: macd_hist has {macd_hist}, rsi has {rsi}")]
    LengthMismatch { macd_hist: usize, rsi: usize },
}

/// MACD histogram and RSI values for one candle series.
///
/// Entry `i` of each vector belongs to candle `i`. Values in the warm-up
/// window, where the indicator lacks history, are `NaN`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IndicatorSeries {
    macd_hist: Vec<f64>,
    rsi: Vec<f64>,
}

impl IndicatorSeries {
    pub fn new(macd_hist: Vec<f64>, rsi: Vec<f64>) -> Result<Self, IndicatorError> {
        if macd_hist.len() != rsi.len() {
            return Err(IndicatorError::LengthMismatch {
                macd_hist: macd_hist.len(),
                rsi: rsi.len(),
            });
        }
        Ok(Self { macd_hist, rsi })
    }

    pub fn macd_hist(&self) -> &[f64] {
        &self.macd_hist
    }

    pub fn rsi(&self) -> &[f64] {
        &self.rsi
    }

    pub fn len(&self) -> usize {
        self.rsi.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rsi.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aligned_series() {
        let series = IndicatorSeries::new(vec![f64::NAN, -1.0], vec![f64::NAN, 25.0]).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.rsi()[1], 25.0);
        assert!(series.macd_hist()[0].is_nan());
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let err = IndicatorSeries::new(vec![0.0; 3], vec![0.0; 2]).unwrap_err();
        assert_eq!(err, IndicatorError::LengthMismatch { macd_hist: 3, rsi: 2 });
    }
}
