use super::last_two_below;

/// MACD bullish divergence: of the bars whose histogram is below `threshold`,
/// the most recent closed higher than the one before it while its histogram
/// printed lower.
///
/// The two bars need not be adjacent in the candle series.
pub fn macd_divergence(closes: &[f64], macd_hist: &[f64], threshold: f64) -> bool {
    match last_two_below(closes, macd_hist, threshold) {
        Some(((last_close, last_hist), (prev_close, prev_hist))) => {
            last_close > prev_close && last_hist < prev_hist
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn higher_price_lower_histogram() {
        assert!(macd_divergence(&[100.0, 105.0], &[-5.0, -8.0], 0.0));
    }

    #[test]
    fn higher_histogram_is_not_divergence() {
        assert!(!macd_divergence(&[100.0, 105.0], &[-5.0, -2.0], 0.0));
    }

    #[test]
    fn lower_price_is_not_divergence() {
        assert!(!macd_divergence(&[105.0, 100.0], &[-5.0, -8.0], 0.0));
    }

    #[test]
    fn equal_values_are_not_divergence() {
        assert!(!macd_divergence(&[100.0, 100.0], &[-5.0, -8.0], 0.0));
        assert!(!macd_divergence(&[100.0, 105.0], &[-5.0, -5.0], 0.0));
    }

    #[test]
    fn single_low_is_insufficient() {
        assert!(!macd_divergence(&[100.0, 105.0], &[1.0, -8.0], 0.0));
        assert!(!macd_divergence(&[], &[], 0.0));
    }

    #[test]
    fn zero_histogram_is_not_a_low() {
        assert!(!macd_divergence(&[100.0, 105.0], &[0.0, -8.0], 0.0));
    }

    #[test]
    fn only_the_last_two_lows_count() {
        // Bars 0 and 1 would diverge; bars 1 and 3 (the last two lows) do not.
        let closes = [100.0, 105.0, 120.0, 104.0];
        let hist = [-5.0, -8.0, 2.0, -9.0];
        assert!(!macd_divergence(&closes, &hist, 0.0));

        // Non-adjacent last two lows that do diverge.
        let closes = [100.0, 99.0, 120.0, 104.0];
        let hist = [-5.0, -8.0, 2.0, -9.0];
        assert!(macd_divergence(&closes, &hist, 0.0));
    }
}
