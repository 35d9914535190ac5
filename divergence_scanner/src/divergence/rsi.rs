use super::{RsiPairing, last_two_below};

/// RSI bullish divergence over the bars whose RSI is below `oversold`.
///
/// Needs at least two oversold bars. What is compared depends on `pairing`;
/// in both cases the price must be strictly higher and the RSI strictly lower
/// at the recent end of the pair.
pub fn rsi_divergence(closes: &[f64], rsi: &[f64], oversold: f64, pairing: RsiPairing) -> bool {
    match pairing {
        RsiPairing::Positional => positional(closes, rsi, oversold),
        RsiPairing::RecentLows => match last_two_below(closes, rsi, oversold) {
            Some(((last_close, last_rsi), (prev_close, prev_rsi))) => {
                last_close > prev_close && last_rsi < prev_rsi
            }
            None => false,
        },
    }
}

fn positional(closes: &[f64], rsi: &[f64], oversold: f64) -> bool {
    let lows: Vec<f64> = rsi.iter().copied().filter(|v| *v < oversold).collect();
    let n = lows.len();
    if n < 2 || n > closes.len() {
        return false;
    }
    let (Some(&last_close), Some(&anchor_close)) = (closes.last(), closes.get(closes.len() - n)) else {
        return false;
    };
    last_close > anchor_close && lows[n - 1] < lows[0]
}
