use divergence_scanner::divergence::{
    DivergenceDetector, DivergencePolicy, RsiPairing, macd_divergence, rsi_divergence,
};
use proptest::{prelude::*, sample::Index};

fn value() -> impl Strategy<Value = f64> {
    prop_oneof![
        9 => -100.0f64..100.0,
        1 => Just(f64::NAN),
    ]
}

/// Index-aligned close, histogram and RSI series of a shared length.
fn aligned_series() -> impl Strategy<Value = (Vec<f64>, Vec<f64>, Vec<f64>)> {
    (0usize..60).prop_flat_map(|len| {
        (
            prop::collection::vec(1.0f64..1_000.0, len),
            prop::collection::vec(value(), len),
            prop::collection::vec(prop_oneof![9 => 0.0f64..100.0, 1 => Just(f64::NAN)], len),
        )
    })
}

/// Closes, non-negative offsets (or NaN) and an optional single dip, which
/// [`place_one_below`] turns into a series with at most one value under a
/// threshold.
fn at_most_one_low() -> impl Strategy<Value = (Vec<f64>, Vec<f64>, Option<(Index, f64)>)> {
    (0usize..60).prop_flat_map(|len| {
        (
            prop::collection::vec(1.0f64..1_000.0, len),
            prop::collection::vec(prop_oneof![9 => 0.0f64..100.0, 1 => Just(f64::NAN)], len),
            prop::option::of((any::<Index>(), 0.001f64..50.0)),
        )
    })
}

fn place_one_below(threshold: f64, offsets: &[f64], dip: Option<(Index, f64)>) -> Vec<f64> {
    let mut values: Vec<f64> = offsets.iter().map(|offset| threshold + offset).collect();
    if let Some((at, depth)) = dip.filter(|_| !values.is_empty()) {
        let i = at.index(values.len());
        values[i] = threshold - depth;
    }
    values
}

fn pairing() -> impl Strategy<Value = RsiPairing> {
    prop_oneof![Just(RsiPairing::Positional), Just(RsiPairing::RecentLows)]
}

proptest! {
    #[test]
    fn evaluation_is_deterministic((closes, hist, rsi) in aligned_series(), pairing in pairing()) {
        let detector = DivergenceDetector::new(DivergencePolicy {
            rsi_pairing: pairing,
            ..Default::default()
        });
        let first = detector.evaluate_closes(&closes, &hist, &rsi);
        let second = detector.evaluate_closes(&closes, &hist, &rsi);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn mismatched_lengths_never_signal(
        (closes, hist, rsi) in aligned_series(),
        extra in value(),
        which in 0usize..3,
    ) {
        let (mut closes, mut hist, mut rsi) = (closes, hist, rsi);
        match which {
            0 => closes.push(extra.abs() + 1.0),
            1 => hist.push(extra),
            _ => rsi.push(extra),
        }
        let report = DivergenceDetector::default().evaluate_closes(&closes, &hist, &rsi);
        prop_assert!(!report.macd);
        prop_assert!(!report.rsi);
    }

    #[test]
    fn fewer_than_two_bars_below_threshold_never_signal(
        (closes, offsets, dip) in at_most_one_low(),
        threshold in -50.0f64..50.0,
    ) {
        let hist = place_one_below(threshold, &offsets, dip);
        prop_assert!(hist.iter().filter(|h| **h < threshold).count() < 2);
        prop_assert!(!macd_divergence(&closes, &hist, threshold));
    }

    #[test]
    fn fewer_than_two_oversold_bars_never_signal(
        (closes, offsets, dip) in at_most_one_low(),
        oversold in 1.0f64..99.0,
        pairing in pairing(),
    ) {
        let rsi = place_one_below(oversold, &offsets, dip);
        prop_assert!(rsi.iter().filter(|v| **v < oversold).count() < 2);
        prop_assert!(!rsi_divergence(&closes, &rsi, oversold, pairing));
    }

    #[test]
    fn rsi_never_oversold_never_signals(
        (closes, _, rsi) in aligned_series(),
        pairing in pairing(),
    ) {
        let floor = 30.0;
        let rsi: Vec<f64> = rsi.into_iter().map(|v| if v.is_nan() { v } else { floor + v * 0.7 }).collect();
        prop_assert!(!rsi_divergence(&closes, &rsi, floor, pairing));
    }

    #[test]
    fn constant_price_never_signals((closes, hist, rsi) in aligned_series(), pairing in pairing()) {
        let flat = vec![closes.first().copied().unwrap_or(100.0); closes.len()];
        let detector = DivergenceDetector::new(DivergencePolicy {
            rsi_pairing: pairing,
            ..Default::default()
        });
        let report = detector.evaluate_closes(&flat, &hist, &rsi);
        prop_assert!(!report.macd);
        prop_assert!(!report.rsi);
    }
}
