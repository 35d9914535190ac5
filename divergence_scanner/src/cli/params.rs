use crate::{config::ScannerConfig, models::interval::Interval, providers::normalize_symbol};

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOverrides {
    pub interval: Option<Interval>,
    pub symbols: Option<String>,
    pub quote: Option<String>,
    pub limit: Option<u32>,
}

/// Splits a comma-separated symbol list, normalizing each entry and dropping
/// empty ones.
pub fn parse_symbols(symbols: &str) -> Vec<String> {
    symbols
        .split(',')
        .map(normalize_symbol)
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn apply_scan_overrides(config: &mut ScannerConfig, overrides: ScanOverrides) {
    if let Some(interval) = overrides.interval {
        config.scan.interval = interval;
    }
    if let Some(quote) = overrides.quote {
        config.scan.quote_asset = normalize_symbol(&quote);
        // A quote asset on the command line means the whole market, unless
        // symbols are given too.
        config.scan.symbols.clear();
    }
    if let Some(symbols) = overrides.symbols {
        config.scan.symbols = parse_symbols(&symbols);
    }
    if let Some(limit) = overrides.limit {
        config.scan.candle_limit = limit;
    }
}
