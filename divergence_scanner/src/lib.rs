use std::sync::Arc;

use tracing::warn;

use crate::{
    config::{ProviderKind, ScannerConfig},
    divergence::{DivergenceDetector, RsiPairing},
    errors::Error,
    indicators::StandardIndicators,
    providers::{CandleProvider, binance::BinanceProvider, fixture::FixtureProvider},
    scanner::Scanner,
};

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod divergence;
pub mod errors;
pub mod indicators;
pub mod io;
pub mod models;
pub mod providers;
pub mod scanner;

pub use divergence::is_bullish_divergence;

/// Builds the candle provider selected by `config.provider.kind`.
pub fn create_provider(config: &ScannerConfig) -> Result<Arc<dyn CandleProvider>, Error> {
    match config.provider.kind {
        ProviderKind::Binance => Ok(Arc::new(BinanceProvider::with_settings(
            config.binance_settings(),
        )?)),
        ProviderKind::Fixture => {
            let dir = config.provider.fixture_dir.clone().ok_or_else(|| {
                config::ConfigError::Invalid("provider.fixture_dir is required for the fixture provider".into())
            })?;
            Ok(Arc::new(FixtureProvider::new(dir)))
        }
    }
}

/// Builds a scanner wired from configuration.
pub fn create_scanner(config: &ScannerConfig) -> Result<Scanner, Error> {
    config.validate()?;

    if config.divergence.rsi_pairing != RsiPairing::Positional {
        warn!(
            pairing = ?config.divergence.rsi_pairing,
            "Non-default RSI pairing selected; results differ from the positional rule"
        );
    }

    Ok(Scanner::new(
        create_provider(config)?,
        Arc::new(StandardIndicators::new(config.indicators)),
        DivergenceDetector::new(config.divergence),
        config.scan_settings(),
    ))
}
