//! Scanner configuration: TOML file, defaults, and validation.
//!
//! Every section and key is optional; a missing file section falls back to
//! the defaults below. Example:
//!
//! ```toml
//! [scan]
//! interval = "4h"
//! quote_asset = "USDT"
//! symbols = []            # empty → every tradable symbol quoted in quote_asset
//! candle_limit = 500
//! concurrency = 8
//! fetch_timeout_secs = 30
//!
//! [provider]
//! kind = "binance"        # or "fixture"
//! base_url = "https://api.binance.com"
//! requests_per_second = 10
//! max_retries = 3
//! base_delay_ms = 500
//! # fixture_dir = "fixtures"
//!
//! [indicators]
//! macd_fast = 12
//! macd_slow = 26
//! macd_signal = 9
//! rsi_window = 14
//!
//! [divergence]
//! macd_threshold = 0.0
//! rsi_oversold = 30.0
//! rsi_pairing = "positional"   # or "recent_lows"
//! ```

use std::{
    num::NonZeroU32,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use shared_utils::env::get_optional_env_var;
use thiserror::Error;
use tracing::debug;

use crate::{
    divergence::DivergencePolicy,
    indicators::IndicatorParams,
    models::{interval::Interval, request_params::DEFAULT_CANDLE_LIMIT},
    providers::binance::{
        BinanceSettings,
        params::MAX_KLINE_LIMIT,
        provider::BASE_URL,
    },
    scanner::{ScanSettings, SymbolUniverse},
};

/// Environment variable consulted when no `--config` path is given.
pub const CONFIG_ENV: &str = "DIVERGENCE_SCANNER_CONFIG";

/// Errors related to loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScannerConfig {
    pub scan: ScanConfig,
    pub provider: ProviderConfig,
    pub indicators: IndicatorParams,
    pub divergence: DivergencePolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    pub interval: Interval,
    pub quote_asset: String,
    /// Explicit symbol list; when empty the quote asset's market listing is used.
    pub symbols: Vec<String>,
    pub candle_limit: u32,
    pub concurrency: usize,
    pub fetch_timeout_secs: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            interval: Interval::default(),
            quote_asset: "USDT".to_string(),
            symbols: Vec::new(),
            candle_limit: DEFAULT_CANDLE_LIMIT,
            concurrency: 8,
            fetch_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    #[default]
    Binance,
    Fixture,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub base_url: String,
    pub requests_per_second: u32,
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub request_timeout_secs: u64,
    pub fixture_dir: Option<PathBuf>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::default(),
            base_url: BASE_URL.to_string(),
            requests_per_second: 10,
            max_retries: 3,
            base_delay_ms: 500,
            request_timeout_secs: 10,
            fixture_dir: None,
        }
    }
}

impl ScannerConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ScannerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Loaded config file");
        Self::from_toml_str(&content)
    }

    /// Loads from `path`, else from the file named by
    /// `DIVERGENCE_SCANNER_CONFIG`, else returns the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_path(path),
            None => match get_optional_env_var(CONFIG_ENV) {
                Some(env_path) => Self::from_path(env_path),
                None => Ok(Self::default()),
            },
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: String| Err(ConfigError::Invalid(message));
        let scan = &self.scan;
        let ind = &self.indicators;
        let div = &self.divergence;

        if !(1..=MAX_KLINE_LIMIT).contains(&scan.candle_limit) {
            return invalid(format!(
                "scan.candle_limit must be between 1 and {MAX_KLINE_LIMIT}, got {}",
                scan.candle_limit
            ));
        }
        if scan.concurrency == 0 {
            return invalid("scan.concurrency must be at least 1".into());
        }
        if scan.fetch_timeout_secs == 0 {
            return invalid("scan.fetch_timeout_secs must be at least 1".into());
        }
        if scan.symbols.is_empty() && scan.quote_asset.trim().is_empty() {
            return invalid("scan.quote_asset is required when scan.symbols is empty".into());
        }
        if self.provider.requests_per_second == 0 {
            return invalid("provider.requests_per_second must be at least 1".into());
        }
        if self.provider.max_retries > 10 {
            return invalid("provider.max_retries must be at most 10".into());
        }
        if self.provider.request_timeout_secs == 0 {
            return invalid("provider.request_timeout_secs must be at least 1".into());
        }
        if self.provider.kind == ProviderKind::Fixture && self.provider.fixture_dir.is_none() {
            return invalid("provider.fixture_dir is required for the fixture provider".into());
        }
        if ind.macd_fast == 0 || ind.macd_slow == 0 || ind.macd_signal == 0 || ind.rsi_window == 0 {
            return invalid("indicator windows must be positive".into());
        }
        if ind.macd_fast >= ind.macd_slow {
            return invalid(format!(
                "indicators.macd_fast ({}) must be less than indicators.macd_slow ({})",
                ind.macd_fast, ind.macd_slow
            ));
        }
        if !(div.rsi_oversold > 0.0 && div.rsi_oversold < 100.0) {
            return invalid(format!(
                "divergence.rsi_oversold must be within (0, 100), got {}",
                div.rsi_oversold
            ));
        }
        if !div.macd_threshold.is_finite() {
            return invalid("divergence.macd_threshold must be finite".into());
        }
        Ok(())
    }

    pub fn scan_settings(&self) -> ScanSettings {
        ScanSettings {
            candle_limit: self.scan.candle_limit,
            concurrency: self.scan.concurrency,
            fetch_timeout: Duration::from_secs(self.scan.fetch_timeout_secs),
        }
    }

    pub fn binance_settings(&self) -> BinanceSettings {
        let defaults = BinanceSettings::default();
        BinanceSettings {
            base_url: self.provider.base_url.clone(),
            requests_per_second: NonZeroU32::new(self.provider.requests_per_second)
                .unwrap_or(defaults.requests_per_second),
            max_retries: self.provider.max_retries,
            base_delay: Duration::from_millis(self.provider.base_delay_ms),
            request_timeout: Duration::from_secs(self.provider.request_timeout_secs),
            api_key: defaults.api_key,
        }
    }

    pub fn universe(&self) -> SymbolUniverse {
        if self.scan.symbols.is_empty() {
            SymbolUniverse::Quote(self.scan.quote_asset.clone())
        } else {
            SymbolUniverse::Explicit(self.scan.symbols.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::divergence::RsiPairing;

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = ScannerConfig::from_toml_str("").unwrap();
        assert_eq!(config, ScannerConfig::default());
        assert_eq!(config.scan.interval, Interval::FourHours);
        assert_eq!(config.scan.candle_limit, 500);
        assert_eq!(config.divergence.rsi_oversold, 30.0);
        assert_eq!(config.universe(), SymbolUniverse::Quote("USDT".to_string()));
    }

    #[test]
    fn test_full_document() {
        let config = ScannerConfig::from_toml_str(
            r#"
            [scan]
            interval = "1d"
            symbols = ["BTC/USDT", "ETHUSDT"]
            candle_limit = 300
            concurrency = 2
            fetch_timeout_secs = 5

            [provider]
            kind = "fixture"
            fixture_dir = "tests/data"

            [indicators]
            rsi_window = 7

            [divergence]
            rsi_oversold = 25.0
            rsi_pairing = "recent_lows"
            "#,
        )
        .unwrap();

        assert_eq!(config.scan.interval, Interval::OneDay);
        assert_eq!(
            config.universe(),
            SymbolUniverse::Explicit(vec!["BTC/USDT".to_string(), "ETHUSDT".to_string()])
        );
        assert_eq!(config.provider.kind, ProviderKind::Fixture);
        assert_eq!(config.provider.fixture_dir, Some(PathBuf::from("tests/data")));
        assert_eq!(config.indicators.rsi_window, 7);
        assert_eq!(config.indicators.macd_slow, 26);
        assert_eq!(config.divergence.rsi_pairing, RsiPairing::RecentLows);

        let settings = config.scan_settings();
        assert_eq!(settings.candle_limit, 300);
        assert_eq!(settings.concurrency, 2);
        assert_eq!(settings.fetch_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_binance_settings_mapping() {
        let config = ScannerConfig::from_toml_str(
            r#"
            [provider]
            base_url = "https://api1.binance.com"
            requests_per_second = 4
            base_delay_ms = 250
            "#,
        )
        .unwrap();
        let settings = config.binance_settings();
        assert_eq!(settings.base_url, "https://api1.binance.com");
        assert_eq!(settings.requests_per_second.get(), 4);
        assert_eq!(settings.base_delay, Duration::from_millis(250));
        assert_eq!(settings.max_retries, 3);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = ScannerConfig::from_toml_str("[scan]\ntimeframe = \"4h\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_invalid_interval_is_a_parse_error() {
        let err = ScannerConfig::from_toml_str("[scan]\ninterval = \"15m\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_failures() {
        let cases = [
            "[scan]\ncandle_limit = 0",
            "[scan]\ncandle_limit = 1001",
            "[scan]\nconcurrency = 0",
            "[scan]\nfetch_timeout_secs = 0",
            "[scan]\nquote_asset = \" \"",
            "[provider]\nrequests_per_second = 0",
            "[provider]\nmax_retries = 11",
            "[provider]\nkind = \"fixture\"",
            "[indicators]\nrsi_window = 0",
            "[indicators]\nmacd_fast = 26\nmacd_slow = 12",
            "[divergence]\nrsi_oversold = 100.0",
            "[divergence]\nrsi_oversold = 0.0",
        ];
        for case in cases {
            match ScannerConfig::from_toml_str(case) {
                Err(ConfigError::Invalid(_)) => {}
                other => panic!("expected validation error for {case:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_missing_file() {
        let err = ScannerConfig::from_path("/definitely/not/here/scanner.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[scan]\ninterval = \"1h\"\nconcurrency = 3").unwrap();

        let config = ScannerConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.scan.interval, Interval::OneHour);
        assert_eq!(config.scan.concurrency, 3);
    }
}
