use chrono::DateTime;
use serde::{Deserialize, de::IgnoredAny};
use snafu::OptionExt;

use crate::{
    models::candle::Candle,
    providers::{DecodeSnafu, ProviderError},
};

/// One row of `GET /api/v3/klines`:
/// `[open_time, open, high, low, close, volume, close_time, quote_volume,
///   trades, taker_buy_base, taker_buy_quote, ignore]`.
///
/// Prices and volumes arrive as decimal strings.
#[derive(Deserialize, Debug)]
pub struct BinanceKline(
    pub i64,
    pub String,
    pub String,
    pub String,
    pub String,
    pub String,
    pub i64,
    pub IgnoredAny,
    pub u64,
    pub IgnoredAny,
    pub IgnoredAny,
    pub IgnoredAny,
);

impl BinanceKline {
    pub fn into_candle(self) -> Result<Candle, ProviderError> {
        let BinanceKline(open_time, open, high, low, close, volume, ..) = self;
        let timestamp = DateTime::from_timestamp_millis(open_time).context(DecodeSnafu {
            message: format!("kline open time {open_time} is out of range"),
        })?;
        Ok(Candle {
            timestamp,
            open: parse_decimal("open", &open)?,
            high: parse_decimal("high", &high)?,
            low: parse_decimal("low", &low)?,
            close: parse_decimal("close", &close)?,
            volume: parse_decimal("volume", &volume)?,
        })
    }
}

fn parse_decimal(field: &str, raw: &str) -> Result<f64, ProviderError> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite()).context(DecodeSnafu {
        message: format!("kline {field} {raw:?} is not a finite number"),
    })
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SymbolInfo {
    pub symbol: String,
    pub status: String,
    pub quote_asset: String,
}

impl SymbolInfo {
    pub fn is_trading(&self) -> bool {
        self.status == "TRADING"
    }
}

/// Subset of `GET /api/v3/exchangeInfo`.
#[derive(Deserialize, Debug)]
pub struct ExchangeInfo {
    pub symbols: Vec<SymbolInfo>,
}

/// Error body Binance sends with non-2xx statuses.
#[derive(Deserialize, Debug)]
pub struct BinanceErrorBody {
    pub code: i64,
    pub msg: String,
}
