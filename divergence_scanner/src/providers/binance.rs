//! Binance spot REST market-data provider.
//!
//! Only public endpoints are used (`/api/v3/exchangeInfo`, `/api/v3/klines`),
//! so no credentials are required. An optional `BINANCE_API_KEY` is forwarded
//! as `X-MBX-APIKEY` when present.

pub mod params;
pub mod provider;
pub mod response;

pub use provider::{BinanceProvider, BinanceSettings};
