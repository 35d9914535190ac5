use snafu::ensure;

use crate::{
    models::request_params::CandleRequest,
    providers::{ProviderError, ValidationSnafu, normalize_symbol},
};

/// Largest `limit` the klines endpoint accepts.
pub const MAX_KLINE_LIMIT: u32 = 1000;

/// Rejects limits the klines endpoint would refuse.
pub fn validate_limit(limit: u32) -> Result<(), ProviderError> {
    ensure!(
        (1..=MAX_KLINE_LIMIT).contains(&limit),
        ValidationSnafu {
            message: format!("limit must be between 1 and {MAX_KLINE_LIMIT}, got {limit}"),
        }
    );
    Ok(())
}

/// Query string for `GET /api/v3/klines`.
pub fn construct_kline_params(request: &CandleRequest) -> Vec<(String, String)> {
    vec![
        ("symbol".to_string(), normalize_symbol(&request.symbol)),
        ("interval".to_string(), request.interval.as_str().to_string()),
        ("limit".to_string(), request.limit.to_string()),
    ]
}
