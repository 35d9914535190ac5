use thiserror::Error;

use crate::{
    config::ConfigError,
    io::sink::SinkError,
    providers::ProviderInitError,
    scanner::ScanError,
};

/// The unified error type for the `divergence_scanner` crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A provider could not be constructed.
    #[error("Provider initialization error: {0}")]
    ProviderInit(#[from] ProviderInitError),

    /// A single-symbol check failed.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// The report could not be written.
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),
}
