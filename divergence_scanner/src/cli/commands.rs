use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::{io::format::ReportFormat, models::interval::Interval};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Scan markets for simultaneous MACD and RSI bullish divergence"
)]
pub struct Cli {
    /// Path to the config file (scanner.toml). Falls back to $DIVERGENCE_SCANNER_CONFIG, then defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan many symbols and print the ones with a bullish divergence
    Scan {
        /// Candle interval: 1h, 4h or 1d
        #[arg(long)]
        interval: Option<Interval>,

        /// Comma-separated list of symbols (e.g. "BTCUSDT,ETH/USDT"); skips the market listing
        #[arg(long)]
        symbols: Option<String>,

        /// Quote asset whose markets are scanned when no symbols are given (e.g. USDT)
        #[arg(long)]
        quote: Option<String>,

        /// Number of candles fetched per symbol (1-1000)
        #[arg(long)]
        limit: Option<u32>,

        /// Output format on stdout: text or json
        #[arg(long, default_value = "text")]
        format: ReportFormat,

        /// Also write the JSON summary to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Analyze one symbol and print both divergence conditions
    Check {
        /// Symbol to analyze (e.g. "BTCUSDT" or "BTC/USDT")
        #[arg(long)]
        symbol: String,

        /// Candle interval: 1h, 4h or 1d
        #[arg(long)]
        interval: Option<Interval>,
    },
}
