use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use divergence_scanner::{
    cli::{
        commands::{Cli, Commands},
        params::{ScanOverrides, apply_scan_overrides},
    },
    config::ScannerConfig,
    create_scanner,
    io::{
        format::render_analysis,
        sink::{ConsoleSink, JsonFileSink, ReportSink},
    },
    providers::normalize_symbol,
};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config =
        ScannerConfig::load(cli.config.as_deref()).context("Failed to load scanner config")?;

    match cli.command {
        Commands::Scan {
            interval,
            symbols,
            quote,
            limit,
            format,
            output,
        } => {
            apply_scan_overrides(
                &mut config,
                ScanOverrides {
                    interval,
                    symbols,
                    quote,
                    limit,
                },
            );
            let scanner = create_scanner(&config)?;

            let report = scanner
                .run(&config.universe(), config.scan.interval)
                .await
                .context("Failed to resolve the symbols to scan")?;
            let summary = report.summary();

            ConsoleSink { format }.write(&summary).await?;
            if let Some(path) = output {
                let written = JsonFileSink { path }.write(&summary).await?;
                info!(path = %written.display(), "Wrote JSON report");
            }

            eprintln!(
                "SUMMARY: {} analyzed, {} matched, {} failed",
                report.analyzed().count(),
                summary.matches.len(),
                summary.failures.len()
            );
        }
        Commands::Check { symbol, interval } => {
            if let Some(interval) = interval {
                config.scan.interval = interval;
            }
            let scanner = create_scanner(&config)?;

            let analysis = scanner
                .check_symbol(&normalize_symbol(&symbol), config.scan.interval)
                .await?;
            println!("{}", render_analysis(&analysis));
        }
    }

    Ok(())
}
