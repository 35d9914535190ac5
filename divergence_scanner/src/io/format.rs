use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::scanner::{ScanSummary, SymbolAnalysis};

/// How a scan summary is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// One human-readable line listing the matching symbols.
    #[default]
    Text,
    /// The full [`ScanSummary`] as pretty-printed JSON.
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("Invalid report format: {other} (expected text or json)")),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Text => f.write_str("text"),
            ReportFormat::Json => f.write_str("json"),
        }
    }
}

pub fn render_text(summary: &ScanSummary) -> String {
    if summary.matches.is_empty() {
        "Symbols with bullish divergence: none".to_string()
    } else {
        format!("Symbols with bullish divergence: {}", summary.matches.join(", "))
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

/// One line describing both divergence conditions for a single symbol.
pub fn render_analysis(analysis: &SymbolAnalysis) -> String {
    let verdict = if analysis.is_bullish() {
        "bullish divergence"
    } else {
        "no bullish divergence"
    };
    let last_close = analysis
        .last_close
        .map_or_else(|| "n/a".to_string(), |close| close.to_string());
    format!(
        "{} {}: {} (MACD: {}, RSI: {}) over {} candles, last close {}",
        analysis.symbol,
        analysis.interval,
        verdict,
        yes_no(analysis.divergence.macd),
        yes_no(analysis.divergence.rsi),
        analysis.candles,
        last_close
    )
}

pub fn render_json(summary: &ScanSummary) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(summary)
}

pub fn render(summary: &ScanSummary, format: ReportFormat) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Text => Ok(render_text(summary)),
        ReportFormat::Json => render_json(summary),
    }
}
