use std::path::PathBuf;

use async_trait::async_trait;
use snafu::{Backtrace, ResultExt, Snafu};
use tokio::io::AsyncWriteExt;

use crate::{
    io::format::{ReportFormat, render},
    scanner::ScanSummary,
};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SinkError {
    /// The summary could not be rendered in the requested format.
    #[snafu(display("Failed to render report: {source}"))]
    Render {
        source: serde_json::Error,
        backtrace: Backtrace,
    },

    /// Writing to the destination failed.
    #[snafu(display("Failed to write report to {destination}: {source}"))]
    Write {
        destination: String,
        source: std::io::Error,
        backtrace: Backtrace,
    },
}

#[async_trait]
pub trait ReportSink {
    /// What a successful write returns: nothing for a console, the path for a
    /// file.
    type Output;

    async fn write(&self, summary: &ScanSummary) -> Result<Self::Output, SinkError>;
}

/// Writes the rendered summary to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink {
    pub format: ReportFormat,
}

#[async_trait]
impl ReportSink for ConsoleSink {
    type Output = ();

    async fn write(&self, summary: &ScanSummary) -> Result<(), SinkError> {
        let mut rendered = render(summary, self.format).context(RenderSnafu)?;
        rendered.push('\n');

        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(rendered.as_bytes())
            .await
            .context(WriteSnafu { destination: "stdout" })?;
        stdout.flush().await.context(WriteSnafu { destination: "stdout" })
    }
}

/// Writes the summary as JSON to a file, replacing any previous content.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    pub path: PathBuf,
}

#[async_trait]
impl ReportSink for JsonFileSink {
    type Output = PathBuf;

    async fn write(&self, summary: &ScanSummary) -> Result<PathBuf, SinkError> {
        let rendered = render(summary, ReportFormat::Json).context(RenderSnafu)?;
        let destination = self.path.display().to_string();

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .context(WriteSnafu { destination: &destination })?;
        }
        tokio::fs::write(&self.path, rendered)
            .await
            .context(WriteSnafu { destination })?;
        Ok(self.path.clone())
    }
}
