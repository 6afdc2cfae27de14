//! @ai:module:intent Report generation for tokenization summaries
//! @ai:module:layer infrastructure
//! @ai:module:public_api ReportGenerator, ReportFiles, JsonReporter, MarkdownReporter, ChartGenerator, ReadmePatcher

pub mod charts;
pub mod json_report;
pub mod markdown_report;
pub mod readme;

pub use charts::{ChartGenerator, ChartGeneratorTrait};
pub use json_report::{JsonReporter, JsonReporterTrait};
pub use markdown_report::{MarkdownReporter, MarkdownReporterTrait};
pub use readme::{splice, ReadmePatcher, END_MARKER, START_MARKER};

use crate::metrics::AnalysisSummary;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const MARKDOWN_FILE: &str = "tokenization_summary.md";
pub const JSON_FILE: &str = "tokenization_summary.json";
pub const CHART_FILE: &str = "token_averages.png";

/// @ai:intent Files written by one report run
#[derive(Debug, Clone, PartialEq)]
pub struct ReportFiles {
    pub markdown: PathBuf,
    pub json: PathBuf,
    /// None when the chart was skipped or failed
    pub chart: Option<PathBuf>,
    pub readme_updated: bool,
}

/// @ai:intent Combined report generator
pub struct ReportGenerator {
    json: JsonReporter,
    markdown: MarkdownReporter,
    charts: ChartGenerator,
    readme: ReadmePatcher,
}

impl ReportGenerator {
    /// @ai:intent Create a new report generator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            json: JsonReporter::new(),
            markdown: MarkdownReporter::new(),
            charts: ChartGenerator::new(),
            readme: ReadmePatcher::new(),
        }
    }

    /// @ai:intent Draw the chart, downgrading failures to a warning
    /// @ai:effects fs:write
    fn generate_chart(&self, summary: &AnalysisSummary, output_path: &Path) -> Option<PathBuf> {
        match self.charts.generate(summary, output_path) {
            Ok(true) => Some(output_path.to_path_buf()),
            Ok(false) => {
                tracing::info!("No data to chart, skipping {}", output_path.display());
                None
            }
            Err(e) => {
                tracing::warn!("Failed to generate chart {}: {:#}", output_path.display(), e);
                None
            }
        }
    }

    /// @ai:intent Generate all reports and optionally splice the README
    /// @ai:effects fs:write
    pub fn generate_all(
        &self,
        summary: &AnalysisSummary,
        output_dir: &Path,
        readme: Option<&Path>,
    ) -> Result<ReportFiles> {
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create {}", output_dir.display()))?;

        let markdown_path = output_dir.join(MARKDOWN_FILE);
        let json_path = output_dir.join(JSON_FILE);

        self.markdown.generate(summary, &markdown_path)?;
        self.json.generate(summary, &json_path)?;

        let chart = self.generate_chart(summary, &output_dir.join(CHART_FILE));

        let readme_updated = match readme {
            Some(path) => self.readme.patch(path, &self.markdown.render(summary))?,
            None => false,
        };

        tracing::info!("Reports generated in {}", output_dir.display());
        Ok(ReportFiles {
            markdown: markdown_path,
            json: json_path,
            chart,
            readme_updated,
        })
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}
