//! @ai:module:intent Markdown report generation
//! @ai:module:layer infrastructure
//! @ai:module:public_api MarkdownReporter
//! @ai:module:stateless true

use crate::metrics::{AnalysisSummary, ComplexityBucket, PracticalImpact, SummaryRow};
use anyhow::{Context, Result};
use std::path::Path;

/// Placeholder for averages and deltas that cannot be computed.
pub const NOT_APPLICABLE: &str = "N/A";

/// @ai:intent Trait for Markdown report generation
pub trait MarkdownReporterTrait: Send + Sync {
    /// @ai:intent Render the report as a markdown string
    fn render(&self, summary: &AnalysisSummary) -> String;

    /// @ai:intent Generate Markdown report to file
    fn generate(&self, summary: &AnalysisSummary, output_path: &Path) -> Result<()>;
}

/// @ai:intent Generates Markdown reports from analysis summaries
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// @ai:intent Create a new Markdown reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Format an optional average
    /// @ai:effects pure
    fn format_average(value: Option<f64>) -> String {
        value
            .map(|v| format!("{:.1}", v))
            .unwrap_or_else(|| NOT_APPLICABLE.to_string())
    }

    /// @ai:intent Format an optional percent delta
    /// @ai:effects pure
    fn format_delta(value: Option<f64>) -> String {
        value
            .map(|v| format!("{:.1}%", v))
            .unwrap_or_else(|| NOT_APPLICABLE.to_string())
    }

    /// @ai:intent Render one table line from cells
    /// @ai:effects pure
    fn table_line(cells: &[String]) -> String {
        format!("| {} |\n", cells.join(" | "))
    }

    /// @ai:intent Generate the cross comparison table
    /// @ai:effects pure
    fn generate_comparison_table(summary: &AnalysisSummary) -> String {
        let mut output = String::from("## Cross Comparison\n\n");

        if summary.rows.is_empty() {
            output.push_str("*No valid data found.*\n\n");
            return output;
        }

        let conventions: Vec<&str> = std::iter::once(summary.candidate.as_str())
            .chain(summary.baselines.iter().map(String::as_str))
            .collect();

        let mut header = vec!["Tokenizer".to_string()];
        header.extend(conventions.iter().map(|c| format!("{} Avg", c)));
        header.extend(summary.baselines.iter().map(|b| format!("vs {}", b)));

        let separator: Vec<String> = header.iter().map(|h| "-".repeat(h.len())).collect();

        output.push_str(&Self::table_line(&header));
        output.push_str(&Self::table_line(&separator));

        for row in &summary.rows {
            output.push_str(&Self::table_line(&Self::row_cells(row, &conventions, &summary.baselines)));
        }

        output.push('\n');
        output
    }

    /// @ai:intent Cells of one comparison row
    /// @ai:effects pure
    fn row_cells(row: &SummaryRow, conventions: &[&str], baselines: &[String]) -> Vec<String> {
        let mut cells = vec![row.tokenizer_id.clone()];
        cells.extend(conventions.iter().map(|c| Self::format_average(row.average(c))));
        cells.extend(baselines.iter().map(|b| Self::format_delta(row.delta(b))));
        cells
    }

    /// @ai:intent Generate practical impact section
    /// @ai:effects pure
    fn generate_impact_section(impact: Option<&PracticalImpact>) -> String {
        let mut output = String::from("## Practical Impact\n\n");

        let Some(impact) = impact else {
            output.push_str("- Not enough data to compute practical impact.\n\n");
            return output;
        };

        output.push_str(&format!(
            "- Average token reduction per component: {:.1} tokens\n",
            impact.avg_savings_per_component
        ));
        output.push_str(&format!(
            "- In a typical page with {} components: {:.0} tokens\n",
            impact.page_components, impact.page_savings
        ));

        if let Some(iterated) = impact.iterated_savings {
            output.push_str(&format!(
                "- Over {} iterative refinements: {:.0} tokens saved per page\n",
                impact.iteration_cycles, iterated
            ));
            output.push_str(
                "\n(In long-chain AI-assisted development, these savings compound across multiple revisions.)\n",
            );
        }

        output.push('\n');
        output
    }

    /// @ai:intent Generate marker complexity breakdown
    /// @ai:effects pure
    fn generate_complexity_section(buckets: &[ComplexityBucket]) -> String {
        let mut output = String::from("### Token Usage by Marker Complexity\n\n");

        if buckets.is_empty() {
            output.push_str("- No marker complexity data.\n\n");
            return output;
        }

        for bucket in buckets {
            output.push_str(&format!(
                "- {} markers: {:.1} tokens (±{:.1})\n",
                bucket.markers, bucket.mean_tokens, bucket.std_dev
            ));
        }

        output.push('\n');
        output
    }

    /// @ai:intent Closing note on marker usage
    /// @ai:effects pure
    fn generate_note(candidate: &str) -> String {
        format!(
            "*Note:* All naming conventions rely on some markers. As you add more states or \
             contexts, token usage inevitably rises. However, methods like {} aim to keep \
             subword splitting minimal, leading to leaner tokens even when stacking multiple \
             states or contexts.\n",
            candidate
        )
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownReporterTrait for MarkdownReporter {
    /// @ai:intent Render all report sections
    /// @ai:effects pure
    fn render(&self, summary: &AnalysisSummary) -> String {
        let mut content = String::from("# Tokenization Analysis Summary\n\n");

        content.push_str(&Self::generate_comparison_table(summary));
        content.push_str(&Self::generate_impact_section(summary.impact.as_ref()));
        content.push_str(&Self::generate_complexity_section(&summary.complexity));
        content.push_str(&Self::generate_note(&summary.candidate));

        content
    }

    /// @ai:intent Generate Markdown report to file
    /// @ai:effects fs:write
    fn generate(&self, summary: &AnalysisSummary, output_path: &Path) -> Result<()> {
        std::fs::write(output_path, self.render(summary))
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn summary(rows: Vec<SummaryRow>, impact: Option<PracticalImpact>) -> AnalysisSummary {
        AnalysisSummary {
            generated_at: "2026-01-19T00:00:00Z".to_string(),
            candidate: "Blocktail".to_string(),
            baselines: vec!["Traditional".to_string(), "BEM".to_string()],
            rows,
            impact,
            complexity: vec![],
        }
    }

    fn gpt4_row_without_bem() -> SummaryRow {
        SummaryRow {
            tokenizer_id: "gpt4".to_string(),
            avg_tokens_per_convention: BTreeMap::from([
                ("Blocktail".to_string(), 6.0),
                ("Traditional".to_string(), 10.0),
            ]),
            pairwise_percent_delta: BTreeMap::from([
                ("Traditional".to_string(), Some(40.0)),
                ("BEM".to_string(), None),
            ]),
        }
    }

    #[test]
    fn test_format_delta() {
        assert_eq!(MarkdownReporter::format_delta(Some(40.0)), "40.0%");
        assert_eq!(MarkdownReporter::format_delta(Some(-5.25)), "-5.2%");
        assert_eq!(MarkdownReporter::format_delta(None), "N/A");
    }

    #[test]
    fn test_table_shows_not_applicable_for_missing_bem() {
        let table = MarkdownReporter::generate_comparison_table(&summary(vec![gpt4_row_without_bem()], None));

        let expected = "## Cross Comparison\n\n\
            | Tokenizer | Blocktail Avg | Traditional Avg | BEM Avg | vs Traditional | vs BEM |\n\
            | --------- | ------------- | --------------- | ------- | -------------- | ------ |\n\
            | gpt4 | 6.0 | 10.0 | N/A | 40.0% | N/A |\n\n";
        assert_eq!(table, expected);
    }

    #[test]
    fn test_empty_sections() {
        let content = MarkdownReporter::new().render(&summary(vec![], None));

        assert!(content.starts_with("# Tokenization Analysis Summary\n"));
        assert!(content.contains("*No valid data found.*"));
        assert!(content.contains("- Not enough data to compute practical impact."));
        assert!(content.contains("- No marker complexity data."));
    }

    #[test]
    fn test_impact_section_with_iterations() {
        let impact = PracticalImpact {
            avg_savings_per_component: 2.0,
            page_components: 20,
            page_savings: 40.0,
            iteration_cycles: 5,
            iterated_savings: Some(200.0),
            pairs: 1,
        };

        let section = MarkdownReporter::generate_impact_section(Some(&impact));
        assert!(section.contains("- Average token reduction per component: 2.0 tokens\n"));
        assert!(section.contains("- In a typical page with 20 components: 40 tokens\n"));
        assert!(section.contains("- Over 5 iterative refinements: 200 tokens saved per page\n"));
    }

    #[test]
    fn test_impact_section_single_iteration() {
        let impact = PracticalImpact {
            avg_savings_per_component: 1.5,
            page_components: 20,
            page_savings: 30.0,
            iteration_cycles: 1,
            iterated_savings: None,
            pairs: 2,
        };

        let section = MarkdownReporter::generate_impact_section(Some(&impact));
        assert!(!section.contains("iterative refinements"));
    }

    #[test]
    fn test_complexity_lines() {
        let buckets = vec![ComplexityBucket {
            markers: 2,
            mean_tokens: 4.5,
            std_dev: 0.5,
            tokenizers: 2,
        }];

        let section = MarkdownReporter::generate_complexity_section(&buckets);
        assert!(section.contains("- 2 markers: 4.5 tokens (±0.5)\n"));
    }

    #[test]
    fn test_generate_markdown_report() {
        let reporter = MarkdownReporter::new();
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("tokenization_summary.md");

        reporter
            .generate(&summary(vec![gpt4_row_without_bem()], None), &output)
            .unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        assert!(content.contains("| gpt4 | 6.0 | 10.0 | N/A | 40.0% | N/A |"));
        assert!(content.contains("methods like Blocktail"));
    }
}
