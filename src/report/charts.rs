//! @ai:module:intent Chart generation for tokenization summaries
//! @ai:module:layer infrastructure
//! @ai:module:public_api ChartGenerator
//! @ai:module:stateless true

use crate::metrics::AnalysisSummary;
use anyhow::Result;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

/// @ai:intent Trait for chart generation
pub trait ChartGeneratorTrait: Send + Sync {
    /// @ai:intent Draw the averages chart; false when there is nothing to plot
    fn generate(&self, summary: &AnalysisSummary, output_path: &Path) -> Result<bool>;
}

/// @ai:intent Generates grouped bar charts of average token counts
pub struct ChartGenerator;

impl ChartGenerator {
    /// @ai:intent Create a new chart generator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Conventions plotted per tokenizer, candidate first
    /// @ai:effects pure
    fn conventions(summary: &AnalysisSummary) -> Vec<&str> {
        std::iter::once(summary.candidate.as_str())
            .chain(summary.baselines.iter().map(String::as_str))
            .collect()
    }

    /// @ai:intent Largest plotted average
    /// @ai:effects pure
    fn max_average(summary: &AnalysisSummary) -> f64 {
        summary
            .rows
            .iter()
            .flat_map(|row| row.avg_tokens_per_convention.values().copied())
            .fold(0.0, f64::max)
    }

    /// @ai:intent Slot range `[start, end)` covered by one tokenizer's bars
    /// @ai:effects pure
    fn group_span(row_index: usize, bars: usize) -> (i32, i32) {
        // one empty slot separates neighbouring groups
        let start = (row_index * (bars + 1)) as i32;
        (start, start + bars as i32)
    }
}

impl Default for ChartGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartGeneratorTrait for ChartGenerator {
    /// @ai:intent Generate grouped bars of per-tokenizer averages
    /// @ai:effects fs:write
    fn generate(&self, summary: &AnalysisSummary, output_path: &Path) -> Result<bool> {
        if summary.rows.is_empty() {
            return Ok(false);
        }

        let conventions = Self::conventions(summary);
        let bars = conventions.len();
        let slots = Self::group_span(summary.rows.len(), bars).0;
        let y_max = (Self::max_average(summary) * 1.2).max(1.0);

        let root = BitMapBackend::new(output_path, (1000, 600)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Average Tokens by Naming Convention", ("sans-serif", 30))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(0..slots, 0f64..y_max)?;

        // tokenizer names are drawn per group below
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(0)
            .y_desc("Average tokens")
            .draw()?;

        for (index, convention) in conventions.iter().enumerate() {
            let color = Palette99::pick(index).mix(0.8);

            chart
                .draw_series(summary.rows.iter().enumerate().filter_map(|(row_index, row)| {
                    let value = row.average(convention)?;
                    let x = Self::group_span(row_index, bars).0 + index as i32;
                    Some(Rectangle::new([(x, 0.0), (x + 1, value)], color.filled()))
                }))?
                .label(*convention)
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.filled()));
        }

        let label_style = ("sans-serif", 15)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top));

        for (row_index, row) in summary.rows.iter().enumerate() {
            let (start, end) = Self::group_span(row_index, bars);
            let (left, baseline) = chart.backend_coord(&(start, 0.0));
            let (right, _) = chart.backend_coord(&(end, 0.0));

            root.draw(&Text::new(
                row.tokenizer_id.clone(),
                ((left + right) / 2, baseline + 8),
                label_style.clone(),
            ))?;
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .border_style(BLACK)
            .background_style(WHITE.mix(0.8))
            .draw()?;

        root.present()?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::SummaryRow;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn summary(rows: Vec<SummaryRow>) -> AnalysisSummary {
        AnalysisSummary {
            generated_at: "2026-01-19T00:00:00Z".to_string(),
            candidate: "Blocktail".to_string(),
            baselines: vec!["Traditional".to_string(), "BEM".to_string()],
            rows,
            impact: None,
            complexity: vec![],
        }
    }

    #[test]
    fn test_empty_summary_draws_nothing() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("token_averages.png");

        let drawn = ChartGenerator::new().generate(&summary(vec![]), &output).unwrap();
        assert!(!drawn);
        assert!(!output.exists());
    }

    #[test]
    fn test_max_average() {
        let rows = vec![
            SummaryRow {
                tokenizer_id: "gpt4".to_string(),
                avg_tokens_per_convention: BTreeMap::from([
                    ("Blocktail".to_string(), 4.0),
                    ("Traditional".to_string(), 7.5),
                ]),
                pairwise_percent_delta: BTreeMap::new(),
            },
            SummaryRow {
                tokenizer_id: "bert".to_string(),
                avg_tokens_per_convention: BTreeMap::from([("BEM".to_string(), 9.0)]),
                pairwise_percent_delta: BTreeMap::new(),
            },
        ];

        assert_eq!(ChartGenerator::max_average(&summary(rows)), 9.0);
    }

    #[test]
    fn test_group_spans_start_every_row_once() {
        let spans: Vec<_> = (0..9).map(|row| ChartGenerator::group_span(row, 3)).collect();

        assert_eq!(spans[0], (0, 3));
        assert_eq!(spans[1], (4, 7));
        assert_eq!(spans[8], (32, 35));
        assert!(spans.windows(2).all(|pair| pair[0].1 < pair[1].0));
    }

    #[test]
    fn test_draws_chart_for_every_tokenizer() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("token_averages.png");

        let rows = ["bert", "gpt2", "gpt35", "gpt4", "llama3"]
            .iter()
            .enumerate()
            .map(|(i, id)| SummaryRow {
                tokenizer_id: id.to_string(),
                avg_tokens_per_convention: BTreeMap::from([
                    ("Blocktail".to_string(), 4.0 + i as f64),
                    ("Traditional".to_string(), 6.0 + i as f64),
                ]),
                pairwise_percent_delta: BTreeMap::new(),
            })
            .collect();

        // text rendering needs a system font; hosts without one report an error
        match ChartGenerator::new().generate(&summary(rows), &output) {
            Ok(drawn) => {
                assert!(drawn);
                assert!(output.exists());
            }
            Err(e) => eprintln!("chart not rendered on this host: {e:#}"),
        }
    }

    #[test]
    fn test_conventions_candidate_first() {
        assert_eq!(
            ChartGenerator::conventions(&summary(vec![])),
            vec!["Blocktail", "Traditional", "BEM"]
        );
    }
}
