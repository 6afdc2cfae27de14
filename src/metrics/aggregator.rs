//! @ai:module:intent Statistical aggregation for tokenizer result documents
//! @ai:module:layer application
//! @ai:module:public_api MetricsAggregator, complexity_markers, analyze_convention, percent_delta
//! @ai:module:stateless true

use crate::config::ReportConfig;
use crate::metrics::types::{
    AnalysisSummary, ComplexityBucket, ConventionStats, PracticalImpact, SummaryRow,
};
use crate::results::ResultDocument;
use std::collections::BTreeMap;

/// @ai:intent Trait for metrics aggregation
pub trait MetricsAggregatorTrait: Send + Sync {
    /// @ai:intent Aggregate result documents, keyed by tokenizer id, into a summary
    fn aggregate(&self, documents: &BTreeMap<String, ResultDocument>) -> AnalysisSummary;
}

/// @ai:intent Count structural markers: occurrences of "--" plus occurrences of " -"
/// @ai:effects pure
///
/// Both counts are independent non-overlapping scans, so `"a --b"` counts 2.
pub fn complexity_markers(text: &str) -> usize {
    text.matches("--").count() + text.matches(" -").count()
}

/// @ai:intent Compute mean, range and marker breakdown for one convention
/// @ai:post None when the convention is absent or has no records
/// @ai:effects pure
pub fn analyze_convention(document: &ResultDocument, convention: &str) -> Option<ConventionStats> {
    let records = document.get(convention).filter(|records| !records.is_empty())?;

    let counts: Vec<usize> = records.iter().map(|r| r.num_tokens()).collect();
    let min = counts.iter().copied().min()?;
    let max = counts.iter().copied().max()?;

    let mut by_markers: BTreeMap<usize, Vec<f64>> = BTreeMap::new();
    for record in records {
        by_markers
            .entry(complexity_markers(record.input()))
            .or_default()
            .push(record.num_tokens() as f64);
    }

    let by_complexity = by_markers
        .into_iter()
        .map(|(markers, sizes)| (markers, average(sizes.into_iter())))
        .collect();

    Some(ConventionStats {
        samples: counts.len(),
        avg_tokens: average(counts.iter().map(|&c| c as f64)),
        token_range: (min, max),
        by_complexity,
    })
}

/// @ai:intent Percent reduction of the candidate relative to the baseline
/// @ai:post None when baseline is zero
/// @ai:effects pure
pub fn percent_delta(baseline_avg: f64, candidate_avg: f64) -> Option<f64> {
    if baseline_avg == 0.0 {
        None
    } else {
        Some((baseline_avg - candidate_avg) / baseline_avg * 100.0)
    }
}

/// @ai:intent Calculate average of an iterator of f64
/// @ai:effects pure
fn average<I: Iterator<Item = f64>>(iter: I) -> f64 {
    let (sum, count) = iter.fold((0.0, 0u32), |(s, c), v| (s + v, c + 1));

    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// @ai:intent Population standard deviation
/// @ai:effects pure
fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mean = average(values.iter().copied());
    let variance = average(values.iter().map(|v| (v - mean).powi(2)));
    variance.sqrt()
}

/// @ai:intent Aggregates result documents into an analysis summary
pub struct MetricsAggregator {
    config: ReportConfig,
}

impl MetricsAggregator {
    /// @ai:intent Create an aggregator for the configured conventions
    /// @ai:effects pure
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// @ai:intent Build a comparison row, or None when candidate or primary baseline is missing
    /// @ai:effects pure
    fn summary_row(&self, tokenizer_id: &str, document: &ResultDocument) -> Option<SummaryRow> {
        let primary = self.config.primary_baseline()?;
        let candidate = analyze_convention(document, &self.config.candidate)?;
        analyze_convention(document, primary)?;

        let mut averages = BTreeMap::from([(self.config.candidate.clone(), candidate.avg_tokens)]);
        let mut deltas = BTreeMap::new();

        for baseline in &self.config.baselines {
            let stats = analyze_convention(document, baseline);

            if let Some(stats) = &stats {
                averages.insert(baseline.clone(), stats.avg_tokens);
            }

            let delta = stats.and_then(|s| percent_delta(s.avg_tokens, candidate.avg_tokens));
            deltas.insert(baseline.clone(), delta);
        }

        Some(SummaryRow {
            tokenizer_id: tokenizer_id.to_string(),
            avg_tokens_per_convention: averages,
            pairwise_percent_delta: deltas,
        })
    }

    /// @ai:intent Baseline-minus-candidate averages for every usable pair
    /// @ai:effects pure
    fn savings(&self, documents: &BTreeMap<String, ResultDocument>) -> Vec<f64> {
        let mut savings = Vec::new();

        for document in documents.values() {
            let Some(candidate) = analyze_convention(document, &self.config.candidate) else {
                continue;
            };

            for baseline in &self.config.baselines {
                if let Some(stats) = analyze_convention(document, baseline) {
                    if stats.avg_tokens > 0.0 {
                        savings.push(stats.avg_tokens - candidate.avg_tokens);
                    }
                }
            }
        }

        savings
    }

    /// @ai:intent Project per-component savings onto a page and over iterations
    /// @ai:effects pure
    fn practical_impact(&self, savings: &[f64]) -> Option<PracticalImpact> {
        if savings.is_empty() {
            return None;
        }

        let avg_savings_per_component = average(savings.iter().copied());
        let page_savings = avg_savings_per_component * self.config.page_components as f64;
        let iterated_savings = (self.config.iteration_cycles > 1)
            .then(|| page_savings * self.config.iteration_cycles as f64);

        Some(PracticalImpact {
            avg_savings_per_component,
            page_components: self.config.page_components,
            page_savings,
            iteration_cycles: self.config.iteration_cycles,
            iterated_savings,
            pairs: savings.len(),
        })
    }

    /// @ai:intent Group candidate per-marker means across tokenizers
    /// @ai:effects pure
    fn complexity_buckets(
        &self,
        documents: &BTreeMap<String, ResultDocument>,
    ) -> Vec<ComplexityBucket> {
        let mut grouped: BTreeMap<usize, Vec<f64>> = BTreeMap::new();

        for document in documents.values() {
            if let Some(stats) = analyze_convention(document, &self.config.candidate) {
                for (markers, mean) in stats.by_complexity {
                    grouped.entry(markers).or_default().push(mean);
                }
            }
        }

        grouped
            .into_iter()
            .map(|(markers, means)| ComplexityBucket {
                markers,
                mean_tokens: average(means.iter().copied()),
                std_dev: std_dev(&means),
                tokenizers: means.len(),
            })
            .collect()
    }
}

impl Default for MetricsAggregator {
    fn default() -> Self {
        Self::new(ReportConfig::default())
    }
}

impl MetricsAggregatorTrait for MetricsAggregator {
    /// @ai:intent Aggregate documents into rows, impact and complexity buckets
    /// @ai:effects pure
    fn aggregate(&self, documents: &BTreeMap<String, ResultDocument>) -> AnalysisSummary {
        let rows: Vec<SummaryRow> = documents
            .iter()
            .filter_map(|(id, document)| {
                let row = self.summary_row(id, document);
                if row.is_none() {
                    tracing::debug!("Skipping {} in comparison: incomplete data", id);
                }
                row
            })
            .collect();

        let savings = self.savings(documents);

        AnalysisSummary {
            generated_at: chrono::Utc::now().to_rfc3339(),
            candidate: self.config.candidate.clone(),
            baselines: self.config.baselines.clone(),
            rows,
            impact: self.practical_impact(&savings),
            complexity: self.complexity_buckets(documents),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::TokenRecord;

    /// Record whose token list has `count` entries.
    fn record(input: &str, count: usize) -> TokenRecord {
        TokenRecord::new(input, (0..count).map(|i| format!("t{}", i)).collect())
    }

    fn document(conventions: &[(&str, &[(&str, usize)])]) -> ResultDocument {
        conventions
            .iter()
            .map(|(label, samples)| {
                let records: Vec<TokenRecord> =
                    samples.iter().map(|(input, count)| record(input, *count)).collect();
                (label.to_string(), records)
            })
            .collect()
    }

    #[test]
    fn test_average() {
        let values = vec![10.0, 20.0, 30.0];
        assert!((average(values.into_iter()) - 20.0).abs() < 0.01);
    }

    #[test]
    fn test_average_empty() {
        let values: Vec<f64> = vec![];
        assert!((average(values.into_iter()) - 0.0).abs() < 0.01);
    }

    #[test]
    fn test_population_std_dev() {
        assert!((std_dev(&[4.0, 5.0]) - 0.5).abs() < 1e-9);
        assert_eq!(std_dev(&[3.0]), 0.0);
    }

    #[test]
    fn test_complexity_markers() {
        assert_eq!(complexity_markers("a--b"), 1);
        assert_eq!(complexity_markers("a -b -c"), 2);
        assert_eq!(complexity_markers("a --b"), 2);
        assert_eq!(complexity_markers("a---b"), 1);
        assert_eq!(complexity_markers("product-card featured"), 0);
    }

    #[test]
    fn test_analyze_convention_mean_and_range() {
        let doc = document(&[("Blocktail", &[("a", 3), ("b", 5), ("c", 7)])]);
        let stats = analyze_convention(&doc, "Blocktail").unwrap();

        assert_eq!(stats.avg_tokens, 5.0);
        assert_eq!(stats.token_range, (3, 7));
        assert_eq!(stats.samples, 3);
    }

    #[test]
    fn test_analyze_convention_absent_or_empty() {
        let doc = document(&[("Blocktail", &[])]);
        assert!(analyze_convention(&doc, "Blocktail").is_none());
        assert!(analyze_convention(&doc, "BEM").is_none());
    }

    #[test]
    fn test_equal_marker_counts_share_a_bucket() {
        let doc = document(&[("Blocktail", &[("a--b--c", 4), ("a -b -c", 6), ("plain", 1)])]);
        let stats = analyze_convention(&doc, "Blocktail").unwrap();

        assert_eq!(stats.by_complexity.len(), 2);
        assert_eq!(stats.by_complexity.get(&2), Some(&5.0));
        assert_eq!(stats.by_complexity.get(&0), Some(&1.0));
    }

    #[test]
    fn test_percent_delta() {
        assert!((percent_delta(10.0, 6.0).unwrap() - 40.0).abs() < 1e-9);
        assert!((percent_delta(5.0, 6.0).unwrap() + 20.0).abs() < 1e-9);
        assert_eq!(percent_delta(0.0, 6.0), None);
    }

    #[test]
    fn test_row_without_bem_still_compares_traditional() {
        let mut documents = BTreeMap::new();
        documents.insert(
            "gpt4".to_string(),
            document(&[
                ("Traditional", &[("card active", 10)]),
                ("Blocktail", &[("card --active", 6)]),
            ]),
        );
        documents.insert(
            "bert".to_string(),
            document(&[
                ("Traditional", &[("card active", 8)]),
                ("Blocktail", &[("card --active", 4)]),
                ("BEM", &[("card card--active", 10)]),
            ]),
        );

        let summary = MetricsAggregator::default().aggregate(&documents);
        assert_eq!(summary.rows.len(), 2);

        let gpt4 = summary.rows.iter().find(|r| r.tokenizer_id == "gpt4").unwrap();
        assert!((gpt4.delta("Traditional").unwrap() - 40.0).abs() < 1e-9);
        assert_eq!(gpt4.average("BEM"), None);
        assert_eq!(gpt4.delta("BEM"), None);

        let bert = summary.rows.iter().find(|r| r.tokenizer_id == "bert").unwrap();
        assert!((bert.delta("BEM").unwrap() - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_rows_skip_missing_candidate_or_primary_baseline() {
        let mut documents = BTreeMap::new();
        documents.insert(
            "no_trad".to_string(),
            document(&[("Blocktail", &[("a --b", 3)]), ("BEM", &[("a a--b", 5)])]),
        );
        documents.insert(
            "no_blocktail".to_string(),
            document(&[("Traditional", &[("a b", 3)])]),
        );

        let summary = MetricsAggregator::default().aggregate(&documents);
        assert!(summary.rows.is_empty());
    }

    #[test]
    fn test_zero_baseline_average_is_not_applicable() {
        let mut documents = BTreeMap::new();
        documents.insert(
            "empty".to_string(),
            document(&[("Traditional", &[("", 0)]), ("Blocktail", &[("", 0)])]),
        );

        let summary = MetricsAggregator::default().aggregate(&documents);
        assert_eq!(summary.rows.len(), 1);
        assert_eq!(summary.rows[0].delta("Traditional"), None);
        assert!(summary.impact.is_none());
    }

    #[test]
    fn test_practical_impact_averages_all_pairs() {
        let mut documents = BTreeMap::new();
        documents.insert(
            "gpt4".to_string(),
            document(&[
                ("Traditional", &[("a b", 7)]),
                ("Blocktail", &[("a --b", 5)]),
                ("BEM", &[("a a--b", 9)]),
            ]),
        );

        let summary = MetricsAggregator::default().aggregate(&documents);
        let impact = summary.impact.unwrap();

        assert_eq!(impact.pairs, 2);
        assert!((impact.avg_savings_per_component - 3.0).abs() < 1e-9);
        assert!((impact.page_savings - 60.0).abs() < 1e-9);
        assert_eq!(impact.iterated_savings, Some(300.0));
    }

    #[test]
    fn test_single_iteration_has_no_iterated_projection() {
        let mut documents = BTreeMap::new();
        documents.insert(
            "gpt4".to_string(),
            document(&[("Traditional", &[("a b", 7)]), ("Blocktail", &[("a --b", 5)])]),
        );

        let config = ReportConfig {
            iteration_cycles: 1,
            ..Default::default()
        };
        let impact = MetricsAggregator::new(config).aggregate(&documents).impact.unwrap();
        assert_eq!(impact.iterated_savings, None);
    }

    #[test]
    fn test_complexity_buckets_across_tokenizers() {
        let mut documents = BTreeMap::new();
        documents.insert(
            "gpt4".to_string(),
            document(&[("Blocktail", &[("a --b", 4), ("a", 1)])]),
        );
        documents.insert(
            "bert".to_string(),
            document(&[("Blocktail", &[("a --b", 5)])]),
        );

        let buckets = MetricsAggregator::default().aggregate(&documents).complexity;
        assert_eq!(buckets.len(), 2);

        assert_eq!(buckets[0].markers, 0);
        assert_eq!(buckets[0].tokenizers, 1);

        assert_eq!(buckets[1].markers, 2);
        assert!((buckets[1].mean_tokens - 4.5).abs() < 1e-9);
        assert!((buckets[1].std_dev - 0.5).abs() < 1e-9);
    }
}
