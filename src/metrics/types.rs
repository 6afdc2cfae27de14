//! @ai:module:intent Metric types for tokenization analysis
//! @ai:module:layer domain
//! @ai:module:public_api ConventionStats, SummaryRow, PracticalImpact, ComplexityBucket, AnalysisSummary
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// @ai:intent Statistics for one convention within one result document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConventionStats {
    pub samples: usize,
    pub avg_tokens: f64,
    /// (min, max) of num_tokens
    pub token_range: (usize, usize),
    /// Marker count to mean num_tokens of the samples with that count
    pub by_complexity: BTreeMap<usize, f64>,
}

/// @ai:intent Comparison table row for one tokenizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub tokenizer_id: String,
    /// Only conventions present in the document appear here
    pub avg_tokens_per_convention: BTreeMap<String, f64>,
    /// Keyed by baseline; None means not applicable
    pub pairwise_percent_delta: BTreeMap<String, Option<f64>>,
}

impl SummaryRow {
    pub fn average(&self, convention: &str) -> Option<f64> {
        self.avg_tokens_per_convention.get(convention).copied()
    }

    pub fn delta(&self, baseline: &str) -> Option<f64> {
        self.pairwise_percent_delta.get(baseline).copied().flatten()
    }
}

/// @ai:intent Projected savings of the candidate convention
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticalImpact {
    pub avg_savings_per_component: f64,
    pub page_components: u32,
    pub page_savings: f64,
    pub iteration_cycles: u32,
    /// Present only when iteration_cycles > 1
    pub iterated_savings: Option<f64>,
    /// Number of (tokenizer, baseline) pairs averaged
    pub pairs: usize,
}

/// @ai:intent Candidate token usage at one marker count, across tokenizers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityBucket {
    pub markers: usize,
    pub mean_tokens: f64,
    /// Population standard deviation of the per-tokenizer means
    pub std_dev: f64,
    pub tokenizers: usize,
}

/// @ai:intent Complete output of one aggregation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub generated_at: String,
    pub candidate: String,
    pub baselines: Vec<String>,
    pub rows: Vec<SummaryRow>,
    pub impact: Option<PracticalImpact>,
    pub complexity: Vec<ComplexityBucket>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_lookups_distinguish_absent_and_not_applicable() {
        let row = SummaryRow {
            tokenizer_id: "gpt4".to_string(),
            avg_tokens_per_convention: BTreeMap::from([
                ("Blocktail".to_string(), 4.0),
                ("Traditional".to_string(), 0.0),
            ]),
            pairwise_percent_delta: BTreeMap::from([("Traditional".to_string(), None)]),
        };

        assert_eq!(row.average("Traditional"), Some(0.0));
        assert_eq!(row.average("BEM"), None);
        assert_eq!(row.delta("Traditional"), None);
        assert_eq!(row.delta("BEM"), None);
    }
}
