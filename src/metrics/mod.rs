//! @ai:module:intent Descriptive statistics over tokenizer result documents
//! @ai:module:layer application
//! @ai:module:public_api ConventionStats, SummaryRow, PracticalImpact, ComplexityBucket, AnalysisSummary, MetricsAggregator

pub mod aggregator;
pub mod types;

pub use aggregator::{
    analyze_convention, complexity_markers, percent_delta, MetricsAggregator,
    MetricsAggregatorTrait,
};
pub use types::{AnalysisSummary, ComplexityBucket, ConventionStats, PracticalImpact, SummaryRow};
