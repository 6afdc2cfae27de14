//! @ai:module:intent CSS naming convention tokenization benchmark library
//! @ai:module:layer application
//! @ai:module:public_api config, corpus, error, metrics, report, results, runner, tokenizer

pub mod config;
pub mod corpus;
pub mod error;
pub mod metrics;
pub mod report;
pub mod results;
pub mod runner;
pub mod tokenizer;

pub use config::BenchConfig;
pub use corpus::{Corpus, CorpusLoader};
pub use error::{BenchError, Result};
pub use metrics::{AnalysisSummary, MetricsAggregator};
pub use report::ReportGenerator;
pub use results::{ResultDocument, ResultStore, TokenRecord};
pub use runner::{BatchRunner, RunSummary, Selection};
pub use tokenizer::{TokenizerAdapter, TokenizerRegistry};
