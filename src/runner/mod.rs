//! @ai:module:intent Batch tokenization of the corpus, one result document per tokenizer
//! @ai:module:layer application
//! @ai:module:public_api BatchRunner, RunSummary, TokenizerRun, RunOutcome, Selection

pub mod executor;

pub use executor::{BatchRunner, RunOutcome, RunSummary, Selection, TokenizerRun, ALL_SENTINEL};
