//! @ai:module:intent Tokenize every corpus sample with each selected tokenizer
//! @ai:module:layer application
//! @ai:module:public_api BatchRunner, RunSummary, TokenizerRun, RunOutcome, Selection
//! @ai:module:stateless true

use crate::corpus::Corpus;
use crate::error::{BenchError, Result};
use crate::results::{ResultDocument, ResultStoreTrait, TokenRecord};
use crate::tokenizer::{TokenizerAdapter, TokenizerProvider};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Command-line value selecting every registered tokenizer.
pub const ALL_SENTINEL: &str = "all";

/// @ai:intent Which tokenizers a batch run covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    Single(String),
}

impl Selection {
    /// @ai:intent Parse a tokenizer id or the "all" sentinel
    /// @ai:effects pure
    pub fn parse(value: &str) -> Self {
        if value == ALL_SENTINEL {
            Selection::All
        } else {
            Selection::Single(value.to_string())
        }
    }
}

/// @ai:intent How one tokenizer's run ended
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Saved {
        path: PathBuf,
        records: usize,
        failed_samples: usize,
    },
    Failed {
        reason: String,
    },
}

/// @ai:intent Outcome of running one tokenizer over the corpus
#[derive(Debug, Clone, PartialEq)]
pub struct TokenizerRun {
    pub tokenizer_id: String,
    pub outcome: RunOutcome,
}

impl TokenizerRun {
    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, RunOutcome::Saved { .. })
    }
}

/// @ai:intent Per-tokenizer outcomes of a batch, in run order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub runs: Vec<TokenizerRun>,
}

impl RunSummary {
    /// @ai:intent Ids of tokenizers whose document was written
    /// @ai:effects pure
    pub fn succeeded(&self) -> Vec<&str> {
        self.runs
            .iter()
            .filter(|run| run.succeeded())
            .map(|run| run.tokenizer_id.as_str())
            .collect()
    }

    /// @ai:intent Ids of tokenizers that produced no document
    /// @ai:effects pure
    pub fn failed(&self) -> Vec<&str> {
        self.runs
            .iter()
            .filter(|run| !run.succeeded())
            .map(|run| run.tokenizer_id.as_str())
            .collect()
    }
}

/// @ai:intent Runs tokenizers over the corpus and stores their documents
pub struct BatchRunner<P: TokenizerProvider, S: ResultStoreTrait> {
    provider: P,
    store: S,
    corpus: Corpus,
}

impl<P: TokenizerProvider, S: ResultStoreTrait> BatchRunner<P, S> {
    /// @ai:intent Create a new batch runner
    /// @ai:effects pure
    pub fn new(provider: P, store: S, corpus: Corpus) -> Self {
        Self {
            provider,
            store,
            corpus,
        }
    }

    /// @ai:intent Tokenize all samples, omitting the ones that fail
    /// @ai:post every convention of the corpus is a key of the document
    /// @ai:effects pure
    fn tokenize_corpus(&self, tokenizer: &dyn TokenizerAdapter) -> (ResultDocument, usize) {
        let mut grouped: BTreeMap<&str, Vec<TokenRecord>> = self
            .corpus
            .conventions()
            .map(|(convention, samples)| (convention, Vec::with_capacity(samples.len())))
            .collect();
        let mut failed = 0;

        for sample in self.corpus.samples() {
            match tokenizer.tokenize(sample.text) {
                Ok(record) => grouped.entry(sample.label).or_default().push(record),
                Err(e) => {
                    failed += 1;
                    tracing::warn!("Skipping {} sample: {}", sample.label, e);
                }
            }
        }

        (grouped.into_iter().collect(), failed)
    }

    /// @ai:intent Load one tokenizer, tokenize the corpus and write its document
    /// @ai:effects network, fs:write
    fn run_tokenizer(&self, tokenizer_id: &str) -> Result<RunOutcome> {
        let tokenizer = self.provider.load(tokenizer_id)?;
        let (document, failed_samples) = self.tokenize_corpus(tokenizer.as_ref());

        let path = self.store.save(tokenizer_id, &document)?;
        tracing::info!("Results saved to {}", path.display());

        Ok(RunOutcome::Saved {
            path,
            records: document.record_count(),
            failed_samples,
        })
    }

    /// @ai:intent Run one tokenizer; only fatal errors escape
    /// @ai:effects network, fs:write
    pub fn run_one(&self, tokenizer_id: &str) -> Result<TokenizerRun> {
        let outcome = match self.run_tokenizer(tokenizer_id) {
            Ok(outcome) => outcome,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                tracing::error!("Error initializing or processing tokenizer '{}': {}", tokenizer_id, e);
                RunOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };

        Ok(TokenizerRun {
            tokenizer_id: tokenizer_id.to_string(),
            outcome,
        })
    }

    /// @ai:intent Run the selected tokenizers in registry order
    /// @ai:pre a single selection names a known tokenizer
    /// @ai:effects network, fs:write
    pub fn run(&self, selection: &Selection) -> Result<RunSummary> {
        let ids: Vec<String> = match selection {
            Selection::All => self.provider.ids().into_iter().map(str::to_string).collect(),
            Selection::Single(id) => {
                if !self.provider.ids().contains(&id.as_str()) {
                    return Err(BenchError::UnknownTokenizer(id.clone()));
                }
                vec![id.clone()]
            }
        };

        let total = ids.len();
        let mut summary = RunSummary::default();

        for (index, id) in ids.iter().enumerate() {
            tracing::info!("[{}/{}] Processing tokenizer: {}", index + 1, total, id);
            summary.runs.push(self.run_one(id)?);
        }

        Ok(summary)
    }
}
