//! @ai:module:intent OpenAI BPE encoders through tiktoken-rs
//! @ai:module:layer infrastructure
//! @ai:module:public_api TiktokenAdapter
//!
//! Vocabularies ship inside tiktoken-rs, so loading never touches the network.

use crate::tokenizer::adapter::TokenizerAdapter;
use anyhow::{Context, Result};
use tiktoken_rs::CoreBPE;

/// @ai:intent tiktoken encoder selected by model name
pub struct TiktokenAdapter {
    id: String,
    bpe: CoreBPE,
}

impl TiktokenAdapter {
    /// @ai:intent Load the encoder a model name maps to
    /// @ai:effects pure
    pub fn load(id: &str, model: &str) -> Result<Self> {
        let bpe = tiktoken_rs::get_bpe_from_model(model)
            .with_context(|| format!("Failed to load tiktoken encoding for {}", model))?;

        Ok(Self {
            id: id.to_string(),
            bpe,
        })
    }
}

impl TokenizerAdapter for TiktokenAdapter {
    fn id(&self) -> &str {
        &self.id
    }

    /// @ai:intent Ordinary encoding, each token id decoded back to its text piece
    /// @ai:effects pure
    fn split(&self, text: &str) -> Result<Vec<String>> {
        self.bpe.split_by_token(text, false)
    }
}
