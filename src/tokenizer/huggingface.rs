//! @ai:module:intent Hugging Face tokenizers loaded from the Hub
//! @ai:module:layer infrastructure
//! @ai:module:public_api HuggingFaceAdapter

use crate::tokenizer::adapter::TokenizerAdapter;
use anyhow::{anyhow, Context, Result};
use hf_hub::api::sync::ApiBuilder;
use std::path::Path;
use tokenizers::Tokenizer;

/// @ai:intent tokenizer.json based tokenizer from a Hub model repository
pub struct HuggingFaceAdapter {
    id: String,
    tokenizer: Tokenizer,
}

impl HuggingFaceAdapter {
    /// @ai:intent Fetch tokenizer.json for a repository (cached by hf-hub) and load it
    /// @ai:pre gated repositories need a token with access
    /// @ai:effects network, fs:read, fs:write
    pub fn load(id: &str, repo: &str, token: Option<String>) -> Result<Self> {
        let api = ApiBuilder::new()
            .with_token(token)
            .build()
            .context("Failed to create Hugging Face Hub client")?;

        let path = api
            .model(repo.to_string())
            .get("tokenizer.json")
            .with_context(|| format!("Failed to fetch tokenizer.json for {}", repo))?;

        tracing::debug!("Using {} for {}", path.display(), repo);
        Self::from_file(id, &path)
    }

    /// @ai:intent Load a local tokenizer.json
    /// @ai:effects fs:read
    pub fn from_file(id: &str, path: &Path) -> Result<Self> {
        let tokenizer = Tokenizer::from_file(path)
            .map_err(|e| anyhow!("Failed to load {}: {}", path.display(), e))?;

        Ok(Self {
            id: id.to_string(),
            tokenizer,
        })
    }
}

impl TokenizerAdapter for HuggingFaceAdapter {
    fn id(&self) -> &str {
        &self.id
    }

    /// @ai:intent Token strings without added special tokens
    /// @ai:effects pure
    fn split(&self, text: &str) -> Result<Vec<String>> {
        let encoding = self
            .tokenizer
            .encode(text, false)
            .map_err(|e| anyhow!("encode failed: {}", e))?;

        Ok(encoding.get_tokens().to_vec())
    }
}
