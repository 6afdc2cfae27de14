//! @ai:module:intent SentencePiece models read from a local .model file
//! @ai:module:layer infrastructure
//! @ai:module:public_api SentencePieceAdapter
//!
//! The native library is only linked with the `sentencepiece` cargo feature.
//! Without it, loading reports the tokenizer as unavailable.

use crate::tokenizer::adapter::TokenizerAdapter;
use anyhow::Result;
use std::path::Path;

/// @ai:intent SentencePiece processor producing pieces
pub struct SentencePieceAdapter {
    id: String,
    #[cfg(feature = "sentencepiece")]
    processor: sentencepiece::SentencePieceProcessor,
}

impl SentencePieceAdapter {
    /// @ai:intent Open a SentencePiece model file
    /// @ai:effects fs:read
    #[cfg(feature = "sentencepiece")]
    pub fn load(id: &str, model_path: &Path) -> Result<Self> {
        use anyhow::Context;

        let processor = sentencepiece::SentencePieceProcessor::open(model_path)
            .with_context(|| format!("Failed to open {}", model_path.display()))?;

        Ok(Self {
            id: id.to_string(),
            processor,
        })
    }

    #[cfg(not(feature = "sentencepiece"))]
    pub fn load(id: &str, model_path: &Path) -> Result<Self> {
        anyhow::bail!(
            "cannot open {} for {}: built without the `sentencepiece` feature",
            model_path.display(),
            id
        )
    }
}

impl TokenizerAdapter for SentencePieceAdapter {
    fn id(&self) -> &str {
        &self.id
    }

    #[cfg(feature = "sentencepiece")]
    fn split(&self, text: &str) -> Result<Vec<String>> {
        let pieces = self.processor.encode(text)?;
        Ok(pieces.into_iter().map(|p| p.piece).collect())
    }

    #[cfg(not(feature = "sentencepiece"))]
    fn split(&self, _text: &str) -> Result<Vec<String>> {
        anyhow::bail!("built without the `sentencepiece` feature")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_model_fails_to_load() {
        let temp = TempDir::new().unwrap();
        let result = SentencePieceAdapter::load("spiece", &temp.path().join("spiece.model"));
        assert!(result.is_err());
    }
}
