//! @ai:module:intent JSON corpus loader for tokenization samples
//! @ai:module:layer infrastructure
//! @ai:module:public_api CorpusLoader
//! @ai:module:stateless true

use crate::corpus::sample::Corpus;
use crate::error::{BenchError, Result};
use std::path::Path;

/// @ai:intent Trait for loading the sample corpus
pub trait CorpusLoaderTrait: Send + Sync {
    /// @ai:intent Load the corpus, failing fatally when the file is absent
    fn load(&self, corpus_file: &Path) -> Result<Corpus>;
}

/// @ai:intent Loads the convention-to-samples mapping from a JSON file
/// @ai:effects pure (stateless)
pub struct CorpusLoader;

impl CorpusLoader {
    /// @ai:intent Create a new corpus loader
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Write the built-in sample corpus unless a file already exists
    /// @ai:effects fs:write
    /// @ai:post returns true only when a new file was written
    pub fn write_sample_if_absent(&self, corpus_file: &Path) -> Result<bool> {
        if corpus_file.exists() {
            return Ok(false);
        }

        if let Some(parent) = corpus_file.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| BenchError::io(parent, e))?;
        }

        let json = serde_json::to_string_pretty(&Corpus::sample()).map_err(|e| BenchError::Json {
            path: corpus_file.to_path_buf(),
            source: e,
        })?;
        std::fs::write(corpus_file, json).map_err(|e| BenchError::io(corpus_file, e))?;

        tracing::info!("Created sample test cases in {}", corpus_file.display());
        Ok(true)
    }
}

impl Default for CorpusLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl CorpusLoaderTrait for CorpusLoader {
    /// @ai:intent Load the corpus file
    /// @ai:effects fs:read
    fn load(&self, corpus_file: &Path) -> Result<Corpus> {
        if !corpus_file.exists() {
            return Err(BenchError::ConfigurationMissing {
                path: corpus_file.to_path_buf(),
            });
        }

        let content =
            std::fs::read_to_string(corpus_file).map_err(|e| BenchError::io(corpus_file, e))?;

        let corpus: Corpus =
            serde_json::from_str(&content).map_err(|e| BenchError::InvalidConfiguration {
                path: corpus_file.to_path_buf(),
                message: e.to_string(),
            })?;

        if corpus.is_empty() {
            tracing::warn!("Corpus {} defines no conventions", corpus_file.display());
        }

        tracing::debug!(
            "Loaded {} samples from {}",
            corpus.sample_count(),
            corpus_file.display()
        );
        Ok(corpus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_corpus_is_configuration_missing() {
        let temp = TempDir::new().unwrap();
        let loader = CorpusLoader::new();

        let err = loader.load(&temp.path().join("test_cases.json")).unwrap_err();
        assert!(matches!(err, BenchError::ConfigurationMissing { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_load_corpus_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test_cases.json");
        std::fs::write(
            &path,
            r#"{"Traditional": ["product-card featured"], "Blocktail": ["product_card --featured"]}"#,
        )
        .unwrap();

        let corpus = CorpusLoader::new().load(&path).unwrap();
        assert_eq!(corpus.sample_count(), 2);
    }

    #[test]
    fn test_non_mapping_corpus_is_invalid() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test_cases.json");
        std::fs::write(&path, r#"["product-card"]"#).unwrap();

        let err = CorpusLoader::new().load(&path).unwrap_err();
        assert!(matches!(err, BenchError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_write_sample_only_once() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data").join("test_cases.json");
        let loader = CorpusLoader::new();

        assert!(loader.write_sample_if_absent(&path).unwrap());
        assert!(!loader.write_sample_if_absent(&path).unwrap());
        assert_eq!(loader.load(&path).unwrap(), Corpus::sample());
    }
}
