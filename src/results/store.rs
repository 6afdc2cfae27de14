//! @ai:module:intent Read and write `<tokenizer_id>_results.json` documents
//! @ai:module:layer infrastructure
//! @ai:module:public_api ResultStore, ResultStoreTrait
//! @ai:module:stateless true

use crate::error::{BenchError, Result};
use crate::results::record::ResultDocument;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File name suffix shared by every result document.
pub const RESULTS_SUFFIX: &str = "_results.json";

/// @ai:intent Trait for persisting result documents
pub trait ResultStoreTrait: Send + Sync {
    /// @ai:intent Write a whole document for one tokenizer
    fn save(&self, tokenizer_id: &str, document: &ResultDocument) -> Result<PathBuf>;

    /// @ai:intent Load every readable document, keyed by tokenizer id
    fn load_all(&self) -> Result<BTreeMap<String, ResultDocument>>;
}

/// @ai:intent Directory of per-tokenizer JSON result files
#[derive(Debug, Clone)]
pub struct ResultStore {
    dir: PathBuf,
}

impl ResultStore {
    /// @ai:intent Create a store rooted at a results directory
    /// @ai:effects pure
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// @ai:intent Path of the document for a tokenizer
    /// @ai:effects pure
    pub fn path_for(&self, tokenizer_id: &str) -> PathBuf {
        self.dir.join(format!("{}{}", tokenizer_id, RESULTS_SUFFIX))
    }

    /// @ai:intent Extract the tokenizer id from a result file name
    /// @ai:effects pure
    fn tokenizer_id(path: &Path) -> Option<&str> {
        path.file_name()?
            .to_str()?
            .strip_suffix(RESULTS_SUFFIX)
            .filter(|id| !id.is_empty())
    }

    /// @ai:intent Parse one result file and repair inconsistent counts
    /// @ai:effects fs:read
    fn load_file(path: &Path) -> Result<ResultDocument> {
        let content = std::fs::read_to_string(path).map_err(|e| BenchError::io(path, e))?;

        let mut document: ResultDocument =
            serde_json::from_str(&content).map_err(|e| BenchError::Json {
                path: path.to_path_buf(),
                source: e,
            })?;

        let repaired = document.repair();
        if repaired > 0 {
            tracing::warn!(
                "Recomputed num_tokens for {} records in {}",
                repaired,
                path.display()
            );
        }

        Ok(document)
    }

    /// @ai:intent Find all result files directly inside the store directory
    /// @ai:effects fs:read
    fn find_result_files(&self) -> Vec<PathBuf> {
        WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| Self::tokenizer_id(e.path()).is_some())
            .map(|e| e.path().to_path_buf())
            .collect()
    }
}

impl ResultStoreTrait for ResultStore {
    /// @ai:intent Write a whole document, creating the directory if needed
    /// @ai:effects fs:write
    fn save(&self, tokenizer_id: &str, document: &ResultDocument) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir).map_err(|e| BenchError::io(&self.dir, e))?;

        let path = self.path_for(tokenizer_id);
        let json = serde_json::to_string_pretty(document).map_err(|e| BenchError::Json {
            path: path.clone(),
            source: e,
        })?;
        std::fs::write(&path, json).map_err(|e| BenchError::io(&path, e))?;

        Ok(path)
    }

    /// @ai:intent Load all documents, skipping unreadable ones
    /// @ai:effects fs:read
    fn load_all(&self) -> Result<BTreeMap<String, ResultDocument>> {
        let mut documents = BTreeMap::new();

        if !self.dir.exists() {
            tracing::warn!("Results directory {} does not exist", self.dir.display());
            return Ok(documents);
        }

        for path in self.find_result_files() {
            let Some(id) = Self::tokenizer_id(&path) else {
                continue;
            };

            match Self::load_file(&path) {
                Ok(document) => {
                    documents.insert(id.to_string(), document);
                }
                Err(e) => {
                    tracing::warn!("Skipping invalid result file {}: {}", path.display(), e);
                }
            }
        }

        Ok(documents)
    }
}
