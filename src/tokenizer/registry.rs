//! @ai:module:intent Static dispatch table from tokenizer id to backend and model
//! @ai:module:layer application
//! @ai:module:public_api TokenizerRegistry, TokenizerSpec, Backend, TokenizerProvider, TOKENIZERS
//! @ai:module:stateless true

use crate::config::HubConfig;
use crate::error::{BenchError, Result};
use crate::tokenizer::adapter::TokenizerAdapter;
use crate::tokenizer::huggingface::HuggingFaceAdapter;
use crate::tokenizer::sentencepiece::SentencePieceAdapter;
use crate::tokenizer::tiktoken::TiktokenAdapter;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// @ai:intent Library family a tokenizer is loaded through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Tiktoken,
    HuggingFace,
    SentencePiece,
}

impl Backend {
    /// @ai:intent Convert backend to string representation
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Tiktoken => "tiktoken",
            Backend::HuggingFace => "huggingface",
            Backend::SentencePiece => "sentencepiece",
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// @ai:intent Registry entry: which model a tokenizer id stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenizerSpec {
    pub id: &'static str,
    /// Model name, Hub repository or model file, depending on the backend
    pub model: &'static str,
    pub backend: Backend,
}

/// Every known tokenizer, in the order `all` runs them.
pub const TOKENIZERS: &[TokenizerSpec] = &[
    TokenizerSpec {
        id: "gpt4",
        model: "gpt-4",
        backend: Backend::Tiktoken,
    },
    TokenizerSpec {
        id: "gpt35",
        model: "gpt-3.5-turbo",
        backend: Backend::Tiktoken,
    },
    TokenizerSpec {
        id: "llama3",
        model: "meta-llama/Meta-Llama-3-70B",
        backend: Backend::HuggingFace,
    },
    TokenizerSpec {
        id: "mistral",
        model: "mistralai/Mistral-7B-v0.3",
        backend: Backend::HuggingFace,
    },
    TokenizerSpec {
        id: "bert",
        model: "bert-base-uncased",
        backend: Backend::HuggingFace,
    },
    TokenizerSpec {
        id: "roberta",
        model: "roberta-base",
        backend: Backend::HuggingFace,
    },
    TokenizerSpec {
        id: "t5",
        model: "t5-base",
        backend: Backend::HuggingFace,
    },
    TokenizerSpec {
        id: "gpt2",
        model: "gpt2",
        backend: Backend::HuggingFace,
    },
    TokenizerSpec {
        id: "spiece",
        model: "spiece.model",
        backend: Backend::SentencePiece,
    },
];

/// @ai:intent Trait for resolving and loading tokenizers by id
pub trait TokenizerProvider {
    /// @ai:intent All tokenizer ids in run order
    fn ids(&self) -> Vec<&str>;

    /// @ai:intent Load the adapter for an id
    /// @ai:effects network, fs:read
    fn load(&self, id: &str) -> Result<Box<dyn TokenizerAdapter>>;
}

/// @ai:intent Loads registry tokenizers through their backend
pub struct TokenizerRegistry {
    hub: HubConfig,
}

impl TokenizerRegistry {
    /// @ai:intent Create a registry using the given Hub settings
    /// @ai:effects pure
    pub fn new(hub: HubConfig) -> Self {
        Self { hub }
    }

    /// @ai:intent Look up a registry entry
    /// @ai:effects pure
    pub fn find(id: &str) -> Option<&'static TokenizerSpec> {
        TOKENIZERS.iter().find(|spec| spec.id == id)
    }

    /// @ai:intent Hub token from the configured environment variable, if set
    /// @ai:effects env
    fn hub_token(&self) -> Option<String> {
        std::env::var(&self.hub.token_env)
            .ok()
            .filter(|token| !token.is_empty())
    }

    /// @ai:intent Construct the adapter for a registry entry
    /// @ai:effects network, fs:read
    fn load_spec(&self, spec: &TokenizerSpec) -> anyhow::Result<Box<dyn TokenizerAdapter>> {
        let adapter: Box<dyn TokenizerAdapter> = match spec.backend {
            Backend::Tiktoken => Box::new(TiktokenAdapter::load(spec.id, spec.model)?),
            Backend::HuggingFace => {
                Box::new(HuggingFaceAdapter::load(spec.id, spec.model, self.hub_token())?)
            }
            Backend::SentencePiece => {
                Box::new(SentencePieceAdapter::load(spec.id, Path::new(spec.model))?)
            }
        };
        Ok(adapter)
    }
}

impl Default for TokenizerRegistry {
    fn default() -> Self {
        Self::new(HubConfig::default())
    }
}

impl TokenizerProvider for TokenizerRegistry {
    fn ids(&self) -> Vec<&str> {
        TOKENIZERS.iter().map(|spec| spec.id).collect()
    }

    fn load(&self, id: &str) -> Result<Box<dyn TokenizerAdapter>> {
        let spec = Self::find(id).ok_or_else(|| BenchError::UnknownTokenizer(id.to_string()))?;

        tracing::info!("Loading {} tokenizer {} ({})", spec.backend, spec.id, spec.model);

        self.load_spec(spec)
            .map_err(|e| BenchError::TokenizerUnavailable {
                id: id.to_string(),
                reason: format!("{:#}", e),
            })
    }
}
