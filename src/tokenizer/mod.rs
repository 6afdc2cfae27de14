//! @ai:module:intent Uniform adapters over external tokenizer libraries
//! @ai:module:layer infrastructure
//! @ai:module:public_api TokenizerAdapter, TokenizerRegistry, TokenizerSpec, Backend

pub mod adapter;
pub mod huggingface;
pub mod registry;
pub mod sentencepiece;
pub mod tiktoken;

pub use adapter::TokenizerAdapter;
pub use huggingface::HuggingFaceAdapter;
pub use registry::{Backend, TokenizerProvider, TokenizerRegistry, TokenizerSpec, TOKENIZERS};
pub use sentencepiece::SentencePieceAdapter;
pub use tiktoken::TiktokenAdapter;
