//! @ai:module:intent Sample corpus definitions and loading
//! @ai:module:layer domain
//! @ai:module:public_api Corpus, Sample, CorpusLoader

pub mod loader;
pub mod sample;

pub use loader::{CorpusLoader, CorpusLoaderTrait};
pub use sample::{Corpus, Sample};
