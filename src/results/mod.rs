//! @ai:module:intent Per-tokenizer result documents and their on-disk store
//! @ai:module:layer domain
//! @ai:module:public_api TokenRecord, ResultDocument, ResultStore

pub mod record;
pub mod store;

pub use record::{ResultDocument, TokenRecord};
pub use store::{ResultStore, ResultStoreTrait, RESULTS_SUFFIX};
