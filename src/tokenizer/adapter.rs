//! @ai:module:intent The tokenize(text) contract every backend satisfies
//! @ai:module:layer domain
//! @ai:module:public_api TokenizerAdapter

use crate::error::{BenchError, Result};
use crate::results::TokenRecord;

/// @ai:intent A loaded tokenizer that splits text into token strings
pub trait TokenizerAdapter {
    /// @ai:intent Identifier the adapter was registered under
    fn id(&self) -> &str;

    /// @ai:intent Split text into token strings using the backend library
    /// @ai:effects pure
    fn split(&self, text: &str) -> anyhow::Result<Vec<String>>;

    /// @ai:intent Tokenize one sample into a record
    /// @ai:post Ok(record) satisfies record.num_tokens() == record.tokens().len()
    /// @ai:effects pure
    fn tokenize(&self, text: &str) -> Result<TokenRecord> {
        self.split(text)
            .map(|tokens| TokenRecord::new(text, tokens))
            .map_err(|e| BenchError::SampleTokenizationFailure {
                id: self.id().to_string(),
                input: text.to_string(),
                reason: format!("{:#}", e),
            })
    }
}

/// Whitespace splitter that fails on one chosen input.
#[cfg(test)]
pub(crate) struct MockTokenizer {
    pub id: String,
    pub fail_on: Option<String>,
}

#[cfg(test)]
impl MockTokenizer {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            fail_on: None,
        }
    }

    pub fn failing_on(id: &str, input: &str) -> Self {
        Self {
            id: id.to_string(),
            fail_on: Some(input.to_string()),
        }
    }
}

#[cfg(test)]
impl TokenizerAdapter for MockTokenizer {
    fn id(&self) -> &str {
        &self.id
    }

    fn split(&self, text: &str) -> anyhow::Result<Vec<String>> {
        if self.fail_on.as_deref() == Some(text) {
            anyhow::bail!("mock failure");
        }
        Ok(text.split_whitespace().map(str::to_string).collect())
    }
}
