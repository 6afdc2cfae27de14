//! @ai:module:intent Token records and the per-tokenizer document that groups them
//! @ai:module:layer domain
//! @ai:module:public_api TokenRecord, ResultDocument
//! @ai:module:stateless true

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// @ai:intent Tokenizer output for one input string
/// @ai:invariant num_tokens == tokens.len()
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    input: String,
    #[serde(deserialize_with = "deserialize_tokens")]
    tokens: Vec<String>,
    num_tokens: usize,
}

/// Older result files store tiktoken output as integer ids.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredToken {
    Piece(String),
    Id(u64),
}

fn deserialize_tokens<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let stored = Vec::<StoredToken>::deserialize(deserializer)?;

    Ok(stored
        .into_iter()
        .map(|token| match token {
            StoredToken::Piece(piece) => piece,
            StoredToken::Id(id) => id.to_string(),
        })
        .collect())
}

impl TokenRecord {
    /// @ai:intent Create a record, deriving the token count from the tokens
    /// @ai:effects pure
    pub fn new(input: impl Into<String>, tokens: Vec<String>) -> Self {
        let num_tokens = tokens.len();
        Self {
            input: input.into(),
            tokens,
            num_tokens,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn num_tokens(&self) -> usize {
        self.num_tokens
    }

    /// @ai:intent Check the stored count against the token list
    /// @ai:effects pure
    pub fn is_consistent(&self) -> bool {
        self.num_tokens == self.tokens.len()
    }

    /// @ai:intent Recompute num_tokens, returning whether it changed
    /// @ai:effects pure
    pub fn repair(&mut self) -> bool {
        let changed = !self.is_consistent();
        self.num_tokens = self.tokens.len();
        changed
    }
}

/// @ai:intent All records one tokenizer produced, keyed by convention label
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultDocument {
    conventions: BTreeMap<String, Vec<TokenRecord>>,
}

impl ResultDocument {
    /// @ai:intent Create an empty document
    /// @ai:effects pure
    pub fn new() -> Self {
        Self::default()
    }

    /// @ai:intent Set the records of a convention, replacing any previous ones
    /// @ai:effects pure
    pub fn insert(&mut self, convention: impl Into<String>, records: Vec<TokenRecord>) {
        self.conventions.insert(convention.into(), records);
    }

    pub fn get(&self, convention: &str) -> Option<&[TokenRecord]> {
        self.conventions.get(convention).map(Vec::as_slice)
    }

    pub fn conventions(&self) -> impl Iterator<Item = (&str, &[TokenRecord])> {
        self.conventions
            .iter()
            .map(|(label, records)| (label.as_str(), records.as_slice()))
    }

    pub fn record_count(&self) -> usize {
        self.conventions.values().map(Vec::len).sum()
    }

    /// @ai:intent Repair every inconsistent record, returning how many were fixed
    /// @ai:effects pure
    pub fn repair(&mut self) -> usize {
        self.conventions
            .values_mut()
            .flat_map(|records| records.iter_mut())
            .map(TokenRecord::repair)
            .filter(|changed| *changed)
            .count()
    }
}

impl<L: Into<String>> FromIterator<(L, Vec<TokenRecord>)> for ResultDocument {
    fn from_iter<I: IntoIterator<Item = (L, Vec<TokenRecord>)>>(iter: I) -> Self {
        Self {
            conventions: iter
                .into_iter()
                .map(|(label, records)| (label.into(), records))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pieces(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_new_record_counts_tokens() {
        let record = TokenRecord::new("card --active", pieces(&["card", " --", "active"]));
        assert_eq!(record.num_tokens(), 3);
        assert!(record.is_consistent());
    }

    #[test]
    fn test_serializes_in_field_order() {
        let record = TokenRecord::new("nav", pieces(&["nav"]));
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"input":"nav","tokens":["nav"],"num_tokens":1}"#);
    }

    #[test]
    fn test_integer_token_ids_load_as_strings() {
        let json = r#"{"input": "nav", "tokens": [3939, 17], "num_tokens": 2}"#;
        let record: TokenRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.tokens(), &["3939".to_string(), "17".to_string()]);
    }

    #[test]
    fn test_repair_fixes_stale_count() {
        let json = r#"{"Blocktail": [{"input": "nav", "tokens": ["nav"], "num_tokens": 4}]}"#;
        let mut document: ResultDocument = serde_json::from_str(json).unwrap();

        assert_eq!(document.repair(), 1);
        assert_eq!(document.get("Blocktail").unwrap()[0].num_tokens(), 1);
        assert_eq!(document.repair(), 0);
    }

    #[test]
    fn test_document_keys_are_sorted() {
        let document: ResultDocument = [
            ("Traditional", vec![TokenRecord::new("a", pieces(&["a"]))]),
            ("BEM", vec![]),
        ]
        .into_iter()
        .collect();

        let labels: Vec<_> = document.conventions().map(|(label, _)| label).collect();
        assert_eq!(labels, vec!["BEM", "Traditional"]);
        assert_eq!(document.get("BEM").map(<[_]>::len), Some(0));
        assert_eq!(document.record_count(), 1);
    }
}
