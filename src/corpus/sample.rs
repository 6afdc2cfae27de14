//! @ai:module:intent Sample corpus types: convention label to example class strings
//! @ai:module:layer domain
//! @ai:module:public_api Corpus, Sample
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// @ai:intent One example string under one naming convention
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample<'a> {
    pub label: &'a str,
    pub text: &'a str,
}

/// @ai:intent Mapping from naming-convention label to ordered example strings
/// @ai:effects pure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Corpus {
    conventions: BTreeMap<String, Vec<String>>,
}

impl Corpus {
    /// @ai:intent Build a corpus from (label, samples) pairs
    /// @ai:effects pure
    pub fn new<I, L, S>(conventions: I) -> Self
    where
        I: IntoIterator<Item = (L, Vec<S>)>,
        L: Into<String>,
        S: Into<String>,
    {
        Self {
            conventions: conventions
                .into_iter()
                .map(|(label, samples)| {
                    (label.into(), samples.into_iter().map(Into::into).collect())
                })
                .collect(),
        }
    }

    /// The corpus `init` writes when none exists yet.
    pub fn sample() -> Self {
        Self::new([
            (
                "Traditional",
                vec![
                    "product-card featured",
                    "sidebar-navigation active",
                    "header-logo dark-theme",
                ],
            ),
            (
                "Blocktail",
                vec![
                    "product_card --featured",
                    "sidebar_navigation --active",
                    "header_logo --dark_theme",
                ],
            ),
            (
                "BEM",
                vec![
                    "product-card product-card--featured",
                    "sidebar-navigation sidebar-navigation--active",
                    "header__logo header__logo--dark-theme",
                ],
            ),
        ])
    }

    /// @ai:intent Iterate conventions with their samples in label order
    /// @ai:effects pure
    pub fn conventions(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.conventions
            .iter()
            .map(|(label, samples)| (label.as_str(), samples.as_slice()))
    }

    /// @ai:intent Flatten into individual samples
    /// @ai:effects pure
    pub fn samples(&self) -> impl Iterator<Item = Sample<'_>> {
        self.conventions.iter().flat_map(|(label, texts)| {
            texts.iter().map(move |text| Sample {
                label: label.as_str(),
                text: text.as_str(),
            })
        })
    }

    pub fn is_empty(&self) -> bool {
        self.conventions.is_empty()
    }

    pub fn sample_count(&self) -> usize {
        self.conventions.values().map(Vec::len).sum()
    }
}
