use std::fmt;

use serde::{Deserialize, Serialize};

/// The tax-relevant grouping an asset category falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaxBucket {
    Equities,
    RealEstateFund,
    Crypto,
}

impl TaxBucket {
    pub fn all() -> &'static [TaxBucket] {
        &[
            TaxBucket::Equities,
            TaxBucket::RealEstateFund,
            TaxBucket::Crypto,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaxBucket::Equities => "Equities",
            TaxBucket::RealEstateFund => "Real-estate funds",
            TaxBucket::Crypto => "Crypto",
        }
    }
}

impl fmt::Display for TaxBucket {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Category tag attached to a holding or a simulated sale.
///
/// Unknown tags are kept verbatim in [`AssetCategory::Other`] so they can be
/// reported back to the user; they never route to a [`TaxBucket`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AssetCategory {
    Equities,
    BankEquities,
    RealEstateFund,
    Crypto,
    Treasury,
    Other(String),
}

impl AssetCategory {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Equities => "equities",
            Self::BankEquities => "bank-equities",
            Self::RealEstateFund => "real-estate-fund",
            Self::Crypto => "crypto",
            Self::Treasury => "treasury",
            Self::Other(tag) => tag,
        }
    }

    /// Parses one of the recognised tags. Returns `None` for anything else.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "equities" => Some(Self::Equities),
            "bank-equities" => Some(Self::BankEquities),
            "real-estate-fund" => Some(Self::RealEstateFund),
            "crypto" => Some(Self::Crypto),
            "treasury" => Some(Self::Treasury),
            _ => None,
        }
    }

    /// Total counterpart of [`AssetCategory::parse`]: unknown tags become `Other`.
    pub fn from_tag(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|| Self::Other(s.to_string()))
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    pub fn bucket(&self) -> Option<TaxBucket> {
        match self {
            Self::Equities | Self::BankEquities => Some(TaxBucket::Equities),
            Self::RealEstateFund => Some(TaxBucket::RealEstateFund),
            Self::Crypto => Some(TaxBucket::Crypto),
            Self::Treasury | Self::Other(_) => None,
        }
    }
}

impl From<String> for AssetCategory {
    fn from(tag: String) -> Self {
        match Self::parse(&tag) {
            Some(category) => category,
            None => Self::Other(tag),
        }
    }
}

impl From<AssetCategory> for String {
    fn from(category: AssetCategory) -> Self {
        match category {
            AssetCategory::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
