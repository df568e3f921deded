//! Tax rule configuration.
//!
//! Rules come from [`TaxRules::default`] unless a TOML file is given. Any
//! key left out of the file keeps its default.
//!
//! ```toml
//! equities_exemption_threshold = "20000"
//! crypto_exemption_threshold = "35000"
//! equities_rate = "0.15"
//! real_estate_fund_rate = "0.20"
//! crypto_rate = "0.15"
//! ```

use std::path::{Path, PathBuf};

use tax_core::{TaxRules, TaxRulesError};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read rules file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid rules file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Rules(#[from] TaxRulesError),
}

/// Parses and validates rules from TOML text.
pub fn parse_rules(
    input: &str,
    path: &Path,
) -> Result<TaxRules, ConfigError> {
    let rules: TaxRules = toml::from_str(input).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    rules.validate()?;
    Ok(rules)
}

/// Loads rules from `path`, or the defaults when no path is given.
pub fn load_rules(path: Option<&Path>) -> Result<TaxRules, ConfigError> {
    let Some(path) = path else {
        return Ok(TaxRules::default());
    };

    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let rules = parse_rules(&contents, path)?;

    info!(path = %path.display(), "loaded tax rules");
    Ok(rules)
}
