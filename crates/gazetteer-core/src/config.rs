// crates/gazetteer-core/src/config.rs

//! Tunable thresholds for index building and query resolution.
//!
//! Every struct carries `#[serde(default)]`, so a JSON file only needs the
//! fields it wants to change.

use crate::candidates::DEFAULT_MAX_NGRAM;
use crate::error::{GazetteerError, Result};
use serde::{Deserialize, Serialize};

/// Country strings appended to city and state names when generating keys.
pub const DEFAULT_COUNTRY_ALIASES: [&str; 5] = [
    "USA",
    "United States",
    "United States of America",
    "US",
    "America",
];

/// Key generation and bare-name policy settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    /// A city's population must exceed the combined population of every
    /// other same-named city by more than this to be indexed without a state.
    pub min_bare_gap: i64,
    /// Names never indexed bare, whatever their population.
    pub bare_name_blocklist: Vec<String>,
    pub country_aliases: Vec<String>,
    /// Also index ASCII spellings of names that carry diacritics.
    pub fold_diacritics: bool,
}

impl Default for KeyConfig {
    fn default() -> Self {
        KeyConfig {
            min_bare_gap: 200_000,
            bare_name_blocklist: Vec::new(),
            country_aliases: DEFAULT_COUNTRY_ALIASES.iter().map(|s| s.to_string()).collect(),
            fold_diacritics: true,
        }
    }
}

impl KeyConfig {
    pub fn with_blocklist<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bare_name_blocklist = names.into_iter().map(Into::into).collect();
        self
    }
}

/// Query-time disambiguation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Longest token window considered as a toponym candidate.
    pub max_ngram: usize,
    /// How many of the most frequent English words are skipped unless
    /// written in all caps.
    pub common_word_count: usize,
    /// With several same-length city matches and no state, the top city
    /// wins only if its population exceeds the runner-up's by this factor.
    pub ambiguity_ratio: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            max_ngram: DEFAULT_MAX_NGRAM,
            common_word_count: 100,
            ambiguity_ratio: 3.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GazetteerConfig {
    pub keys: KeyConfig,
    pub resolver: ResolverConfig,
}

impl GazetteerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.keys.min_bare_gap < 0 {
            return Err(GazetteerError::InvalidConfig(format!(
                "keys.min_bare_gap must be >= 0, got {}",
                self.keys.min_bare_gap
            )));
        }
        if self.resolver.max_ngram == 0 {
            return Err(GazetteerError::InvalidConfig(
                "resolver.max_ngram must be >= 1".into(),
            ));
        }
        let ratio = self.resolver.ambiguity_ratio;
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(GazetteerError::InvalidConfig(format!(
                "resolver.ambiguity_ratio must be a positive number, got {ratio}"
            )));
        }
        Ok(())
    }

    /// Read and validate a JSON config file.
    #[cfg(feature = "json")]
    pub fn from_json_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            GazetteerError::NotFound(format!("config not found at {}: {}", path.display(), e))
        })?;
        let config: GazetteerConfig = serde_json::from_slice(&bytes)?;
        config.validate()?;
        Ok(config)
    }
}
