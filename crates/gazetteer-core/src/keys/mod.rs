// crates/gazetteer-core/src/keys/mod.rs

//! # Key Generation
//!
//! Enumerates the normalized index keys each entity is reachable by.
//!
//! Cities: `{name}` and `{name} {country}` for names that pass the
//! [`BareNamePolicy`]; `{name} {region}` and `{name} {region} {country}` for
//! every name. States: `{name}`, `{name} {country}` and `{abbr} {country}`.
//! The bare abbreviation of a state is never a key.

mod bare;

pub use bare::{BareNamePolicy, NamePopulations};

use crate::config::KeyConfig;
use crate::model::{CityRecord, StateRecord};
use crate::text::{ascii_variant, normalize};
use std::collections::BTreeSet;

/// Primary and alternate names, plus ASCII spellings when folding is on.
pub(crate) fn city_names(city: &CityRecord, fold_diacritics: bool) -> Vec<String> {
    with_ascii_variants(city.names(), fold_diacritics)
}

fn with_ascii_variants(mut names: Vec<String>, fold_diacritics: bool) -> Vec<String> {
    if fold_diacritics {
        let variants: Vec<String> = names.iter().filter_map(|n| ascii_variant(n)).collect();
        for variant in variants {
            if !names.contains(&variant) {
                names.push(variant);
            }
        }
    }
    names
}

/// Insert `parts` joined by spaces, normalized; empty keys are dropped.
fn insert_key(keys: &mut BTreeSet<String>, parts: &[&str]) {
    let key = normalize(&parts.join(" "));
    if !key.is_empty() {
        keys.insert(key);
    }
}

/// Key enumerator for city records; holds the precomputed bare-name policy.
#[derive(Debug, Clone)]
pub struct CityKeyGenerator {
    policy: BareNamePolicy,
    country_aliases: Vec<String>,
    fold_diacritics: bool,
}

impl CityKeyGenerator {
    /// Compute name statistics over all `cities`, then generate keys per city.
    pub fn new(cities: &[CityRecord], config: &KeyConfig) -> Self {
        Self::with_policy(BareNamePolicy::new(cities, config), config)
    }

    pub fn with_policy(policy: BareNamePolicy, config: &KeyConfig) -> Self {
        CityKeyGenerator {
            policy,
            country_aliases: config.country_aliases.clone(),
            fold_diacritics: config.fold_diacritics,
        }
    }

    pub fn policy(&self) -> &BareNamePolicy {
        &self.policy
    }

    /// Names of `city` that may be indexed without a state qualifier.
    pub fn bare_names(&self, city: &CityRecord) -> Vec<String> {
        city_names(city, self.fold_diacritics)
            .into_iter()
            .filter(|name| self.policy.allows(city, name))
            .collect()
    }

    /// Every normalized key for `city`, sorted and deduplicated.
    ///
    /// Missing region fields only drop the key forms that need them.
    pub fn keys(&self, city: &CityRecord) -> BTreeSet<String> {
        let names = city_names(city, self.fold_diacritics);
        let bare: Vec<&str> = names
            .iter()
            .map(String::as_str)
            .filter(|name| self.policy.allows(city, name))
            .collect();
        let regions = city.region_names();
        let mut keys = BTreeSet::new();

        for name in bare {
            insert_key(&mut keys, &[name]);
            for usa in &self.country_aliases {
                insert_key(&mut keys, &[name, usa]);
            }
        }

        for name in &names {
            for &region in &regions {
                insert_key(&mut keys, &[name, region]);
                for usa in &self.country_aliases {
                    insert_key(&mut keys, &[name, region, usa]);
                }
            }
        }

        keys
    }
}

/// Every normalized key for a state record.
pub fn state_keys(state: &StateRecord, config: &KeyConfig) -> BTreeSet<String> {
    let names = with_ascii_variants(
        std::iter::once(state.name.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect(),
        config.fold_diacritics,
    );
    let mut keys = BTreeSet::new();

    for name in &names {
        insert_key(&mut keys, &[name]);
        for usa in &config.country_aliases {
            insert_key(&mut keys, &[name, usa]);
        }
    }

    if let Some(abbr) = state.abbr() {
        for usa in &config.country_aliases {
            insert_key(&mut keys, &[abbr, usa]);
        }
    }

    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boston() -> CityRecord {
        CityRecord {
            id: 1,
            name: "Boston".into(),
            alt_names: vec!["Beantown".into()],
            name_a1: Some("Massachusetts".into()),
            state_abbr: Some("MA".into()),
            country: "US".into(),
            population: Some(650_000),
            ..Default::default()
        }
    }

    #[test]
    fn city_keys_cover_all_forms() {
        let cities = vec![boston()];
        let keygen = CityKeyGenerator::new(&cities, &KeyConfig::default());
        let keys = keygen.keys(&cities[0]);

        for key in [
            "boston",
            "beantown",
            "boston usa",
            "boston united states of america",
            "beantown america",
            "boston massachusetts",
            "boston ma",
            "beantown ma",
            "boston ma usa",
            "beantown massachusetts united states",
        ] {
            assert!(keys.contains(key), "missing {key}");
        }
        // 2 names × (1 + 5) bare + 2 names × 2 regions × (1 + 5)
        assert_eq!(keys.len(), 12 + 24);
    }

    #[test]
    fn small_city_needs_a_region() {
        let mut small = boston();
        small.id = 2;
        small.name = "Concord".into();
        small.alt_names.clear();
        small.population = Some(40_000);
        let cities = vec![small];
        let keygen = CityKeyGenerator::new(&cities, &KeyConfig::default());
        let keys = keygen.keys(&cities[0]);

        assert!(!keys.contains("concord"));
        assert!(!keys.contains("concord usa"));
        assert!(keys.contains("concord ma"));
        assert!(keys.contains("concord massachusetts us"));
        assert!(keygen.bare_names(&cities[0]).is_empty());
    }

    #[test]
    fn missing_region_fields_only_drop_dependent_forms() {
        let mut city = boston();
        city.name_a1 = None;
        city.state_abbr = None;
        let cities = vec![city];
        let keygen = CityKeyGenerator::new(&cities, &KeyConfig::default());
        let keys = keygen.keys(&cities[0]);
        assert_eq!(keys.len(), 12);
        assert!(keys.contains("boston usa"));
    }

    #[test]
    fn diacritics_add_ascii_spelling() {
        let city = CityRecord {
            id: 3,
            name: "Cañon City".into(),
            name_a1: Some("Colorado".into()),
            state_abbr: Some("CO".into()),
            country: "US".into(),
            population: Some(16_000),
            ..Default::default()
        };
        let cities = vec![city];

        let keygen = CityKeyGenerator::new(&cities, &KeyConfig::default());
        let keys = keygen.keys(&cities[0]);
        assert!(keys.contains("cañon city co"));
        assert!(keys.contains("canon city co"));

        let plain = KeyConfig {
            fold_diacritics: false,
            ..KeyConfig::default()
        };
        let keys = CityKeyGenerator::new(&cities, &plain).keys(&cities[0]);
        assert!(!keys.contains("canon city co"));
    }

    #[test]
    fn state_keys_exclude_bare_abbreviation() {
        let state = StateRecord {
            id: 10,
            name: "Indiana".into(),
            abbr: Some("IN".into()),
            country: "US".into(),
            ..Default::default()
        };
        let keys = state_keys(&state, &KeyConfig::default());
        assert!(keys.contains("indiana"));
        assert!(keys.contains("indiana usa"));
        assert!(keys.contains("in usa"));
        assert!(keys.contains("in united states"));
        assert!(!keys.contains("in"));
        assert_eq!(keys.len(), 1 + 5 + 5);
    }

    #[test]
    fn state_without_abbr_still_has_name_keys() {
        let state = StateRecord {
            id: 11,
            name: "District of Columbia".into(),
            country: "US".into(),
            ..Default::default()
        };
        let keys = state_keys(&state, &KeyConfig::default());
        assert_eq!(keys.len(), 6);
        assert!(keys.contains("district of columbia america"));
    }
}
