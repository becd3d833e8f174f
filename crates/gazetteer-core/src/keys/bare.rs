// crates/gazetteer-core/src/keys/bare.rs

//! # Bare-Name Policy
//!
//! Decides whether a city may be reached by its name alone ("Chicago")
//! or only with a state qualifier ("Springfield, IL"). The decision needs a
//! global view of every city sharing a name, so [`NamePopulations`] is
//! computed once over the full record set before any key is generated.

use super::city_names;
use crate::config::KeyConfig;
use crate::model::CityRecord;
use crate::text::normalize;
use std::collections::{HashMap, HashSet};

/// Normalized name -> populations of every city carrying that name
/// (as primary or alternate name). Missing populations count as the
/// median population of all cities.
#[derive(Debug, Clone, Default)]
pub struct NamePopulations {
    by_name: HashMap<String, Vec<u64>>,
    median: u64,
}

impl NamePopulations {
    pub fn from_records(cities: &[CityRecord], fold_diacritics: bool) -> Self {
        let median = median_population(cities);
        let mut by_name: HashMap<String, Vec<u64>> = HashMap::new();

        for city in cities {
            let pop = city.population.filter(|p| *p > 0).unwrap_or(median);
            let keys: HashSet<String> = city_names(city, fold_diacritics)
                .iter()
                .map(|n| normalize(n))
                .filter(|k| !k.is_empty())
                .collect();
            for key in keys {
                by_name.entry(key).or_default().push(pop);
            }
        }

        tracing::debug!(
            distinct_names = by_name.len(),
            median_population = median,
            "indexed name -> populations"
        );

        NamePopulations { by_name, median }
    }

    /// Populations recorded for `name` (normalized before lookup).
    pub fn get(&self, name: &str) -> &[u64] {
        self.by_name
            .get(&normalize(name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn median(&self) -> u64 {
        self.median
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Median of the known, positive city populations (0 when there are none).
fn median_population(cities: &[CityRecord]) -> u64 {
    let mut pops: Vec<u64> = cities
        .iter()
        .filter_map(|c| c.population)
        .filter(|p| *p > 0)
        .collect();
    if pops.is_empty() {
        return 0;
    }
    pops.sort_unstable();
    let mid = pops.len() / 2;
    if pops.len() % 2 == 0 {
        (pops[mid - 1] + pops[mid]) / 2
    } else {
        pops[mid]
    }
}

/// Is a name unique enough that it should be indexed independently?
#[derive(Debug, Clone)]
pub struct BareNamePolicy {
    populations: NamePopulations,
    min_gap: i64,
    blocklist: HashSet<String>,
}

impl BareNamePolicy {
    pub fn new(cities: &[CityRecord], config: &KeyConfig) -> Self {
        Self::from_populations(
            NamePopulations::from_records(cities, config.fold_diacritics),
            config,
        )
    }

    pub fn from_populations(populations: NamePopulations, config: &KeyConfig) -> Self {
        BareNamePolicy {
            populations,
            min_gap: config.min_bare_gap,
            blocklist: config
                .bare_name_blocklist
                .iter()
                .map(|n| normalize(n))
                .collect(),
        }
    }

    pub fn populations(&self) -> &NamePopulations {
        &self.populations
    }

    pub fn blocked(&self, name: &str) -> bool {
        self.blocklist.contains(&normalize(name))
    }

    /// Population of `city` minus the summed populations of every entry for
    /// `name` except the largest one. For the most populous holder of the
    /// name this is its lead over all the others combined; for anyone else
    /// it can never be positive.
    pub fn population_gap(&self, city: &CityRecord, name: &str) -> i128 {
        let mut pops = self.populations.get(name).to_vec();
        pops.sort_unstable_by(|a, b| b.cmp(a));
        let others: i128 = pops.iter().skip(1).map(|p| *p as i128).sum();
        city.population.unwrap_or(0) as i128 - others
    }

    pub fn allows(&self, city: &CityRecord, name: &str) -> bool {
        !self.blocked(name) && self.population_gap(city, name) > self.min_gap as i128
    }
}
