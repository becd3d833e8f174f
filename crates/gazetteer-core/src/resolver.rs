// crates/gazetteer-core/src/resolver.rs

//! # City / State Resolver
//!
//! Maps one free-text location string (a profile "location" field, a
//! mailing-address fragment) to at most one city and one state.
//!
//! Every toponym candidate is matched against the state index first and
//! the city index second, so a phrase that names a state is never also
//! read as a city. The collected candidates then go through a fixed
//! sequence of rules; the first rule that applies decides the answer.
//! Anything ambiguous comes back empty rather than guessed.

use crate::candidates::LocationText;
use crate::config::ResolverConfig;
use crate::index::{CityIndex, StateIndex};
use crate::model::{CityPayload, EntityId, StatePayload};
use crate::text::{is_all_uppercase, normalize};
use crate::traits::NameMatch;
use crate::wordlist;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Result of [`Resolver::resolve`]. Either side may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Resolution {
    pub city: Option<CityPayload>,
    pub state: Option<StatePayload>,
}

impl Resolution {
    pub fn into_pair(self) -> (Option<CityPayload>, Option<StatePayload>) {
        (self.city, self.state)
    }

    pub fn is_empty(&self) -> bool {
        self.city.is_none() && self.state.is_none()
    }
}

/// Which disambiguation rule produced a [`Resolution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Rule {
    /// One longest-match city and no state.
    SingleCity,
    /// One state and no city.
    SingleState,
    /// Cities and states matched; the best city lying in a matched state wins.
    CityInState,
    /// Several cities, no state; the top one clears the population ratio.
    DominantCity,
    /// Candidates matched but none of the rules could pick an answer.
    Ambiguous,
    /// Nothing matched.
    NoMatch,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Rule::SingleCity => "single-city",
            Rule::SingleState => "single-state",
            Rule::CityInState => "city-in-state",
            Rule::DominantCity => "dominant-city",
            Rule::Ambiguous => "ambiguous",
            Rule::NoMatch => "no-match",
        };
        f.write_str(s)
    }
}

/// A city hit and the length of the key it was found under.
#[derive(Debug, Clone)]
struct CityMatch {
    city: CityPayload,
    key_len: usize,
}

/// Candidates collected from one input, deduplicated by entity id.
#[derive(Debug, Default)]
struct Matches {
    cities: Vec<CityMatch>,
    states: Vec<StatePayload>,
    /// City id -> position in `cities`.
    seen_cities: HashMap<EntityId, usize>,
    seen_states: HashSet<EntityId>,
}

impl Matches {
    /// A city found under several keys counts with its longest one.
    fn add_city(&mut self, city: CityPayload, key_len: usize) {
        match self.seen_cities.get(&city.id) {
            Some(&pos) => {
                let found = &mut self.cities[pos];
                found.key_len = found.key_len.max(key_len);
            }
            None => {
                self.seen_cities.insert(city.id, self.cities.len());
                self.cities.push(CityMatch { city, key_len });
            }
        }
    }

    fn add_state(&mut self, state: StatePayload) {
        if self.seen_states.insert(state.id) {
            self.states.push(state);
        }
    }

    /// Cities matched under the longest key, by descending population.
    /// The sort is stable, so equal populations keep discovery order.
    fn ranked_cities(self) -> (Vec<CityPayload>, Vec<StatePayload>) {
        let max_len = self.cities.iter().map(|m| m.key_len).max().unwrap_or(0);
        let mut cities: Vec<CityPayload> = self
            .cities
            .into_iter()
            .filter(|m| m.key_len == max_len)
            .map(|m| m.city)
            .collect();
        cities.sort_by(|a, b| b.population_or_zero().cmp(&a.population_or_zero()));
        (cities, self.states)
    }
}

/// Query-time resolver borrowing a city and a state index.
///
/// Holds no per-query state; `resolve` can be called concurrently.
pub struct Resolver<'a> {
    cities: &'a CityIndex,
    states: &'a StateIndex,
    config: ResolverConfig,
    common_words: HashSet<&'static str>,
    /// Normalized abbreviation -> state, taken from the state id space.
    abbrs: HashMap<String, StatePayload>,
}

impl<'a> Resolver<'a> {
    pub fn new(cities: &'a CityIndex, states: &'a StateIndex, config: &ResolverConfig) -> Self {
        let abbrs: HashMap<String, StatePayload> = states
            .entities()
            .filter_map(|s| {
                let key = normalize(s.abbr()?);
                (!key.is_empty()).then_some((key, s))
            })
            .collect();

        tracing::debug!(
            abbreviations = abbrs.len(),
            common_words = config.common_word_count,
            "resolver ready"
        );

        Resolver {
            cities,
            states,
            config: config.clone(),
            common_words: wordlist::top_n(config.common_word_count),
            abbrs,
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn resolve(&self, text: &str) -> Resolution {
        self.resolve_with_rule(text).0
    }

    /// Like [`Resolver::resolve`], also reporting the rule that decided.
    pub fn resolve_with_rule(&self, text: &str) -> (Resolution, Rule) {
        let (cities, states) = self.collect(text).ranked_cities();
        let (resolution, rule) = self.decide(&cities, &states);
        tracing::debug!(
            text,
            %rule,
            cities = cities.len(),
            states = states.len(),
            city = resolution.city.as_ref().map(|c| c.id),
            state = resolution.state.as_ref().map(|s| s.id),
            "resolved"
        );
        (resolution, rule)
    }

    fn collect(&self, text: &str) -> Matches {
        let location = LocationText::with_max_ngram(text, self.config.max_ngram);
        let mut matches = Matches::default();

        for candidate in &location {
            let key = candidate.key();
            if key.is_empty() {
                continue;
            }
            let shouted = is_all_uppercase(&candidate.text());
            // "in", "or", "me" are words first; "IN", "OR", "ME" may be states.
            if self.common_words.contains(key.as_str()) && !shouted {
                continue;
            }

            let states = self.states.lookup(&key);
            if !states.is_empty() {
                states.into_iter().for_each(|s| matches.add_state(s));
                continue;
            }
            // Lowercase "hi", "la", "ok" stay words; only "HI", "LA", "OK" are states.
            if shouted {
                if let Some(state) = self.abbrs.get(&key) {
                    matches.add_state(state.clone());
                    continue;
                }
            }

            let key_len = key.chars().count();
            for city in self.cities.lookup(&key) {
                matches.add_city(city, key_len);
            }
        }

        matches
    }

    fn decide(&self, cities: &[CityPayload], states: &[StatePayload]) -> (Resolution, Rule) {
        match (cities, states) {
            ([], []) => (Resolution::default(), Rule::NoMatch),

            ([city], []) => (self.with_home_state(city), Rule::SingleCity),

            ([], [state]) => (
                Resolution {
                    city: None,
                    state: Some(state.clone()),
                },
                Rule::SingleState,
            ),

            ([_, ..], [_, ..]) => {
                let paired = cities.iter().find_map(|city| {
                    let home = self.state_of(city)?;
                    let state = states.iter().find(|s| s.id == home.id)?;
                    Some(Resolution {
                        city: Some(city.clone()),
                        state: Some(state.clone()),
                    })
                });
                match paired {
                    Some(resolution) => (resolution, Rule::CityInState),
                    None => (Resolution::default(), Rule::Ambiguous),
                }
            }

            ([top, second, ..], []) => {
                let top_pop = top.population_or_zero() as f64;
                let second_pop = second.population_or_zero() as f64;
                if top_pop > self.config.ambiguity_ratio * second_pop {
                    (self.with_home_state(top), Rule::DominantCity)
                } else {
                    (Resolution::default(), Rule::Ambiguous)
                }
            }

            // Several states and no city.
            ([], [_, _, ..]) => (Resolution::default(), Rule::Ambiguous),
        }
    }

    fn with_home_state(&self, city: &CityPayload) -> Resolution {
        Resolution {
            city: Some(city.clone()),
            state: self.state_of(city),
        }
    }

    /// The state a city lies in: by abbreviation, else by region name.
    pub fn state_of(&self, city: &CityPayload) -> Option<StatePayload> {
        if let Some(state) = city
            .state_abbr()
            .and_then(|abbr| self.abbrs.get(&normalize(abbr)))
        {
            return Some(state.clone());
        }
        let region = city.name_a1.as_deref()?;
        self.states
            .lookup(region)
            .into_iter()
            .find(|s| s.is_named(region))
    }
}
