// crates/gazetteer-core/src/model.rs

//! Entity records (as supplied by the ingestion side) and the payloads
//! copied into an index at build time.
//!
//! Records mirror the upstream dataset and tolerate missing fields;
//! payloads are the self-contained values a query returns.

use crate::traits::IndexEntity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable integer identifier from the source gazetteer.
pub type EntityId = i64;

/// ISO code of the only country that is indexed.
pub const US_COUNTRY_CODE: &str = "US";

/// Which key space an index (and its artifact) serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    City,
    State,
}

impl EntityKind {
    pub(crate) fn to_byte(self) -> u8 {
        match self {
            EntityKind::City => 1,
            EntityKind::State => 2,
        }
    }

    pub(crate) fn from_byte(b: u8) -> Option<Self> {
        match b {
            1 => Some(EntityKind::City),
            2 => Some(EntityKind::State),
            _ => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::City => f.write_str("city"),
            EntityKind::State => f.write_str("state"),
        }
    }
}

// -----------------------------------------------------------------------------
// RAW RECORDS
// -----------------------------------------------------------------------------

/// Raw city record as produced by ingestion/deduplication.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CityRecord {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub alt_names: Vec<String>,
    /// Parent region (state) full name, e.g. "Massachusetts".
    #[serde(default)]
    pub name_a1: Option<String>,
    /// Parent region abbreviation, e.g. "MA".
    #[serde(default)]
    pub state_abbr: Option<String>,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub population: Option<u64>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// Raw state / region record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateRecord {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub abbr: Option<String>,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub population: Option<u64>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn distinct_names<'a>(names: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for name in names {
        let name = name.trim();
        if !name.is_empty() && !out.iter().any(|n| n == name) {
            out.push(name.to_string());
        }
    }
    out
}

impl CityRecord {
    pub fn is_us(&self) -> bool {
        self.country.trim().eq_ignore_ascii_case(US_COUNTRY_CODE)
    }

    /// Primary name followed by alternate names; blanks and exact
    /// duplicates removed, order preserved.
    pub fn names(&self) -> Vec<String> {
        distinct_names(std::iter::once(&self.name).chain(self.alt_names.iter()))
    }

    /// Non-empty parent region values: full name, then abbreviation.
    pub fn region_names(&self) -> Vec<&str> {
        [non_empty(&self.name_a1), non_empty(&self.state_abbr)]
            .into_iter()
            .flatten()
            .collect()
    }
}

impl StateRecord {
    pub fn is_us(&self) -> bool {
        self.country.trim().eq_ignore_ascii_case(US_COUNTRY_CODE)
    }

    pub fn abbr(&self) -> Option<&str> {
        non_empty(&self.abbr)
    }
}

// -----------------------------------------------------------------------------
// INDEX PAYLOADS
// -----------------------------------------------------------------------------

/// City value stored in a [`CityIndex`](crate::CityIndex).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityPayload {
    pub id: EntityId,
    pub name: String,
    pub alt_names: Vec<String>,
    pub name_a1: Option<String>,
    pub state_abbr: Option<String>,
    pub country: String,
    pub population: Option<u64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// State value stored in a [`StateIndex`](crate::StateIndex).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatePayload {
    pub id: EntityId,
    pub name: String,
    pub abbr: Option<String>,
    pub country: String,
    pub population: Option<u64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<&CityRecord> for CityPayload {
    fn from(r: &CityRecord) -> Self {
        CityPayload {
            id: r.id,
            name: r.name.trim().to_string(),
            alt_names: distinct_names(r.alt_names.iter()),
            name_a1: non_empty(&r.name_a1).map(str::to_string),
            state_abbr: non_empty(&r.state_abbr).map(str::to_uppercase),
            country: r.country.trim().to_uppercase(),
            population: r.population,
            latitude: r.latitude,
            longitude: r.longitude,
        }
    }
}

impl From<&StateRecord> for StatePayload {
    fn from(r: &StateRecord) -> Self {
        StatePayload {
            id: r.id,
            name: r.name.trim().to_string(),
            abbr: r.abbr().map(str::to_uppercase),
            country: r.country.trim().to_uppercase(),
            population: r.population,
            latitude: r.latitude,
            longitude: r.longitude,
        }
    }
}

impl CityPayload {
    /// Population used for ranking; missing counts as zero.
    pub fn population_or_zero(&self) -> u64 {
        self.population.unwrap_or(0)
    }

    pub fn state_abbr(&self) -> Option<&str> {
        self.state_abbr.as_deref()
    }
}

impl StatePayload {
    pub fn abbr(&self) -> Option<&str> {
        self.abbr.as_deref()
    }
}

impl IndexEntity for CityPayload {
    const KIND: EntityKind = EntityKind::City;

    fn id(&self) -> EntityId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl IndexEntity for StatePayload {
    const KIND: EntityKind = EntityKind::State;

    fn id(&self) -> EntityId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for CityPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CityPayload<{}, {}, {}, id:{}>",
            self.name,
            self.name_a1.as_deref().unwrap_or("-"),
            self.country,
            self.id
        )
    }
}

impl fmt::Display for StatePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StatePayload<{}, {}, id:{}>", self.name, self.country, self.id)
    }
}
