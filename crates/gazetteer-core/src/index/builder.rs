// crates/gazetteer-core/src/index/builder.rs

use super::format::{self, entity_entry, key_entry};
use super::{CityIndex, GazetteerIndex, StateIndex};
use crate::config::KeyConfig;
use crate::error::{GazetteerError, Result};
use crate::keys::{state_keys, CityKeyGenerator};
use crate::model::{CityPayload, CityRecord, EntityId, StatePayload, StateRecord};
use crate::traits::IndexEntity;
use std::collections::{BTreeMap, BTreeSet};

// -----------------------------------------------------------------------------
// GENERIC BUILDER
// -----------------------------------------------------------------------------

/// Accumulates key -> id and id -> payload entries, then packs them into
/// an artifact. Everything is kept in ordered maps so the output is
/// deterministic for a given input.
pub struct IndexBuilder<E: IndexEntity> {
    keys: BTreeMap<String, BTreeSet<EntityId>>,
    entities: BTreeMap<EntityId, E>,
}

impl<E: IndexEntity> Default for IndexBuilder<E> {
    fn default() -> Self {
        IndexBuilder {
            keys: BTreeMap::new(),
            entities: BTreeMap::new(),
        }
    }
}

impl<E: IndexEntity> IndexBuilder<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `entity` under every key in `keys`.
    ///
    /// Returns `false` (and adds nothing) when the id was already inserted;
    /// the first payload for an id wins.
    pub fn insert<I, S>(&mut self, entity: E, keys: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let id = entity.id();
        if self.entities.contains_key(&id) {
            tracing::warn!(id, kind = %E::KIND, name = entity.name(), "duplicate entity id skipped");
            return false;
        }
        for key in keys {
            let key = key.into();
            if !key.is_empty() {
                self.keys.entry(key).or_default().insert(id);
            }
        }
        self.entities.insert(id, entity);
        true
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn finish(self) -> Result<GazetteerIndex<E>> {
        if self.entities.is_empty() {
            return Err(GazetteerError::EmptyIndex { kind: E::KIND });
        }

        let mut entries: BTreeMap<Vec<u8>, Vec<u8>> = BTreeMap::new();
        for (key, ids) in &self.keys {
            let ids: Vec<EntityId> = ids.iter().copied().collect();
            entries.insert(key_entry(key), bincode::serialize(&ids)?);
        }
        for (id, entity) in &self.entities {
            entries.insert(entity_entry(*id), bincode::serialize(entity)?);
        }

        let bytes = format::encode(E::KIND, &entries, self.keys.len(), self.entities.len())?;
        tracing::info!(
            kind = %E::KIND,
            keys = self.keys.len(),
            entities = self.entities.len(),
            bytes = bytes.len(),
            "built index"
        );
        GazetteerIndex::from_bytes(bytes)
    }
}

// -----------------------------------------------------------------------------
// CONCRETE INDEXES
// -----------------------------------------------------------------------------

impl CityIndex {
    /// Build the city index.
    ///
    /// Name statistics for the bare-name policy are computed over every
    /// supplied record; only US cities with a name are indexed.
    pub fn build(cities: &[CityRecord], config: &KeyConfig) -> Result<Self> {
        let keygen = CityKeyGenerator::new(cities, config);
        Self::build_with(cities, &keygen)
    }

    /// Build with a key generator whose statistics were computed elsewhere.
    pub fn build_with(cities: &[CityRecord], keygen: &CityKeyGenerator) -> Result<Self> {
        let mut builder = IndexBuilder::new();
        let mut skipped = 0usize;

        for city in cities {
            if !city.is_us() || city.name.trim().is_empty() {
                skipped += 1;
                continue;
            }
            builder.insert(CityPayload::from(city), keygen.keys(city));
        }

        if skipped > 0 {
            tracing::warn!(skipped, "skipped non-US or unnamed city records");
        }
        builder.finish()
    }
}

impl StateIndex {
    /// Build the state index from US state records.
    pub fn build(states: &[StateRecord], config: &KeyConfig) -> Result<Self> {
        let mut builder = IndexBuilder::new();
        let mut skipped = 0usize;

        for state in states {
            if !state.is_us() || state.name.trim().is_empty() {
                skipped += 1;
                continue;
            }
            builder.insert(StatePayload::from(state), state_keys(state, config));
        }

        if skipped > 0 {
            tracing::warn!(skipped, "skipped non-US or unnamed state records");
        }
        builder.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntityKind;

    fn state(id: EntityId, name: &str, country: &str) -> StateRecord {
        StateRecord {
            id,
            name: name.into(),
            country: country.into(),
            ..Default::default()
        }
    }

    #[test]
    fn empty_build_is_an_error() {
        let err = StateIndex::build(&[], &KeyConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            GazetteerError::EmptyIndex {
                kind: EntityKind::State
            }
        ));

        let foreign = vec![state(1, "Ontario", "CA")];
        assert!(StateIndex::build(&foreign, &KeyConfig::default()).is_err());
    }

    #[test]
    fn duplicate_ids_keep_first_payload() {
        let mut builder: IndexBuilder<StatePayload> = IndexBuilder::new();
        let first = StatePayload::from(&state(1, "Ohio", "US"));
        let second = StatePayload::from(&state(1, "Iowa", "US"));
        assert!(builder.insert(first, ["ohio"]));
        assert!(!builder.insert(second, ["iowa"]));
        assert_eq!(builder.key_count(), 1);

        let index = builder.finish().unwrap();
        assert_eq!(index.entity(1).map(|s| s.name), Some("Ohio".to_string()));
        assert!(index.lookup("iowa").is_empty());
    }

    #[test]
    fn foreign_and_unnamed_records_are_skipped() {
        let states = vec![
            state(1, "Ohio", "US"),
            state(2, "Ontario", "CA"),
            state(3, "  ", "US"),
        ];
        let index = StateIndex::build(&states, &KeyConfig::default()).unwrap();
        assert_eq!(index.size().1, 1);
        assert!(index.lookup("ontario").is_empty());
    }

    #[test]
    fn build_is_deterministic() {
        let states = vec![state(2, "Utah", "US"), state(1, "Ohio", "US")];
        let a = StateIndex::build(&states, &KeyConfig::default()).unwrap();
        let b = StateIndex::build(&states, &KeyConfig::default()).unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
    }
}
