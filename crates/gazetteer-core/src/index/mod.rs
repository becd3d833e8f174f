// crates/gazetteer-core/src/index/mod.rs

//! # Gazetteer Index
//!
//! A read-only two-namespace map: normalized key -> entity ids, and
//! entity id -> payload. Built once offline, saved as a single artifact
//! and loaded either memory-mapped or owned. Queries never mutate the
//! index, so one instance can be shared freely between threads.

mod builder;
pub(crate) mod format;

pub use builder::IndexBuilder;

use crate::common::IndexStats;
use crate::error::{GazetteerError, Result};
use crate::loader::{self, common_io, Buffer, CompressionMode, LoadMode};
use crate::model::{CityPayload, EntityId, StatePayload};
use crate::text::normalize;
use crate::traits::IndexEntity;
use format::{entity_entry, key_entry, Header, Table, ENTITY_PREFIX, KEY_PREFIX};
use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

/// Index of US cities.
pub type CityIndex = GazetteerIndex<CityPayload>;
/// Index of US states.
pub type StateIndex = GazetteerIndex<StatePayload>;

pub struct GazetteerIndex<E: IndexEntity> {
    buffer: Buffer,
    header: Header,
    _marker: PhantomData<fn() -> E>,
}

impl<E: IndexEntity> GazetteerIndex<E> {
    fn from_buffer(buffer: Buffer) -> Result<Self> {
        let (header, _) = Table::validate(buffer.as_slice())?;
        if header.kind != E::KIND {
            return Err(GazetteerError::KindMismatch {
                expected: E::KIND,
                found: header.kind,
            });
        }
        Ok(GazetteerIndex {
            buffer,
            header,
            _marker: PhantomData,
        })
    }

    /// Validate and wrap artifact bytes held in memory. Gzip input is inflated.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let bytes = if common_io::is_gzip(&bytes) {
            common_io::inflate(&bytes)?
        } else {
            bytes
        };
        Self::from_buffer(Buffer::Owned(bytes))
    }

    /// Memory-map an artifact.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_mode(path, LoadMode::Mmap)
    }

    pub fn load_with_mode(path: impl AsRef<Path>, mode: LoadMode) -> Result<Self> {
        let path = path.as_ref();
        let index = Self::from_buffer(loader::read_artifact(path, mode)?)?;
        tracing::info!(
            path = %path.display(),
            kind = %E::KIND,
            keys = index.header.key_count,
            entities = index.header.entity_count,
            bytes = index.as_bytes().len(),
            mapped = index.is_mapped(),
            "loaded index"
        );
        Ok(index)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        loader::write_artifact(path.as_ref(), self.as_bytes(), CompressionMode::None)
    }

    /// Save a gzip-compressed artifact. Loading it inflates into memory,
    /// so the result cannot be memory-mapped.
    #[cfg(feature = "compact")]
    pub fn save_compressed(&self, path: impl AsRef<Path>) -> Result<()> {
        loader::write_artifact(path.as_ref(), self.as_bytes(), CompressionMode::Gzip)
    }

    /// Raw (uncompressed) artifact bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    pub fn is_mapped(&self) -> bool {
        self.buffer.is_mapped()
    }

    fn table(&self) -> Table<'_> {
        Table::new(self.buffer.as_slice(), &self.header)
    }

    /// Payloads of every entity reachable by `text`.
    ///
    /// The text is normalized first; an unknown key is an empty result.
    pub fn lookup(&self, text: &str) -> Vec<E> {
        self.ids(text)
            .into_iter()
            .filter_map(|id| self.entity(id))
            .collect()
    }

    /// Sorted entity ids stored under the normalized form of `key`.
    pub fn ids(&self, key: &str) -> Vec<EntityId> {
        let key = normalize(key);
        if key.is_empty() {
            return Vec::new();
        }
        let Some(raw) = self.table().get(&key_entry(&key)) else {
            return Vec::new();
        };
        match bincode::deserialize::<Vec<EntityId>>(raw) {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "undecodable id set");
                Vec::new()
            }
        }
    }

    pub fn entity(&self, id: EntityId) -> Option<E> {
        let raw = self.table().get(&entity_entry(id))?;
        match bincode::deserialize::<E>(raw) {
            Ok(entity) => Some(entity),
            Err(e) => {
                tracing::warn!(id, error = %e, "undecodable payload");
                None
            }
        }
    }

    pub fn contains_key(&self, text: &str) -> bool {
        let key = normalize(text);
        !key.is_empty() && self.table().get(&key_entry(&key)).is_some()
    }

    /// All normalized keys, in byte order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        let table = self.table();
        table
            .prefix_range(KEY_PREFIX)
            .filter_map(move |i| table.record(i))
            .filter_map(|(key, _)| std::str::from_utf8(&key[KEY_PREFIX.len()..]).ok())
    }

    /// Every payload in the id space. Order follows the decimal id text.
    pub fn entities(&self) -> impl Iterator<Item = E> + '_ {
        let table = self.table();
        table
            .prefix_range(ENTITY_PREFIX)
            .filter_map(move |i| table.record(i))
            .filter_map(|(_, value)| bincode::deserialize::<E>(value).ok())
    }

    /// `(key_count, entity_count)`.
    pub fn size(&self) -> (usize, usize) {
        (
            self.header.key_count as usize,
            self.header.entity_count as usize,
        )
    }

    pub fn stats(&self) -> IndexStats {
        let (keys, entities) = self.size();
        IndexStats {
            kind: E::KIND,
            keys,
            entities,
            bytes: self.as_bytes().len(),
            mapped: self.is_mapped(),
        }
    }

    /// Decode every value and check that each id set points at stored
    /// entities. Reports the first problem found.
    pub fn verify(&self) -> Result<()> {
        let table = self.table();
        let mut stored: HashSet<EntityId> = HashSet::new();

        for i in table.prefix_range(ENTITY_PREFIX) {
            let (key, value) = table
                .record(i)
                .ok_or_else(|| GazetteerError::corrupt(format!("record {i} is truncated")))?;
            let label = String::from_utf8_lossy(key).into_owned();
            let entity: E = bincode::deserialize(value)
                .map_err(|e| GazetteerError::corrupt(format!("{label}: {e}")))?;
            if key != entity_entry(entity.id()).as_slice() {
                return Err(GazetteerError::corrupt(format!(
                    "{label} holds payload with id {}",
                    entity.id()
                )));
            }
            stored.insert(entity.id());
        }

        for i in table.prefix_range(KEY_PREFIX) {
            let (key, value) = table
                .record(i)
                .ok_or_else(|| GazetteerError::corrupt(format!("record {i} is truncated")))?;
            let label = String::from_utf8_lossy(key).into_owned();
            let ids: Vec<EntityId> = bincode::deserialize(value)
                .map_err(|e| GazetteerError::corrupt(format!("{label}: {e}")))?;
            if ids.is_empty() {
                return Err(GazetteerError::corrupt(format!("{label} has no ids")));
            }
            if let Some(missing) = ids.iter().find(|id| !stored.contains(id)) {
                return Err(GazetteerError::corrupt(format!(
                    "{label} points at missing entity {missing}"
                )));
            }
        }

        tracing::debug!(kind = %E::KIND, records = table.len(), "index verified");
        Ok(())
    }
}

impl<E: IndexEntity> fmt::Display for GazetteerIndex<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (keys, entities) = self.size();
        let label = match E::KIND {
            crate::model::EntityKind::City => "CityIndex",
            crate::model::EntityKind::State => "StateIndex",
        };
        write!(f, "{label}<{keys} keys, {entities} entities>")
    }
}

impl<E: IndexEntity> fmt::Debug for GazetteerIndex<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GazetteerIndex")
            .field("kind", &E::KIND)
            .field("header", &self.header)
            .field("mapped", &self.is_mapped())
            .finish()
    }
}
