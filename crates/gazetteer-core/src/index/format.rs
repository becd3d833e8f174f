// crates/gazetteer-core/src/index/format.rs

//! # Artifact Layout
//!
//! One file holds both key spaces of an index as a single sorted table:
//!
//! ```text
//! "GZIX" | version u32 | kind u8 | 3 reserved | entry_count u32 | key_count u32 | entity_count u32
//! entry_count × u32 record offsets
//! records: key_len u16 | key | val_len u32 | val
//! ```
//!
//! All integers are little-endian. Records are sorted by key bytes.
//! `K:<normalized key>` maps to a bincode `Vec<EntityId>`; `E:<id>` maps
//! to a bincode payload. Lookups binary-search the offset table in place,
//! so a memory-mapped file is queried without deserializing it.

use crate::error::{GazetteerError, Result};
use crate::model::{EntityId, EntityKind};
use std::collections::BTreeMap;
use std::ops::Range;

pub(crate) const MAGIC: &[u8; 4] = b"GZIX";
pub(crate) const VERSION: u32 = 1;
pub(crate) const HEADER_LEN: usize = 24;

/// Prefix of normalized-key entries.
pub(crate) const KEY_PREFIX: &[u8] = b"K:";
/// Prefix of entity-id entries.
pub(crate) const ENTITY_PREFIX: &[u8] = b"E:";

pub(crate) fn key_entry(key: &str) -> Vec<u8> {
    [KEY_PREFIX, key.as_bytes()].concat()
}

pub(crate) fn entity_entry(id: EntityId) -> Vec<u8> {
    [ENTITY_PREFIX, id.to_string().as_bytes()].concat()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Header {
    pub kind: EntityKind,
    pub entry_count: u32,
    pub key_count: u32,
    pub entity_count: u32,
}

impl Header {
    fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(&VERSION.to_le_bytes());
        out.push(self.kind.to_byte());
        out.extend_from_slice(&[0u8; 3]);
        out.extend_from_slice(&self.entry_count.to_le_bytes());
        out.extend_from_slice(&self.key_count.to_le_bytes());
        out.extend_from_slice(&self.entity_count.to_le_bytes());
    }

    fn parse(bytes: &[u8]) -> Result<Header> {
        if bytes.len() < HEADER_LEN {
            return Err(GazetteerError::corrupt(format!(
                "file is {} bytes, shorter than the {HEADER_LEN}-byte header",
                bytes.len()
            )));
        }
        if &bytes[0..4] != MAGIC {
            return Err(GazetteerError::corrupt("bad magic bytes"));
        }
        let version = read_u32(bytes, 4).unwrap_or(0);
        if version != VERSION {
            return Err(GazetteerError::corrupt(format!(
                "unsupported format version {version} (expected {VERSION})"
            )));
        }
        let kind = EntityKind::from_byte(bytes[8])
            .ok_or_else(|| GazetteerError::corrupt(format!("unknown index kind {}", bytes[8])))?;

        Ok(Header {
            kind,
            entry_count: read_u32(bytes, 12).unwrap_or(0),
            key_count: read_u32(bytes, 16).unwrap_or(0),
            entity_count: read_u32(bytes, 20).unwrap_or(0),
        })
    }
}

fn read_u16(bytes: &[u8], at: usize) -> Option<u16> {
    let raw = bytes.get(at..at.checked_add(2)?)?;
    Some(u16::from_le_bytes([raw[0], raw[1]]))
}

fn read_u32(bytes: &[u8], at: usize) -> Option<u32> {
    let raw = bytes.get(at..at.checked_add(4)?)?;
    Some(u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
}

/// Serialize a sorted entry table into artifact bytes.
pub(crate) fn encode(
    kind: EntityKind,
    entries: &BTreeMap<Vec<u8>, Vec<u8>>,
    key_count: usize,
    entity_count: usize,
) -> Result<Vec<u8>> {
    let too_large = |what: &str| GazetteerError::InvalidData(format!("{what} exceeds u32 range"));

    let header = Header {
        kind,
        entry_count: u32::try_from(entries.len()).map_err(|_| too_large("entry count"))?,
        key_count: u32::try_from(key_count).map_err(|_| too_large("key count"))?,
        entity_count: u32::try_from(entity_count).map_err(|_| too_large("entity count"))?,
    };

    let table_len = entries.len() * 4;
    let body_len: usize = entries.iter().map(|(k, v)| 2 + k.len() + 4 + v.len()).sum();
    let mut out = Vec::with_capacity(HEADER_LEN + table_len + body_len);
    header.write_to(&mut out);

    let mut offset = HEADER_LEN + table_len;
    for (key, value) in entries {
        let at = u32::try_from(offset).map_err(|_| too_large("artifact size"))?;
        out.extend_from_slice(&at.to_le_bytes());
        offset += 2 + key.len() + 4 + value.len();
    }

    for (key, value) in entries {
        let key_len = u16::try_from(key.len()).map_err(|_| {
            GazetteerError::InvalidData(format!("index key of {} bytes is too long", key.len()))
        })?;
        let val_len = u32::try_from(value.len()).map_err(|_| too_large("value length"))?;
        out.extend_from_slice(&key_len.to_le_bytes());
        out.extend_from_slice(key);
        out.extend_from_slice(&val_len.to_le_bytes());
        out.extend_from_slice(value);
    }

    Ok(out)
}

/// Read-only view over validated artifact bytes.
#[derive(Clone, Copy)]
pub(crate) struct Table<'b> {
    bytes: &'b [u8],
    len: usize,
}

impl<'b> Table<'b> {
    /// View over bytes that already passed [`Table::validate`].
    pub(crate) fn new(bytes: &'b [u8], header: &Header) -> Self {
        Table {
            bytes,
            len: header.entry_count as usize,
        }
    }

    /// Check header, offset table, record bounds, sort order and the
    /// per-namespace counts. Values are not decoded.
    pub(crate) fn validate(bytes: &'b [u8]) -> Result<(Header, Table<'b>)> {
        let header = Header::parse(bytes)?;
        let len = header.entry_count as usize;
        let table_end = len
            .checked_mul(4)
            .and_then(|n| n.checked_add(HEADER_LEN))
            .filter(|end| *end <= bytes.len())
            .ok_or_else(|| GazetteerError::corrupt("offset table runs past end of file"))?;

        let table = Table { bytes, len };
        let mut keys = 0usize;
        let mut entities = 0usize;
        let mut previous: Option<&[u8]> = None;

        for i in 0..len {
            let offset = read_u32(bytes, HEADER_LEN + i * 4).unwrap_or(0) as usize;
            if offset < table_end {
                return Err(GazetteerError::corrupt(format!(
                    "record {i} starts inside the header or offset table"
                )));
            }
            let (key, _) = table
                .record(i)
                .ok_or_else(|| GazetteerError::corrupt(format!("record {i} is truncated")))?;
            if previous.is_some_and(|prev| prev >= key) {
                return Err(GazetteerError::corrupt(format!("record {i} is out of order")));
            }
            if key.starts_with(KEY_PREFIX) {
                keys += 1;
            } else if key.starts_with(ENTITY_PREFIX) {
                entities += 1;
            } else {
                return Err(GazetteerError::corrupt(format!(
                    "record {i} has no known key-space prefix"
                )));
            }
            previous = Some(key);
        }

        if keys != header.key_count as usize || entities != header.entity_count as usize {
            return Err(GazetteerError::corrupt(format!(
                "header claims {} keys / {} entities, found {keys} / {entities}",
                header.key_count, header.entity_count
            )));
        }

        Ok((header, table))
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// `(key, value)` of record `i`, or `None` if it is out of bounds.
    pub(crate) fn record(&self, i: usize) -> Option<(&'b [u8], &'b [u8])> {
        if i >= self.len {
            return None;
        }
        let start = read_u32(self.bytes, HEADER_LEN + i * 4)? as usize;
        let key_len = read_u16(self.bytes, start)? as usize;
        let key_start = start + 2;
        let key = self.bytes.get(key_start..key_start.checked_add(key_len)?)?;
        let val_len_at = key_start + key_len;
        let val_len = read_u32(self.bytes, val_len_at)? as usize;
        let val_start = val_len_at + 4;
        let value = self.bytes.get(val_start..val_start.checked_add(val_len)?)?;
        Some((key, value))
    }

    fn key(&self, i: usize) -> Option<&'b [u8]> {
        self.record(i).map(|(k, _)| k)
    }

    /// Binary search for an exact entry key.
    pub(crate) fn get(&self, entry: &[u8]) -> Option<&'b [u8]> {
        let (mut lo, mut hi) = (0usize, self.len);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let (key, value) = self.record(mid)?;
            match key.cmp(entry) {
                std::cmp::Ordering::Equal => return Some(value),
                std::cmp::Ordering::Less => lo = mid + 1,
                std::cmp::Ordering::Greater => hi = mid,
            }
        }
        None
    }

    /// Record positions whose keys start with `prefix`.
    pub(crate) fn prefix_range(&self, prefix: &[u8]) -> Range<usize> {
        let start = self.partition_point(|key| key < prefix);
        let end = self.partition_point(|key| key < prefix || key.starts_with(prefix));
        start..end.max(start)
    }

    fn partition_point(&self, pred: impl Fn(&[u8]) -> bool) -> usize {
        let (mut lo, mut hi) = (0usize, self.len);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            match self.key(mid) {
                Some(key) if pred(key) => lo = mid + 1,
                _ => hi = mid,
            }
        }
        lo
    }
}
