/// Simple aggregate statistics for one loaded index.
///
/// Returned by [`GazetteerIndex::stats`](crate::GazetteerIndex::stats);
/// counts come from the artifact header, which is checked against the
/// record table at load time.
use crate::model::EntityKind;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub kind: EntityKind,
    pub keys: usize,
    pub entities: usize,
    /// Size of the (inflated) artifact in bytes.
    pub bytes: usize,
    pub mapped: bool,
}

impl fmt::Display for IndexStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} keys, {} entities, {} bytes ({})",
            self.kind,
            self.keys,
            self.entities,
            self.bytes,
            if self.mapped { "mmap" } else { "owned" }
        )
    }
}
