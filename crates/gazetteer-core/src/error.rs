// crates/gazetteer-core/src/error.rs
use crate::model::EntityKind;
use thiserror::Error;

/// Errors surfaced by building, saving and loading gazetteer indexes.
///
/// Lookups and resolution never fail on a missing key or an ambiguous
/// query; those are ordinary empty results. Only I/O, malformed inputs and
/// damaged artifacts end up here.
#[derive(Debug, Error)]
pub enum GazetteerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bincode error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The artifact header or record layout did not validate.
    #[error("corrupt index artifact: {reason}")]
    CorruptIndex { reason: String },

    /// A city artifact was opened as a state index, or the other way round.
    #[error("index kind mismatch: expected {expected}, found {found}")]
    KindMismatch {
        expected: EntityKind,
        found: EntityKind,
    },

    /// A build produced no entities for an index callers expect to be populated.
    #[error("no eligible {kind} entities to index")]
    EmptyIndex { kind: EntityKind },
}

impl GazetteerError {
    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        GazetteerError::CorruptIndex {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GazetteerError>;
