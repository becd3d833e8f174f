// crates/gazetteer-core/src/traits.rs
use crate::model::{EntityId, EntityKind};
use crate::text::{equals_normalized, fold_key};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A payload type that can be stored in a [`GazetteerIndex`](crate::GazetteerIndex).
///
/// The associated [`IndexEntity::KIND`] is written into the artifact header
/// so that a city artifact cannot be opened as a state index by mistake.
///
/// Implementors must be `Send + Sync + 'static` so one loaded index can be
/// shared across threads, and serde-serializable so payloads can be packed
/// into the artifact via bincode.
pub trait IndexEntity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const KIND: EntityKind;

    fn id(&self) -> EntityId;

    /// Canonical display name.
    fn name(&self) -> &str;
}

/// Name-based matching helpers for types that expose a canonical display name.
///
/// Comparisons go through [`normalize`](crate::text::normalize), so case,
/// periods, dashes and spacing differences are ignored. Diacritics are
/// ignored too (`"Cañon City"` is named `"Canon City"`).
///
/// # Examples
/// ```rust
/// use gazetteer_core::traits::NameMatch;
///
/// struct Place(&'static str);
/// impl NameMatch for Place {
///     fn name_str(&self) -> &str { self.0 }
/// }
///
/// assert!(Place("Winston-Salem").is_named("winston salem"));
/// assert!(!Place("Salem").is_named("Winston-Salem"));
/// ```
pub trait NameMatch {
    /// Returns the canonical display name used for matching.
    fn name_str(&self) -> &str;

    /// True if `q` equals the canonical name after normalization, with or
    /// without diacritics.
    #[inline]
    fn is_named(&self, q: &str) -> bool {
        let name = self.name_str();
        equals_normalized(name, q) || fold_key(name) == fold_key(q)
    }
}

impl<T: IndexEntity> NameMatch for T {
    #[inline]
    fn name_str(&self) -> &str {
        self.name()
    }
}
