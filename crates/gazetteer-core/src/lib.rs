// crates/gazetteer-core/src/lib.rs

//! Resolve free-text location strings ("Boston, MA", "NYC", "Portland OR")
//! to US cities and states.
//!
//! Build a [`Gazetteer`] once from entity records, save its two artifacts,
//! then load them (memory-mapped by default) in every process that needs
//! to answer queries:
//!
//! ```no_run
//! use gazetteer_core::{Gazetteer, LoadMode, ResolverConfig};
//!
//! let gazetteer = Gazetteer::load("data/index", LoadMode::Mmap)?;
//! let resolver = gazetteer.resolver(&ResolverConfig::default());
//! let (city, state) = resolver.resolve("Eureka Springs, Arkansas").into_pair();
//! # Ok::<(), gazetteer_core::GazetteerError>(())
//! ```

pub mod candidates;
pub mod common;
pub mod config;
pub mod error;
pub mod gazetteer;
pub mod index;
pub mod keys;
pub mod loader;
pub mod model;
pub mod resolver;
pub mod text;
pub mod traits;
pub mod wordlist;

// Re-exports
pub use crate::candidates::{Candidate, LocationText};
pub use crate::common::IndexStats;
pub use crate::config::{GazetteerConfig, KeyConfig, ResolverConfig};
pub use crate::error::{GazetteerError, Result};
pub use crate::gazetteer::Gazetteer;
pub use crate::index::{CityIndex, GazetteerIndex, IndexBuilder, StateIndex};
pub use crate::keys::{BareNamePolicy, CityKeyGenerator};
pub use crate::loader::LoadMode;
pub use crate::model::{
    CityPayload, CityRecord, EntityId, EntityKind, StatePayload, StateRecord,
};
pub use crate::resolver::{Resolution, Resolver, Rule};
pub use crate::text::normalize;
pub use crate::traits::{IndexEntity, NameMatch};
