//! gazetteer-rs
//! ============
//!
//! Workspace umbrella crate. Re-exports `gazetteer-core` under a prelude so
//! the demos can `use gazetteer_rs::prelude::*`.

pub use gazetteer_core;

pub mod prelude {
    pub use gazetteer_core::{
        CityIndex, CityPayload, CityRecord, Gazetteer, GazetteerConfig, GazetteerError,
        KeyConfig, LoadMode, Resolution, Resolver, ResolverConfig, Result, Rule, StateIndex,
        StatePayload, StateRecord,
    };
}
