// crates/gazetteer-core/src/gazetteer.rs
use crate::config::{KeyConfig, ResolverConfig};
use crate::error::Result;
use crate::index::{CityIndex, StateIndex};
use crate::keys::CityKeyGenerator;
use crate::loader::LoadMode;
use crate::model::{CityRecord, StateRecord};
use crate::resolver::Resolver;
use std::path::{Path, PathBuf};

/// File name of the city artifact inside a gazetteer directory.
pub const CITY_INDEX_FILE: &str = "us-cities.gzix";
/// File name of the state artifact inside a gazetteer directory.
pub const STATE_INDEX_FILE: &str = "us-states.gzix";

/// The city and state indexes that together answer location queries.
///
/// Owned by the caller and passed by reference; there is no global
/// instance.
#[derive(Debug)]
pub struct Gazetteer {
    pub cities: CityIndex,
    pub states: StateIndex,
}

impl Gazetteer {
    pub fn build(cities: &[CityRecord], states: &[StateRecord], config: &KeyConfig) -> Result<Self> {
        let keygen = CityKeyGenerator::new(cities, config);
        Ok(Gazetteer {
            cities: CityIndex::build_with(cities, &keygen)?,
            states: StateIndex::build(states, config)?,
        })
    }

    /// Read JSON record files and build both indexes.
    #[cfg(feature = "json")]
    pub fn build_from_files(
        cities_path: impl AsRef<Path>,
        states_path: impl AsRef<Path>,
        config: &crate::config::GazetteerConfig,
    ) -> Result<Self> {
        config.validate()?;
        let cities = crate::loader::read_cities(cities_path)?;
        let states = crate::loader::read_states(states_path)?;
        Self::build(&cities, &states, &config.keys)
    }

    pub fn city_path(dir: impl AsRef<Path>) -> PathBuf {
        dir.as_ref().join(CITY_INDEX_FILE)
    }

    pub fn state_path(dir: impl AsRef<Path>) -> PathBuf {
        dir.as_ref().join(STATE_INDEX_FILE)
    }

    pub fn save(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        self.cities.save(Self::city_path(dir))?;
        self.states.save(Self::state_path(dir))
    }

    #[cfg(feature = "compact")]
    pub fn save_compressed(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        self.cities.save_compressed(Self::city_path(dir))?;
        self.states.save_compressed(Self::state_path(dir))
    }

    pub fn load(dir: impl AsRef<Path>, mode: LoadMode) -> Result<Self> {
        let dir = dir.as_ref();
        Ok(Gazetteer {
            cities: CityIndex::load_with_mode(Self::city_path(dir), mode)?,
            states: StateIndex::load_with_mode(Self::state_path(dir), mode)?,
        })
    }

    pub fn resolver(&self, config: &ResolverConfig) -> Resolver<'_> {
        Resolver::new(&self.cities, &self.states, config)
    }

    pub fn verify(&self) -> Result<()> {
        self.cities.verify()?;
        self.states.verify()
    }
}
