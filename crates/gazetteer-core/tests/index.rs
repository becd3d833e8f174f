mod common;

use common::*;
use gazetteer_core::keys::state_keys;
use gazetteer_core::{
    CityIndex, CityKeyGenerator, Gazetteer, GazetteerError, KeyConfig, LoadMode, StateIndex,
};

fn blocklisted() -> KeyConfig {
    KeyConfig::default().with_blocklist(["Washington", "New York"])
}

#[test]
fn every_generated_key_finds_its_entity() {
    let cities = cities();
    let states = states();
    let config = KeyConfig::default();
    let gazetteer = Gazetteer::build(&cities, &states, &config).unwrap();

    let keygen = CityKeyGenerator::new(&cities, &config);
    for city in cities.iter().filter(|c| c.is_us()) {
        let keys = keygen.keys(city);
        assert!(!keys.is_empty(), "{} has no keys", city.name);
        for key in keys {
            assert!(
                gazetteer.cities.ids(&key).contains(&city.id),
                "{key:?} does not reach city {}",
                city.id
            );
        }
    }

    for state in states.iter().filter(|s| s.is_us()) {
        for key in state_keys(state, &config) {
            assert!(gazetteer.states.ids(&key).contains(&state.id), "{key:?}");
        }
    }
}

#[test]
fn foreign_records_are_not_indexed() {
    let gazetteer = Gazetteer::build(&cities(), &states(), &KeyConfig::default()).unwrap();
    assert!(gazetteer.cities.entity(99).is_none());
    assert!(gazetteer.cities.lookup("Toronto, ON").is_empty());
    assert!(gazetteer.states.lookup("Ontario").is_empty());
    assert_eq!(gazetteer.cities.size().1, 12);
    assert_eq!(gazetteer.states.size().1, 12);
}

#[test]
fn blocklisted_names_need_a_qualifier() {
    let gazetteer = Gazetteer::build(&cities(), &states(), &blocklisted()).unwrap();
    let index = &gazetteer.cities;

    for query in [
        "Washington",
        "washington",
        "Washington, USA",
        "New York",
        "new york",
        "New York, USA",
    ] {
        assert!(index.lookup(query).is_empty(), "{query:?} should be empty");
    }

    let ids = |q: &str| index.lookup(q).iter().map(|c| c.id).collect::<Vec<_>>();
    assert_eq!(ids("Washington DC"), vec![WASHINGTON_DC]);
    assert_eq!(ids("Washington D.C."), vec![WASHINGTON_DC]);
    assert_eq!(ids("New York, NY"), vec![NEW_YORK_CITY]);
    // Alternate names are not on the blocklist.
    assert_eq!(ids("NYC"), vec![NEW_YORK_CITY]);
}

#[test]
fn without_blocklist_large_cities_are_bare() {
    let gazetteer = Gazetteer::build(&cities(), &states(), &KeyConfig::default()).unwrap();
    let ids: Vec<_> = gazetteer.cities.lookup("washington").iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![WASHINGTON_DC]);
    assert!(gazetteer.cities.lookup("springfield").is_empty());
    assert_eq!(gazetteer.cities.lookup("Springfield, MO")[0].id, 10);
}

#[test]
fn diacritics_are_searchable_both_ways() {
    let gazetteer = Gazetteer::build(&cities(), &states(), &KeyConfig::default()).unwrap();
    let with = gazetteer.cities.lookup("Cañon City, CO");
    let without = gazetteer.cities.lookup("canon city co");
    assert_eq!(with.len(), 1);
    assert_eq!(with, without);
    assert_eq!(with[0].latitude, Some(38.44));
}

#[test]
fn rebuild_is_logically_identical() {
    let a = Gazetteer::build(&cities(), &states(), &KeyConfig::default()).unwrap();
    let b = Gazetteer::build(&cities(), &states(), &KeyConfig::default()).unwrap();

    let keys_a: Vec<&str> = a.cities.keys().collect();
    let keys_b: Vec<&str> = b.cities.keys().collect();
    assert_eq!(keys_a, keys_b);
    for key in keys_a {
        assert_eq!(a.cities.ids(key), b.cities.ids(key));
    }
    assert_eq!(a.cities.size(), b.cities.size());
    assert_eq!(a.states.as_bytes(), b.states.as_bytes());
}

#[test]
fn save_and_load_in_both_modes() {
    let built = Gazetteer::build(&cities(), &states(), &KeyConfig::default()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    built.save(dir.path()).unwrap();
    assert!(dir.path().join("us-cities.gzix").exists());
    assert!(dir.path().join("us-states.gzix").exists());

    for mode in [LoadMode::Mmap, LoadMode::Owned] {
        let loaded = Gazetteer::load(dir.path(), mode).unwrap();
        assert_eq!(loaded.cities.is_mapped(), mode == LoadMode::Mmap);
        assert_eq!(loaded.cities.size(), built.cities.size());
        assert_eq!(loaded.states.size(), built.states.size());
        assert_eq!(
            loaded.cities.lookup("Portland, OR"),
            built.cities.lookup("Portland, OR")
        );
        loaded.verify().unwrap();
    }
}

#[test]
fn saving_over_a_mapped_artifact_keeps_readers_valid() {
    let built = Gazetteer::build(&cities(), &states(), &KeyConfig::default()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    built.save(dir.path()).unwrap();

    let reader = CityIndex::load(Gazetteer::city_path(dir.path())).unwrap();
    built.save(dir.path()).unwrap();
    assert_eq!(reader.lookup("Dayton OH")[0].id, DAYTON);
    reader.verify().unwrap();
}

#[cfg(feature = "compact")]
#[test]
fn compressed_artifacts_load_into_memory() {
    let built = Gazetteer::build(&cities(), &states(), &KeyConfig::default()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    built.save_compressed(dir.path()).unwrap();

    let raw = std::fs::read(Gazetteer::city_path(dir.path())).unwrap();
    assert_eq!(&raw[..2], &[0x1f, 0x8b]);

    let loaded = Gazetteer::load(dir.path(), LoadMode::Mmap).unwrap();
    assert!(!loaded.cities.is_mapped());
    assert_eq!(loaded.cities.as_bytes(), built.cities.as_bytes());
    assert_eq!(loaded.states.lookup("ohio")[0].id, OHIO);
}

#[test]
fn damaged_artifacts_are_typed_errors() {
    let built = Gazetteer::build(&cities(), &states(), &KeyConfig::default()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let city_path = Gazetteer::city_path(dir.path());
    let state_path = Gazetteer::state_path(dir.path());
    built.save(dir.path()).unwrap();

    // A state artifact opened as a city index.
    assert!(matches!(
        CityIndex::load(&state_path),
        Err(GazetteerError::KindMismatch { .. })
    ));

    // Truncated.
    let bytes = std::fs::read(&city_path).unwrap();
    std::fs::write(&city_path, &bytes[..bytes.len() / 2]).unwrap();
    assert!(matches!(
        CityIndex::load_with_mode(&city_path, LoadMode::Owned),
        Err(GazetteerError::CorruptIndex { .. })
    ));

    // Not an artifact at all.
    std::fs::write(&city_path, b"definitely not an index").unwrap();
    assert!(matches!(
        CityIndex::load(&city_path),
        Err(GazetteerError::CorruptIndex { .. })
    ));

    assert!(matches!(
        StateIndex::load(dir.path().join("missing.gzix")),
        Err(GazetteerError::NotFound(_))
    ));
}

#[test]
fn empty_inputs_fail_the_build() {
    assert!(matches!(
        Gazetteer::build(&[], &states(), &KeyConfig::default()),
        Err(GazetteerError::EmptyIndex { .. })
    ));
    assert!(matches!(
        Gazetteer::build(&cities(), &[], &KeyConfig::default()),
        Err(GazetteerError::EmptyIndex { .. })
    ));
}

#[cfg(feature = "json")]
#[test]
fn builds_from_record_files() {
    let dir = tempfile::tempdir().unwrap();
    let cities_path = dir.path().join("cities.json");
    let states_path = dir.path().join("states.json");
    std::fs::write(&cities_path, serde_json::to_vec(&cities()).unwrap()).unwrap();
    std::fs::write(&states_path, serde_json::to_vec(&states()).unwrap()).unwrap();

    let config = gazetteer_core::GazetteerConfig::default();
    let gazetteer = Gazetteer::build_from_files(&cities_path, &states_path, &config).unwrap();
    assert_eq!(gazetteer.cities.lookup("Eureka Springs, AR")[0].id, EUREKA_SPRINGS);
    assert_eq!((gazetteer.cities.size().1, gazetteer.states.size().1), (12, 12));
}
