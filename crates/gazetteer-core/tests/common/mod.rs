#![allow(dead_code)]

use gazetteer_core::{CityRecord, EntityId, StateRecord};

pub fn city(id: EntityId, name: &str, abbr: &str, a1: &str, pop: u64) -> CityRecord {
    CityRecord {
        id,
        name: name.into(),
        name_a1: Some(a1.into()),
        state_abbr: Some(abbr.into()),
        country: "US".into(),
        population: Some(pop),
        ..Default::default()
    }
}

pub fn state(id: EntityId, name: &str, abbr: &str) -> StateRecord {
    StateRecord {
        id,
        name: name.into(),
        abbr: Some(abbr.into()),
        country: "US".into(),
        ..Default::default()
    }
}

pub const WASHINGTON_DC: EntityId = 1;
pub const NEW_YORK_CITY: EntityId = 2;
pub const EUREKA_SPRINGS: EntityId = 3;
pub const CINCINNATI: EntityId = 4;
pub const DAYTON: EntityId = 5;

pub const ARKANSAS: EntityId = 106;
pub const OHIO: EntityId = 109;

pub fn cities() -> Vec<CityRecord> {
    let mut nyc = city(NEW_YORK_CITY, "New York", "NY", "New York", 8_300_000);
    nyc.alt_names = vec!["New York City".into(), "NYC".into()];

    let mut canon = city(12, "Cañon City", "CO", "Colorado", 16_000);
    canon.latitude = Some(38.44);
    canon.longitude = Some(-105.24);

    let mut foreign = city(99, "Toronto", "ON", "Ontario", 2_700_000);
    foreign.country = "CA".into();

    vec![
        city(WASHINGTON_DC, "Washington", "DC", "District of Columbia", 690_000),
        nyc,
        city(EUREKA_SPRINGS, "Eureka Springs", "AR", "Arkansas", 2_100),
        city(CINCINNATI, "Cincinnati", "OH", "Ohio", 310_000),
        city(DAYTON, "Dayton", "OH", "Ohio", 137_000),
        city(6, "Washington", "PA", "Pennsylvania", 13_000),
        city(7, "Portland", "OR", "Oregon", 650_000),
        city(8, "Portland", "ME", "Maine", 68_000),
        city(9, "Springfield", "IL", "Illinois", 114_000),
        city(10, "Springfield", "MO", "Missouri", 169_000),
        city(11, "Springfield", "MA", "Massachusetts", 155_000),
        canon,
        foreign,
    ]
}

pub fn states() -> Vec<StateRecord> {
    let mut ontario = state(199, "Ontario", "ON");
    ontario.country = "CA".into();

    vec![
        state(101, "District of Columbia", "DC"),
        state(102, "New York", "NY"),
        state(103, "Pennsylvania", "PA"),
        state(104, "Oregon", "OR"),
        state(105, "Maine", "ME"),
        state(ARKANSAS, "Arkansas", "AR"),
        state(107, "Illinois", "IL"),
        state(108, "Missouri", "MO"),
        state(OHIO, "Ohio", "OH"),
        state(110, "Massachusetts", "MA"),
        state(111, "Colorado", "CO"),
        state(112, "Indiana", "IN"),
        ontario,
    ]
}
