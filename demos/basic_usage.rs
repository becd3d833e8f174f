//! Basic usage example for gazetteer-rs
//!
//! This example demonstrates how to:
//! - Build city and state indexes from records
//! - Save them and load them back memory-mapped
//! - Look up raw text in an index
//! - Resolve free-text locations to a city and state

use gazetteer_rs::prelude::*;

fn city(id: i64, name: &str, abbr: &str, state: &str, population: u64) -> CityRecord {
    CityRecord {
        id,
        name: name.into(),
        name_a1: Some(state.into()),
        state_abbr: Some(abbr.into()),
        country: "US".into(),
        population: Some(population),
        ..Default::default()
    }
}

fn state(id: i64, name: &str, abbr: &str) -> StateRecord {
    StateRecord {
        id,
        name: name.into(),
        abbr: Some(abbr.into()),
        country: "US".into(),
        ..Default::default()
    }
}

fn main() -> Result<()> {
    println!("=== Gazetteer Basic Usage Example ===\n");

    let cities = vec![
        city(1, "Boston", "MA", "Massachusetts", 650_000),
        city(2, "Portland", "OR", "Oregon", 650_000),
        city(3, "Portland", "ME", "Maine", 68_000),
        city(4, "Springfield", "IL", "Illinois", 114_000),
        city(5, "Springfield", "MO", "Missouri", 169_000),
        city(6, "Eureka Springs", "AR", "Arkansas", 2_100),
    ];
    let states = vec![
        state(101, "Massachusetts", "MA"),
        state(102, "Oregon", "OR"),
        state(103, "Maine", "ME"),
        state(104, "Illinois", "IL"),
        state(105, "Missouri", "MO"),
        state(106, "Arkansas", "AR"),
    ];

    // Example 1: Build and save
    println!("--- Example 1: Build and save ---");
    let built = Gazetteer::build(&cities, &states, &KeyConfig::default())?;
    let dir = std::env::temp_dir().join("gazetteer-demo");
    built.save(&dir)?;
    println!("{}", built.cities);
    println!("{}", built.states);
    println!("Saved to {}\n", dir.display());

    // Example 2: Load memory-mapped
    println!("--- Example 2: Load ---");
    let gazetteer = Gazetteer::load(&dir, LoadMode::Mmap)?;
    println!("{}", gazetteer.cities.stats());
    println!("{}\n", gazetteer.states.stats());

    // Example 3: Raw lookups
    println!("--- Example 3: Index lookups ---");
    for text in ["Portland", "Portland, ME", "Springfield", "Springfield MO"] {
        let hits = gazetteer.cities.lookup(text);
        println!("{text:?} -> {} hit(s)", hits.len());
        for hit in hits {
            println!("    {hit}");
        }
    }
    println!();

    // Example 4: Resolve
    println!("--- Example 4: Resolve ---");
    let resolver = gazetteer.resolver(&ResolverConfig::default());
    for text in [
        "Boston",
        "Eureka Springs Arkansas",
        "living in OR",
        "Springfield",
        "somewhere, over the rainbow",
    ] {
        let (res, rule) = resolver.resolve_with_rule(text);
        println!(
            "{text:?} -> city: {}, state: {} ({rule})",
            res.city.map(|c| c.name).unwrap_or_else(|| "-".into()),
            res.state.map(|s| s.name).unwrap_or_else(|| "-".into()),
        );
    }

    Ok(())
}
