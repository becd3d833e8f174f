//! Error handling example for gazetteer-rs
//!
//! This example demonstrates which conditions are errors (damaged or
//! missing artifacts, empty builds, bad configuration) and which are just
//! empty results (unknown keys, ambiguous queries).

use gazetteer_rs::prelude::*;

fn main() -> Result<()> {
    println!("=== Gazetteer Error Handling Example ===\n");

    // Example 1: Missing artifacts
    println!("--- Example 1: Loading from a missing directory ---");
    match Gazetteer::load("/nonexistent/gazetteer", LoadMode::Mmap) {
        Ok(_) => println!("  unexpectedly loaded"),
        Err(e) => println!("  ✗ {e}"),
    }
    println!();

    // Example 2: Empty builds
    println!("--- Example 2: Building from no eligible records ---");
    let foreign = vec![CityRecord {
        id: 1,
        name: "Toronto".into(),
        country: "CA".into(),
        ..Default::default()
    }];
    match CityIndex::build(&foreign, &KeyConfig::default()) {
        Ok(index) => println!("  unexpectedly built {index}"),
        Err(GazetteerError::EmptyIndex { kind }) => println!("  ✗ no {kind} entities to index"),
        Err(e) => return Err(e),
    }
    println!();

    // Example 3: Corrupt and mismatched artifacts
    println!("--- Example 3: Damaged artifacts ---");
    let states = vec![StateRecord {
        id: 10,
        name: "Ohio".into(),
        abbr: Some("OH".into()),
        country: "US".into(),
        ..Default::default()
    }];
    let index = StateIndex::build(&states, &KeyConfig::default())?;
    let bytes = index.as_bytes().to_vec();
    match CityIndex::from_bytes(bytes.clone()) {
        Err(e @ GazetteerError::KindMismatch { .. }) => println!("  ✗ {e}"),
        other => println!("  unexpected: {other:?}"),
    }
    match StateIndex::from_bytes(bytes[..bytes.len() - 3].to_vec()) {
        Err(e @ GazetteerError::CorruptIndex { .. }) => println!("  ✗ {e}"),
        other => println!("  unexpected: {other:?}"),
    }
    println!();

    // Example 4: Invalid configuration
    println!("--- Example 4: Configuration validation ---");
    let mut config = GazetteerConfig::default();
    config.resolver.ambiguity_ratio = -1.0;
    if let Err(e) = config.validate() {
        println!("  ✗ {e}");
    }
    println!();

    // Example 5: Empty results are not errors
    println!("--- Example 5: Unknown keys and ambiguity ---");
    println!("  lookup(\"Atlantis\") -> {:?}", index.lookup("Atlantis"));
    println!("  lookup(\"OH\") -> {:?}", index.lookup("OH"));
    println!("  lookup(\"OH USA\") -> {} hit(s)", index.lookup("OH USA").len());

    Ok(())
}
