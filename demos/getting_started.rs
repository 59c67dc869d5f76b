//! Getting started with the geocell index.
//!
//! Run with: cargo run --example getting_started

use geotrie::{Config, DistanceMetric, GeoTrie, GeoTrieError, point_from_lat_lon};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== GeoTrie Getting Started ===\n");

    // Index London landmarks at street-level precision
    let landmarks = [
        ((51.514138, -0.136282), "Oxford Circus"),
        ((51.513284, -0.135724), "Carnaby Street"),
        ((51.517770, -0.140273), "Cavendish Square"),
        ((51.510357, -0.116773), "Somerset House"),
        ((51.500729, -0.124625), "Big Ben"),
    ];

    let mut index = GeoTrie::new(8)?;
    index.add_many(
        landmarks
            .iter()
            .map(|&((lat, lon), name)| (point_from_lat_lon(lat, lon), name)),
    )?;
    println!("1. Indexed {} landmarks at precision {}", index.len(), index.precision());

    let soho = point_from_lat_lon(51.513284, -0.136539);

    println!("\n2. Landmarks within 500 m of Soho");
    for (point, name) in index.radius_search(&soho, 500.0)? {
        println!("   {} ({:.6}, {:.6})", name, point.y(), point.x());
    }

    println!("\n3. Three nearest within 2 km");
    for (_, name, distance) in index.nearest_within(&soho, 2_000.0, 3)? {
        println!("   {:<18} {:>7.1} m", name, distance);
    }

    println!("\n4. Configuration from JSON");
    let config = Config::from_json(r#"{ "precision": 9, "metric": "geodesic" }"#)?;
    let geodesic: GeoTrie<&str> = GeoTrie::with_config(config)?;
    assert_eq!(geodesic.metric(), DistanceMetric::Geodesic);
    println!("   precision {}, metric {:?}", geodesic.precision(), geodesic.metric());

    println!("\n5. Radius too large for any geocell");
    match index.radius_search(&soho, 10_000_000.0) {
        Err(GeoTrieError::PrecisionLookup { radius }) => {
            println!("   rejected radius of {} m", radius)
        }
        other => println!("   unexpected: {:?}", other.map(|hits| hits.len())),
    }

    Ok(())
}
