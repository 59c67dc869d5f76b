//! Sharing one index across threads with `SyncGeoTrie`.
//!
//! Run with: cargo run --example shared_index --features sync --release

use geotrie::{SyncGeoTrie, point_from_lat_lon};
use std::thread;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== SyncGeoTrie Multi-threaded Example ===\n");

    let index: SyncGeoTrie<String> = SyncGeoTrie::new(9)?;

    println!("1. Spawning 4 writer threads, 250 points each...");
    let mut handles = vec![];

    for thread_id in 0..4 {
        let index = index.clone();
        handles.push(thread::spawn(move || {
            for i in 0..250 {
                let lat = 51.50 + thread_id as f64 * 0.01 + i as f64 * 0.00002;
                let lon = -0.13 + i as f64 * 0.00002;
                index
                    .add(point_from_lat_lon(lat, lon), format!("t{}-{}", thread_id, i))
                    .unwrap();
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }
    println!("   Total points: {}\n", index.len());

    println!("2. Concurrent readers");
    let mut handles = vec![];
    for thread_id in 0..3 {
        let index = index.clone();
        handles.push(thread::spawn(move || {
            let center = point_from_lat_lon(51.50 + thread_id as f64 * 0.01, -0.13);
            let hits = index.radius_search(&center, 200.0).unwrap();
            println!("   Reader {} found {} points within 200 m", thread_id, hits.len());
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    Ok(())
}
