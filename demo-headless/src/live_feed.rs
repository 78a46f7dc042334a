use std::time::Duration;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sensor_sim_core::{NeighborStrategy, NodeTopology, RealtimeDriver, SystemClock};

/// Live feed: one snapshot of every node per second, forever
#[derive(Parser, Debug)]
#[command(name = "live-feed")]
#[command(about = "Stream synthesized sensor snapshots in real time", long_about = None)]
struct Args {
    /// Topology JSON file (array of {node_id, latitude, longitude})
    #[arg(short, long, default_value = "points.json")]
    nodes: String,

    /// Burn duration of each fire event, in minutes
    #[arg(long, default_value_t = 5)]
    fire_duration: i64,

    /// Neighbor strategy: "distance" or "hex"
    #[arg(long, default_value = "distance")]
    strategy: String,
}

fn parse_strategy(raw: &str) -> NeighborStrategy {
    match raw.to_lowercase().as_str() {
        "hex" | "hex-offset" => NeighborStrategy::hex_lattice(),
        "distance" | "distance-threshold" => NeighborStrategy::distance_threshold(),
        other => {
            println!("Unknown strategy '{other}', using distance threshold");
            NeighborStrategy::distance_threshold()
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let topology = NodeTopology::from_json_file(&args.nodes)?;
    println!("Loaded {} nodes from {}", topology.len(), args.nodes);
    println!("temperature,humidity,oxygen,CO2,node_id,timestamp,latitude,longitude,fire");

    let mut driver = RealtimeDriver::new(
        topology,
        parse_strategy(&args.strategy),
        args.fire_duration,
        SystemClock,
        StdRng::from_os_rng(),
    )?;

    // The driver never sleeps; pacing belongs to the consumer. Terminate
    // externally (Ctrl+C) to stop the feed.
    loop {
        let snapshot = driver.tick();
        let burning = snapshot.iter().filter(|r| r.fire).count();
        for r in &snapshot {
            println!(
                "{},{},{},{},{},{},{},{},{}",
                r.temperature,
                r.humidity,
                r.oxygen,
                r.co2,
                r.node_id,
                r.timestamp.format("%Y-%m-%d %H:%M:%S"),
                r.latitude,
                r.longitude,
                u8::from(r.fire),
            );
        }
        if burning > 0 {
            eprintln!("[{} nodes burning]", burning);
        }
        std::thread::sleep(Duration::from_secs(1));
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
