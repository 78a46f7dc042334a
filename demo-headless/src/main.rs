use std::fs::File;
use std::io::{BufWriter, Write};

use chrono::{DateTime, NaiveDateTime, Utc};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sensor_sim_core::{
    BatchConfig, BatchDriver, FireEvent, NeighborStrategy, NodeTopology, Reading,
};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Batch dataset generator: one labeled CSV row per node per second
#[derive(Parser, Debug)]
#[command(name = "demo-headless")]
#[command(about = "Generate a labeled fire-detection sensor dataset", long_about = None)]
struct Args {
    /// Topology JSON file (array of {node_id, latitude, longitude})
    #[arg(short, long, default_value = "points.json")]
    nodes: String,

    /// First emitted timestamp, inclusive
    #[arg(long, default_value = "2024-11-23 10:00:00")]
    start: String,

    /// Last emitted timestamp, inclusive
    #[arg(long, default_value = "2024-11-23 10:07:00")]
    end: String,

    /// Fire ignition timestamp
    #[arg(long, default_value = "2024-11-23 10:01:00")]
    fire_start: String,

    /// Fire duration in seconds
    #[arg(long, default_value_t = 300)]
    fire_duration: i64,

    /// Node the fire starts at
    #[arg(long, default_value_t = 125)]
    fire_node: u32,

    /// Neighbor strategy: "distance" or "hex"
    #[arg(long, default_value = "distance")]
    strategy: String,

    /// RNG seed for a reproducible dataset (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Output CSV path
    #[arg(short, long, default_value = "fire_dataset.csv")]
    output: String,
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| format!("Invalid timestamp '{raw}': {e}"))
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

fn write_csv(path: &str, readings: &[Reading]) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(
        out,
        "timestamp,node_id,latitude,longitude,temperature,humidity,oxygen,CO2,fire"
    )?;
    for r in readings {
        writeln!(
            out,
            "{},{},{},{},{},{},{},{},{}",
            r.timestamp.format(TIMESTAMP_FORMAT),
            r.node_id,
            r.latitude,
            r.longitude,
            r.temperature,
            r.humidity,
            r.oxygen,
            r.co2,
            u8::from(r.fire),
        )?;
    }
    out.flush()
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let topology = NodeTopology::from_json_file(&args.nodes)?;
    println!("Loaded {} nodes from {}", topology.len(), args.nodes);

    let config = BatchConfig {
        start_time: parse_timestamp(&args.start)?,
        end_time: parse_timestamp(&args.end)?,
        fire_event: FireEvent::new(
            parse_timestamp(&args.fire_start)?,
            args.fire_duration,
            args.fire_node,
        ),
        strategy: parse_strategy(&args.strategy),
    };
    println!(
        "Window {} .. {}, fire at node {} for {}s",
        args.start, args.end, args.fire_node, args.fire_duration
    );

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let driver = BatchDriver::new(config);
    let readings = driver.run(&topology, &mut rng)?;
    let fire_rows = readings.iter().filter(|r| r.fire).count();
    println!(
        "Generated {} rows ({} labeled on fire)",
        readings.len(),
        fire_rows
    );

    write_csv(&args.output, &readings)?;
    println!("Dataset written to {}", args.output);
    Ok(())
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
