//! End-to-end batch runs over a small lattice-spaced topology.

use chrono::{DateTime, TimeDelta, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

use sensor_sim_core::{
    BatchConfig, BatchDriver, FireEvent, NeighborStrategy, Node, NodeTopology, Reading,
};

fn ts(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .unwrap()
        .with_timezone(&Utc)
}

/// Three nodes in a line at the distance-threshold lattice spacing:
/// 1 <-> 2 and 2 <-> 3 are adjacent, 1 <-> 3 are not
fn lattice_topology() -> NodeTopology {
    NodeTopology::new(vec![
        Node::new(1, 55.0, 37.0),
        Node::new(2, 55.001, 37.0),
        Node::new(3, 55.002, 37.0),
    ])
    .unwrap()
}

fn run_window(start: &str, end: &str, fire: FireEvent) -> Vec<Reading> {
    let driver = BatchDriver::new(BatchConfig {
        start_time: ts(start),
        end_time: ts(end),
        fire_event: fire,
        strategy: NeighborStrategy::distance_threshold(),
    });
    let mut rng = StdRng::seed_from_u64(2024);
    driver.run(&lattice_topology(), &mut rng).unwrap()
}

#[test]
fn full_window_burns_out_before_range_end() {
    // Fire at node 1 for 120s; sampled through start + 150s. By then the
    // origin and every node pulled in at a spread checkpoint must be out.
    let fire_start = ts("2024-11-23T10:01:00Z");
    let readings = run_window(
        "2024-11-23T10:00:00Z",
        "2024-11-23T10:03:30Z",
        FireEvent::new(fire_start, 120, 1),
    );

    let final_tick = ts("2024-11-23T10:03:30Z");
    let at_end: Vec<&Reading> = readings
        .iter()
        .filter(|r| r.timestamp == final_tick)
        .collect();
    assert_eq!(at_end.len(), 3);
    assert!(at_end.iter().all(|r| !r.fire));

    // The neighbor joined through a checkpoint and was burning mid-event
    let mid = fire_start + TimeDelta::seconds(60);
    assert!(readings
        .iter()
        .any(|r| r.timestamp == mid && r.node_id == 2 && r.fire));
}

#[test]
fn no_fire_labels_before_ignition() {
    let fire_start = ts("2024-11-23T10:01:00Z");
    let readings = run_window(
        "2024-11-23T10:00:00Z",
        "2024-11-23T10:02:00Z",
        FireEvent::new(fire_start, 120, 1),
    );

    for reading in readings.iter().filter(|r| r.timestamp < fire_start) {
        assert!(!reading.fire, "node {} labeled early", reading.node_id);
    }
}

#[test]
fn no_fire_labels_after_burnout() {
    let fire_start = ts("2024-11-23T10:01:00Z");
    let burnout = fire_start + TimeDelta::seconds(121);
    let readings = run_window(
        "2024-11-23T10:00:00Z",
        "2024-11-23T10:05:00Z",
        FireEvent::new(fire_start, 120, 1),
    );

    for reading in readings.iter().filter(|r| r.timestamp >= burnout) {
        assert!(!reading.fire, "node {} still labeled", reading.node_id);
    }
}

#[test]
fn dataset_is_dense_and_ordered() {
    let readings = run_window(
        "2024-11-23T10:00:00Z",
        "2024-11-23T10:01:00Z",
        FireEvent::new(ts("2024-11-23T10:00:30Z"), 60, 2),
    );

    // One row per (tick, node), tick-major
    assert_eq!(readings.len(), 61 * 3);
    for (i, chunk) in readings.chunks(3).enumerate() {
        let expected = ts("2024-11-23T10:00:00Z") + TimeDelta::seconds(i as i64);
        assert!(chunk.iter().all(|r| r.timestamp == expected));
        let ids: Vec<u32> = chunk.iter().map(|r| r.node_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}

#[test]
fn burning_rows_read_hotter_than_quiet_rows() {
    // Autumn band tops out at 20 C + 2 noise; a full-intensity fire adds at
    // least 30. Compare the origin's first burning row with its quiet rows.
    let fire_start = ts("2024-11-23T10:01:00Z");
    let readings = run_window(
        "2024-11-23T10:00:00Z",
        "2024-11-23T10:02:00Z",
        FireEvent::new(fire_start, 600, 1),
    );

    let ignition_row = readings
        .iter()
        .find(|r| r.node_id == 1 && r.timestamp == fire_start)
        .unwrap();
    assert!(ignition_row.fire);
    assert!(ignition_row.temperature > 22.0);
    assert!(ignition_row.co2 > 400.0);
}
