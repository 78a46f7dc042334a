//! Fire event configuration and per-node fire state.

use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::topology::NodeTopology;

/// Lifecycle of a node within one fire event. `Extinguished` is terminal:
/// a node never re-ignites inside the same event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirePhase {
    Unignited,
    Active,
    Extinguished,
}

/// The parametrized description of a single ignition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FireEvent {
    pub start_time: DateTime<Utc>,
    pub duration_secs: i64,
    /// Id of the origin node
    pub origin: u32,
}

impl FireEvent {
    /// Batch-mode event: explicit origin, duration in seconds
    pub fn new(start_time: DateTime<Utc>, duration_secs: i64, origin: u32) -> Self {
        FireEvent {
            start_time,
            duration_secs,
            origin,
        }
    }

    /// Realtime-mode event: uniformly random origin, duration in minutes
    pub fn random<R: Rng + ?Sized>(
        start_time: DateTime<Utc>,
        duration_mins: i64,
        topology: &NodeTopology,
        rng: &mut R,
    ) -> Self {
        FireEvent {
            start_time,
            duration_secs: duration_mins * 60,
            origin: topology.random_node(rng).id,
        }
    }

    /// When the shared burn window closes
    pub fn end_time(&self) -> DateTime<Utc> {
        self.start_time + TimeDelta::seconds(self.duration_secs)
    }

    /// Whole seconds since the fire started; negative before the start
    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> i64 {
        (now - self.start_time).num_seconds()
    }
}

/// Mutable fire state of one node, keyed by node id in the engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireState {
    pub ignition_time: DateTime<Utc>,
    pub extinguish_time: DateTime<Utc>,
    /// In [0, 1]
    pub intensity: f64,
}

impl FireState {
    pub fn new(
        ignition_time: DateTime<Utc>,
        extinguish_time: DateTime<Utc>,
        intensity: f64,
    ) -> Self {
        FireState {
            ignition_time,
            extinguish_time,
            intensity,
        }
    }

    /// Phase at `now`. Active iff `ignition_time <= now < extinguish_time`.
    pub fn phase(&self, now: DateTime<Utc>) -> FirePhase {
        if now < self.ignition_time {
            FirePhase::Unignited
        } else if now < self.extinguish_time {
            FirePhase::Active
        } else {
            FirePhase::Extinguished
        }
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.phase(now) == FirePhase::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::Node;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ts(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_event_window() {
        let event = FireEvent::new(ts("2024-11-23T10:01:00Z"), 300, 125);
        assert_eq!(event.end_time(), ts("2024-11-23T10:06:00Z"));
        assert_eq!(event.elapsed_secs(ts("2024-11-23T10:00:00Z")), -60);
        assert_eq!(event.elapsed_secs(ts("2024-11-23T10:03:30Z")), 150);
    }

    #[test]
    fn test_random_event_picks_topology_member() {
        let topology = NodeTopology::new(vec![
            Node::new(10, 55.0, 37.0),
            Node::new(20, 55.001, 37.0),
            Node::new(30, 55.002, 37.0),
        ])
        .unwrap();
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..20 {
            let event = FireEvent::random(ts("2024-11-23T10:00:00Z"), 5, &topology, &mut rng);
            assert!(topology.contains(event.origin));
            assert_eq!(event.duration_secs, 300);
        }
    }

    #[test]
    fn test_phase_transitions() {
        let state = FireState::new(ts("2024-11-23T10:01:00Z"), ts("2024-11-23T10:02:00Z"), 1.0);

        assert_eq!(state.phase(ts("2024-11-23T10:00:59Z")), FirePhase::Unignited);
        assert_eq!(state.phase(ts("2024-11-23T10:01:00Z")), FirePhase::Active);
        assert_eq!(state.phase(ts("2024-11-23T10:01:59Z")), FirePhase::Active);
        // The extinguish instant itself is already out of the active window
        assert_eq!(
            state.phase(ts("2024-11-23T10:02:00Z")),
            FirePhase::Extinguished
        );
    }
}
