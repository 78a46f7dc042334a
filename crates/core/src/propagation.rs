//! Fire propagation engines.
//!
//! Two engines share the node phase machine (unignited -> active ->
//! extinguished) but differ in how intensity and extinguishment are
//! clocked:
//!
//! - [`BatchSpread`] drives a bounded dataset run: one shared decay clock,
//!   unconditional neighbor ignition at fixed checkpoints, and a single
//!   global burn-out. Reproducible and simple to label.
//! - [`LiveSpread`] drives an unbounded feed: per-node extinguish timers,
//!   randomized partial spread every tick, and self-termination once no
//!   timer remains pending.
//!
//! Both compute their next-state delta while iterating a snapshot of the
//! active set and commit it afterwards, so spread never observes nodes
//! ignited in the same tick.

use chrono::{DateTime, TimeDelta, Utc};
use rand::seq::IndexedRandom;
use rand::Rng;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::SimulationError;
use crate::fire::{FireEvent, FireState};
use crate::neighbors::NeighborStrategy;
use crate::topology::NodeTopology;

/// Seconds between unconditional batch-mode spread checkpoints
const BATCH_SPREAD_INTERVAL_SECS: i64 = 30;
/// Fraction of a burning node's neighbors ignited per realtime tick
const LIVE_SPREAD_FRACTION: f64 = 0.75;
/// Each realtime hop outlives its source by this many seconds
const LIVE_HOP_LAG_SECS: i64 = 2;

fn validate(event: &FireEvent, topology: &NodeTopology) -> Result<(), SimulationError> {
    if event.duration_secs <= 0 {
        return Err(SimulationError::ZeroDuration);
    }
    if !topology.contains(event.origin) {
        return Err(SimulationError::UnknownStartNode(event.origin));
    }
    Ok(())
}

/// Batch-mode spread: globally synchronized decay and burn-out.
///
/// All active nodes share one decay clock anchored at the event start; a node
/// ignited at a late checkpoint decays in step with the origin. Kept this way
/// deliberately: a fixed-length labeled dataset is easier to reproduce than a
/// per-node decay would make it.
#[derive(Debug, Clone)]
pub struct BatchSpread {
    event: FireEvent,
    strategy: NeighborStrategy,
    active: FxHashSet<u32>,
    cleared: bool,
}

impl BatchSpread {
    /// # Errors
    /// Fails fast on a non-positive duration or an origin outside the
    /// topology, before any tick runs.
    pub fn new(
        event: FireEvent,
        strategy: NeighborStrategy,
        topology: &NodeTopology,
    ) -> Result<Self, SimulationError> {
        validate(&event, topology)?;
        Ok(BatchSpread {
            event,
            strategy,
            active: FxHashSet::default(),
            cleared: false,
        })
    }

    /// Advance the engine to `now`, one tick.
    pub fn advance(&mut self, now: DateTime<Utc>, topology: &NodeTopology) {
        let elapsed = self.event.elapsed_secs(now);
        if elapsed < 0 || self.cleared {
            return;
        }

        if elapsed > self.event.duration_secs {
            tracing::info!(
                nodes = self.active.len(),
                "fire burned out, clearing active set"
            );
            self.active.clear();
            self.cleared = true;
            return;
        }

        if self.active.is_empty() {
            self.active.insert(self.event.origin);
            tracing::info!(origin = self.event.origin, "fire ignited");
        }

        if elapsed % BATCH_SPREAD_INTERVAL_SECS == 0 {
            // Snapshot, resolve, then commit: spread must not chain through
            // nodes ignited at this same checkpoint
            let mut delta = Vec::new();
            for &id in &self.active {
                let Some(node) = topology.get(id) else {
                    continue;
                };
                for neighbor in self.strategy.neighbors_of(node, topology) {
                    if !self.active.contains(&neighbor) && !delta.contains(&neighbor) {
                        delta.push(neighbor);
                    }
                }
            }
            if !delta.is_empty() {
                tracing::debug!(elapsed, count = delta.len(), "spread checkpoint");
            }
            self.active.extend(delta);
        }
    }

    /// Shared decay intensity at `now`: `max(0, 1 - elapsed / duration)`
    pub fn intensity(&self, now: DateTime<Utc>) -> f64 {
        let elapsed = self.event.elapsed_secs(now);
        if elapsed < 0 {
            return 0.0;
        }
        (1.0 - elapsed as f64 / self.event.duration_secs as f64).max(0.0)
    }

    /// Whether this node is burning at the current tick
    pub fn is_active(&self, id: u32) -> bool {
        self.active.contains(&id)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn event(&self) -> &FireEvent {
        &self.event
    }
}

/// Realtime spread: per-node burn windows, randomized partial hops.
///
/// Intensity stays at the ignition value for a node's whole window; the decay
/// of the event as a whole comes from nodes dropping out as their individual
/// timers expire. Each hop schedules its target to outlive the source by a
/// fixed two-second lag, which bounds the event: the last-ignited node's
/// timer is the last to expire.
#[derive(Debug, Clone)]
pub struct LiveSpread {
    event: FireEvent,
    strategy: NeighborStrategy,
    states: FxHashMap<u32, FireState>,
    started: bool,
    over: bool,
}

impl LiveSpread {
    /// # Errors
    /// Same fail-fast validation as [`BatchSpread::new`].
    pub fn new(
        event: FireEvent,
        strategy: NeighborStrategy,
        topology: &NodeTopology,
    ) -> Result<Self, SimulationError> {
        validate(&event, topology)?;
        Ok(Self::armed(event, strategy))
    }

    /// Build from an event whose duration and origin were already validated
    /// (the realtime driver validates once at construction and then arms a
    /// fresh event per burn-out).
    pub(crate) fn armed(event: FireEvent, strategy: NeighborStrategy) -> Self {
        LiveSpread {
            event,
            strategy,
            states: FxHashMap::default(),
            started: false,
            over: false,
        }
    }

    /// Advance the engine to `now`, one tick.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        now: DateTime<Utc>,
        topology: &NodeTopology,
        rng: &mut R,
    ) {
        if self.over || self.event.elapsed_secs(now) < 0 {
            return;
        }

        if !self.started {
            self.states.insert(
                self.event.origin,
                FireState::new(self.event.start_time, self.event.end_time(), 1.0),
            );
            self.started = true;
            tracing::info!(origin = self.event.origin, "fire ignited");
        }

        // Spread from every node still burning at this tick. The delta is
        // committed after the loop; a neighbor already active, already
        // extinguished, or already picked this tick is skipped.
        let burning: Vec<(u32, FireState)> = self
            .states
            .iter()
            .filter(|(_, state)| state.is_active(now))
            .map(|(&id, &state)| (id, state))
            .collect();

        let mut delta: Vec<(u32, FireState)> = Vec::new();
        for (id, state) in burning {
            let Some(node) = topology.get(id) else {
                continue;
            };
            let neighbors = self.strategy.neighbors_of(node, topology);
            let hop_count = (neighbors.len() as f64 * LIVE_SPREAD_FRACTION).floor() as usize;
            if hop_count == 0 {
                continue;
            }

            for &target in neighbors.choose_multiple(rng, hop_count) {
                if self.states.contains_key(&target)
                    || delta.iter().any(|(queued, _)| *queued == target)
                {
                    continue;
                }
                delta.push((
                    target,
                    FireState::new(
                        now,
                        state.extinguish_time + TimeDelta::seconds(LIVE_HOP_LAG_SECS),
                        state.intensity,
                    ),
                ));
            }
        }

        for (id, state) in delta {
            tracing::debug!(node = id, extinguish = %state.extinguish_time, "hop ignition");
            self.states.insert(id, state);
        }

        // Event over once no timer remains pending; the state map clears so
        // a fresh event can be armed
        if self.states.values().all(|s| s.extinguish_time <= now) {
            tracing::info!("fire event self-terminated");
            self.states.clear();
            self.over = true;
        }
    }

    /// Whether this node is burning at `now`
    pub fn is_active(&self, id: u32, now: DateTime<Utc>) -> bool {
        self.states.get(&id).is_some_and(|s| s.is_active(now))
    }

    /// Intensity of the node at `now`; 0 outside its burn window
    pub fn intensity_of(&self, id: u32, now: DateTime<Utc>) -> f64 {
        self.states
            .get(&id)
            .filter(|s| s.is_active(now))
            .map_or(0.0, |s| s.intensity)
    }

    /// Fire state of a node, if it was ever ignited in this event
    pub fn state_of(&self, id: u32) -> Option<&FireState> {
        self.states.get(&id)
    }

    /// Nodes burning at `now`
    pub fn burning_count(&self, now: DateTime<Utc>) -> usize {
        self.states.values().filter(|s| s.is_active(now)).count()
    }

    /// True once every per-node timer has expired and the set was cleared
    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn event(&self) -> &FireEvent {
        &self.event
    }
}
