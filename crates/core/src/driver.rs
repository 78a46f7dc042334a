//! Simulation drivers: the two orchestration modes.
//!
//! [`BatchDriver`] materializes a complete labeled dataset over a bounded
//! timestamp range. [`RealtimeDriver`] is an unbounded generator yielding one
//! snapshot per tick against an injected clock; it never sleeps itself, the
//! consumer paces it (nominally once per second).

use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;

use crate::clock::Clock;
use crate::error::SimulationError;
use crate::fire::FireEvent;
use crate::neighbors::NeighborStrategy;
use crate::propagation::{BatchSpread, LiveSpread};
use crate::reading::Reading;
use crate::season::Season;
use crate::sensor::synthesize;
use crate::topology::NodeTopology;

/// Configuration of one bounded dataset run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchConfig {
    /// First emitted tick, inclusive
    pub start_time: DateTime<Utc>,
    /// Last emitted tick, inclusive
    pub end_time: DateTime<Utc>,
    pub fire_event: FireEvent,
    pub strategy: NeighborStrategy,
}

/// Bounded, second-granularity dataset generator.
///
/// Pure function of its inputs modulo the injected RNG: the same config,
/// topology and seed reproduce the same dataset.
#[derive(Debug, Clone)]
pub struct BatchDriver {
    config: BatchConfig,
}

impl BatchDriver {
    pub fn new(config: BatchConfig) -> Self {
        BatchDriver { config }
    }

    /// Run the full timestamp range, producing one reading per (tick, node)
    /// in tick-major, topology order.
    ///
    /// # Errors
    /// All configuration errors surface here before the first tick: an
    /// inverted time range, a non-positive fire duration, or a fire origin
    /// outside the topology.
    pub fn run<R: Rng + ?Sized>(
        &self,
        topology: &NodeTopology,
        rng: &mut R,
    ) -> Result<Vec<Reading>, SimulationError> {
        if self.config.end_time < self.config.start_time {
            return Err(SimulationError::EmptyTimeRange);
        }
        let mut spread =
            BatchSpread::new(self.config.fire_event, self.config.strategy, topology)?;

        let ticks = (self.config.end_time - self.config.start_time).num_seconds() + 1;
        let mut readings = Vec::with_capacity(ticks as usize * topology.len());

        let mut now = self.config.start_time;
        while now <= self.config.end_time {
            let season = Season::for_timestamp(now);
            spread.advance(now, topology);
            let intensity = spread.intensity(now);

            for node in topology {
                let fire = spread.is_active(node.id);
                let sample = synthesize(season, fire, if fire { intensity } else { 0.0 }, rng);
                readings.push(Reading::new(now, node, sample, fire));
            }
            now += TimeDelta::seconds(1);
        }

        tracing::info!(
            rows = readings.len(),
            nodes = topology.len(),
            ticks,
            "batch dataset complete"
        );
        Ok(readings)
    }
}

/// Unbounded snapshot generator for a live feed.
///
/// Each [`RealtimeDriver::tick`] samples the clock, arms a fresh random fire
/// event if none is pending, advances the spread engine and synthesizes one
/// reading per node. The sequence is lazy and non-restartable; cancellation
/// is the consumer ceasing to pull.
pub struct RealtimeDriver<C: Clock, R: Rng> {
    topology: NodeTopology,
    strategy: NeighborStrategy,
    fire_duration_mins: i64,
    clock: C,
    rng: R,
    spread: Option<LiveSpread>,
}

impl<C: Clock, R: Rng> RealtimeDriver<C, R> {
    /// # Errors
    /// Fails fast on a non-positive per-event fire duration; every event the
    /// driver arms later reuses this validated value.
    pub fn new(
        topology: NodeTopology,
        strategy: NeighborStrategy,
        fire_duration_mins: i64,
        clock: C,
        rng: R,
    ) -> Result<Self, SimulationError> {
        if fire_duration_mins <= 0 {
            return Err(SimulationError::ZeroDuration);
        }
        Ok(RealtimeDriver {
            topology,
            strategy,
            fire_duration_mins,
            clock,
            rng,
            spread: None,
        })
    }

    /// Produce the next snapshot: one reading per node at the sampled time
    pub fn tick(&mut self) -> Vec<Reading> {
        let sampled = self.clock.now();
        // One-second granularity: sub-second clock noise is truncated away
        let now = DateTime::from_timestamp(sampled.timestamp(), 0).unwrap_or(sampled);

        let spread = self.spread.get_or_insert_with(|| {
            let event =
                FireEvent::random(now, self.fire_duration_mins, &self.topology, &mut self.rng);
            tracing::info!(
                origin = event.origin,
                duration_secs = event.duration_secs,
                "armed fire event"
            );
            LiveSpread::armed(event, self.strategy)
        });
        spread.advance(now, &self.topology, &mut self.rng);

        let season = Season::for_timestamp(now);
        let mut readings = Vec::with_capacity(self.topology.len());
        for node in &self.topology {
            let fire = spread.is_active(node.id, now);
            let intensity = spread.intensity_of(node.id, now);
            let sample = synthesize(season, fire, intensity, &mut self.rng);
            readings.push(Reading::new(now, node, sample, fire));
        }

        // A terminated event is disarmed; the next tick arms a fresh one at
        // a new random origin
        if spread.is_over() {
            self.spread = None;
        }

        readings
    }

    /// The currently armed fire event, if any
    pub fn current_event(&self) -> Option<&FireEvent> {
        self.spread.as_ref().map(LiveSpread::event)
    }

    pub fn topology(&self) -> &NodeTopology {
        &self.topology
    }
}

impl<C: Clock, R: Rng> Iterator for RealtimeDriver<C, R> {
    type Item = Vec<Reading>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.tick())
    }
}
