//! Sensor Simulation Core Library
//!
//! Synthesizes time-series environmental readings (temperature, humidity,
//! oxygen, CO2) for a network of spatially distributed nodes, layering a
//! spreading fire event on top of ambient seasonal conditions. Intended as
//! training and test data for fire-detection analytics, not as a physically
//! accurate combustion model.
//!
//! ## Execution modes
//!
//! - Batch: a bounded, second-granularity run over a fixed timestamp range,
//!   producing a complete labeled dataset with globally synchronized decay.
//! - Realtime: an unbounded clock-driven generator producing one snapshot
//!   per tick, with per-node burn windows and self-terminating fire events.

pub mod clock;
pub mod driver;
pub mod error;
pub mod fire;
pub mod neighbors;
pub mod propagation;
pub mod reading;
pub mod season;
pub mod sensor;
pub mod topology;

// Re-export the surface most consumers need
pub use clock::{Clock, ManualClock, SystemClock};
pub use driver::{BatchConfig, BatchDriver, RealtimeDriver};
pub use error::SimulationError;
pub use fire::{FireEvent, FirePhase, FireState};
pub use neighbors::{NeighborStrategy, DEFAULT_MAX_SEPARATION_DEG};
pub use propagation::{BatchSpread, LiveSpread};
pub use reading::Reading;
pub use season::Season;
pub use sensor::{synthesize, SensorSample};
pub use topology::{Node, NodeTopology, DEFAULT_GRID_SPACING_DEG};
