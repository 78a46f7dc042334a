//! Configuration-error taxonomy.
//!
//! Every failure here is detected before the first simulation tick runs.
//! Range drift during synthesis is clamped, not reported, and neighbor
//! lookups that find nothing return an empty set.

/// Errors raised while validating simulation inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    /// The node topology contained no nodes
    EmptyTopology,
    /// Two nodes in the topology shared an id
    DuplicateNode(u32),
    /// The configured fire origin does not exist in the topology
    UnknownStartNode(u32),
    /// The batch time range ends before it starts
    EmptyTimeRange,
    /// The fire duration was zero or negative
    ZeroDuration,
    /// The topology input could not be read or parsed
    TopologyInput(String),
}

impl std::fmt::Display for SimulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationError::EmptyTopology => write!(f, "Topology contains no nodes"),
            SimulationError::DuplicateNode(id) => {
                write!(f, "Topology contains duplicate node id {id}")
            }
            SimulationError::UnknownStartNode(id) => {
                write!(f, "Fire start node {id} is not part of the topology")
            }
            SimulationError::EmptyTimeRange => {
                write!(f, "Simulation end time precedes start time")
            }
            SimulationError::ZeroDuration => {
                write!(f, "Fire duration must be at least one second")
            }
            SimulationError::TopologyInput(msg) => {
                write!(f, "Failed to load topology: {msg}")
            }
        }
    }
}

impl std::error::Error for SimulationError {}
