//! Spatial adjacency between nodes.
//!
//! Two interchangeable strategies, equivalent at the grid spacing the
//! topology was built with. Both are deterministic: the same node against the
//! same topology always yields the same neighbor list, in the same order.

use serde::{Deserialize, Serialize};

use crate::topology::{GeoVec, Node, NodeTopology, DEFAULT_GRID_SPACING_DEG};

/// Maximum per-axis separation, in degrees, for the distance-threshold
/// strategy at the default lattice spacing.
pub const DEFAULT_MAX_SEPARATION_DEG: f64 = 0.001;

/// How adjacent nodes are resolved from the topology
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NeighborStrategy {
    /// Probe the six hex-lattice directions around the node and match
    /// topology points within half a grid spacing per axis. Directional by
    /// construction: a node sitting inside another node's probe tolerance is
    /// not guaranteed the reverse match.
    HexOffset { spacing: f64 },
    /// Any other node within `max_separation` degrees on both axes.
    /// Symmetric.
    DistanceThreshold { max_separation: f64 },
}

impl NeighborStrategy {
    /// Hex-offset strategy at the upstream lattice spacing
    pub fn hex_lattice() -> Self {
        NeighborStrategy::HexOffset {
            spacing: DEFAULT_GRID_SPACING_DEG,
        }
    }

    /// Distance-threshold strategy at the upstream tolerance
    pub fn distance_threshold() -> Self {
        NeighborStrategy::DistanceThreshold {
            max_separation: DEFAULT_MAX_SEPARATION_DEG,
        }
    }

    /// Resolve the nodes adjacent to `node`, excluding the node itself.
    ///
    /// A node with no matches returns an empty list; sparse grid boundaries
    /// are expected, not errors.
    pub fn neighbors_of(&self, node: &Node, topology: &NodeTopology) -> Vec<u32> {
        match *self {
            NeighborStrategy::HexOffset { spacing } => hex_neighbors(node, topology, spacing),
            NeighborStrategy::DistanceThreshold { max_separation } => {
                threshold_neighbors(node, topology, max_separation)
            }
        }
    }
}

fn hex_neighbors(node: &Node, topology: &NodeTopology, spacing: f64) -> Vec<u32> {
    let dx = 1.5 * spacing;
    let dy = 3.0_f64.sqrt() * spacing / 2.0;
    let tolerance = spacing / 2.0;

    // The six hex directions: row mates at a full column step, the other
    // four at half a column step on the adjacent rows.
    let offsets = [
        GeoVec::new(dx, 0.0),
        GeoVec::new(-dx, 0.0),
        GeoVec::new(dx / 2.0, dy),
        GeoVec::new(dx / 2.0, -dy),
        GeoVec::new(-dx / 2.0, dy),
        GeoVec::new(-dx / 2.0, -dy),
    ];

    let origin = node.position();
    let mut matched = Vec::new();

    for offset in offsets {
        let candidate = origin + offset;
        for other in topology {
            if other.id == node.id || matched.contains(&other.id) {
                continue;
            }
            let delta = other.position() - candidate;
            if delta.x.abs() <= tolerance && delta.y.abs() <= tolerance {
                matched.push(other.id);
            }
        }
    }

    matched
}

fn threshold_neighbors(node: &Node, topology: &NodeTopology, max_separation: f64) -> Vec<u32> {
    topology
        .iter()
        .filter(|other| {
            other.id != node.id
                && (other.latitude - node.latitude).abs() <= max_separation
                && (other.longitude - node.longitude).abs() <= max_separation
        })
        .map(|other| other.id)
        .collect()
}
