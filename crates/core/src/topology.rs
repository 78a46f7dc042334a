//! Static node topology consumed by the simulation.
//!
//! Node placement is an upstream concern; the simulation receives an ordered
//! list of nodes with stable geographic coordinates and never mutates it.

use std::path::Path;

use nalgebra::Vector2;
use rand::Rng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

/// 2D geographic vector (x = longitude, y = latitude), in degrees
pub type GeoVec = Vector2<f64>;

/// Grid spacing of the upstream hex lattice: 135 m converted to degrees
/// of latitude (1 degree ~= 111.32 km).
pub const DEFAULT_GRID_SPACING_DEG: f64 = 135.0 / 111_320.0;

/// A fixed sensor node with stable geographic coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "node_id")]
    pub id: u32,
    pub latitude: f64,
    pub longitude: f64,
}

impl Node {
    pub fn new(id: u32, latitude: f64, longitude: f64) -> Self {
        Node {
            id,
            latitude,
            longitude,
        }
    }

    /// Position as a geographic vector
    pub fn position(&self) -> GeoVec {
        GeoVec::new(self.longitude, self.latitude)
    }
}

/// The complete, ordered collection of nodes.
///
/// Validated at construction: at least one node, unique ids. Iteration order
/// is the input order, so downstream output is deterministic.
#[derive(Debug, Clone)]
pub struct NodeTopology {
    nodes: Vec<Node>,
    index: FxHashMap<u32, usize>,
}

impl NodeTopology {
    /// Build a topology from an ordered node list.
    ///
    /// # Errors
    /// Returns [`SimulationError::EmptyTopology`] for an empty list and
    /// [`SimulationError::DuplicateNode`] when two nodes share an id.
    pub fn new(nodes: Vec<Node>) -> Result<Self, SimulationError> {
        if nodes.is_empty() {
            return Err(SimulationError::EmptyTopology);
        }

        let mut index = FxHashMap::default();
        for (pos, node) in nodes.iter().enumerate() {
            if index.insert(node.id, pos).is_some() {
                return Err(SimulationError::DuplicateNode(node.id));
            }
        }

        Ok(NodeTopology { nodes, index })
    }

    /// Parse a topology from the upstream `points.json` shape: an ordered
    /// array of `{node_id, latitude, longitude}` records.
    ///
    /// # Errors
    /// Returns [`SimulationError::TopologyInput`] on malformed JSON, plus
    /// the [`NodeTopology::new`] validation errors.
    pub fn from_json_str(json: &str) -> Result<Self, SimulationError> {
        let nodes: Vec<Node> = serde_json::from_str(json)
            .map_err(|e| SimulationError::TopologyInput(e.to_string()))?;
        NodeTopology::new(nodes)
    }

    /// Load a topology from a JSON file.
    ///
    /// # Errors
    /// Returns [`SimulationError::TopologyInput`] when the file cannot be
    /// read, plus the [`NodeTopology::from_json_str`] errors.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, SimulationError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SimulationError::TopologyInput(e.to_string()))?;
        NodeTopology::from_json_str(&contents)
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: construction rejects empty topologies
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node by id
    pub fn get(&self, id: u32) -> Option<&Node> {
        self.index.get(&id).map(|&pos| &self.nodes[pos])
    }

    /// Whether a node with this id exists
    pub fn contains(&self, id: u32) -> bool {
        self.index.contains_key(&id)
    }

    /// Nodes in input order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Iterate nodes in input order
    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    /// Pick a uniformly random node
    pub fn random_node<R: Rng + ?Sized>(&self, rng: &mut R) -> &Node {
        &self.nodes[rng.random_range(0..self.nodes.len())]
    }
}

impl<'a> IntoIterator for &'a NodeTopology {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
