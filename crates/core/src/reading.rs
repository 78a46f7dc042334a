//! The synthesized sensor record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sensor::SensorSample;
use crate::topology::Node;

/// One synthesized sensor reading for one node at one tick.
///
/// Both execution modes produce this same shape; the historical column-name
/// variants for coordinates are unified here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub timestamp: DateTime<Utc>,
    pub node_id: u32,
    pub latitude: f64,
    pub longitude: f64,
    /// Celsius, unclamped
    pub temperature: f64,
    /// Percent, in [0, 100]
    pub humidity: f64,
    /// Percent, in [10, 21]
    pub oxygen: f64,
    /// Parts per million, non-negative
    #[serde(rename = "CO2")]
    pub co2: f64,
    pub fire: bool,
}

impl Reading {
    /// Assemble a reading from a node, a synthesized sample and the fire flag
    pub fn new(timestamp: DateTime<Utc>, node: &Node, sample: SensorSample, fire: bool) -> Self {
        Reading {
            timestamp,
            node_id: node.id,
            latitude: node.latitude,
            longitude: node.longitude,
            temperature: sample.temperature,
            humidity: sample.humidity,
            oxygen: sample.oxygen,
            co2: sample.co2,
            fire,
        }
    }
}
