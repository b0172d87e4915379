//! Neo4j graph models for the bus stop network

use serde::{Deserialize, Serialize};

// ============================================================================
// Nodes
// ============================================================================

/// A bus stop, stored as `(:BusStop {name})`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BusStop {
    pub name: String,
}

impl BusStop {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

// ============================================================================
// Relationships
// ============================================================================

/// A directed `CONNECTED_TO` relationship between two stops
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub from: String,
    pub to: String,
    pub distance: f64,
}

impl Connection {
    pub fn new(from: impl Into<String>, to: impl Into<String>, distance: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            distance,
        }
    }
}

// ============================================================================
// Projection
// ============================================================================

/// Every stop and connection read back from the store at one point in time.
///
/// Serialized with the keys the visualization page reads
/// (`busStops`, `connections`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSnapshot {
    pub bus_stops: Vec<BusStop>,
    pub connections: Vec<Connection>,
}

impl GraphSnapshot {
    /// True when the store holds no stops and no connections
    pub fn is_empty(&self) -> bool {
        self.bus_stops.is_empty() && self.connections.is_empty()
    }
}
