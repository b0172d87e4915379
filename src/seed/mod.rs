//! Startup seeding of the bus stop network.
//!
//! Wipes the database, then writes a fixed set of stops followed by the
//! connections between them. Runs once per process start, before the HTTP
//! listener is bound; any error is fatal to the caller.

use crate::neo4j::models::{BusStop, Connection};
use crate::neo4j::GraphStore;
use anyhow::{Context, Result};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info};

/// Problems found in a seed plan before anything is written
#[derive(Error, Debug, PartialEq)]
pub enum SeedError {
    #[error("Bus stop name must not be empty")]
    EmptyStopName,

    #[error("Bus stop '{0}' is declared more than once")]
    DuplicateStop(String),

    #[error("Connection {from} -> {to} has invalid distance {distance}")]
    InvalidDistance {
        from: String,
        to: String,
        distance: f64,
    },

    #[error("Connection {from} -> {to} references unknown bus stop '{missing}'")]
    UnknownStop {
        from: String,
        to: String,
        missing: String,
    },
}

/// The stops and connections written by the seeder, in write order
#[derive(Debug, Clone, PartialEq)]
pub struct SeedNetwork {
    pub bus_stops: Vec<BusStop>,
    pub connections: Vec<Connection>,
}

impl SeedNetwork {
    /// The demo network: three stops and three directed connections
    pub fn default_network() -> Self {
        Self {
            bus_stops: vec![BusStop::new("A"), BusStop::new("B"), BusStop::new("C")],
            connections: vec![
                Connection::new("A", "B", 10.0),
                Connection::new("B", "C", 15.0),
                Connection::new("A", "C", 25.0),
            ],
        }
    }

    /// Check names are unique, distances are finite and non-negative, and
    /// every connection endpoint is a declared stop.
    pub fn validate(&self) -> Result<(), SeedError> {
        let mut names = HashSet::new();
        for stop in &self.bus_stops {
            if stop.name.trim().is_empty() {
                return Err(SeedError::EmptyStopName);
            }
            if !names.insert(stop.name.as_str()) {
                return Err(SeedError::DuplicateStop(stop.name.clone()));
            }
        }

        for conn in &self.connections {
            if !conn.distance.is_finite() || conn.distance < 0.0 {
                return Err(SeedError::InvalidDistance {
                    from: conn.from.clone(),
                    to: conn.to.clone(),
                    distance: conn.distance,
                });
            }
            for endpoint in [&conn.from, &conn.to] {
                if !names.contains(endpoint.as_str()) {
                    return Err(SeedError::UnknownStop {
                        from: conn.from.clone(),
                        to: conn.to.clone(),
                        missing: endpoint.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

impl Default for SeedNetwork {
    fn default() -> Self {
        Self::default_network()
    }
}

/// Counts of what the seeder wrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub bus_stops_created: usize,
    pub connections_created: usize,
}

/// Replace the store contents with `network`.
///
/// Validation happens before the wipe, so an invalid plan leaves the store
/// untouched. A store failure after the wipe leaves it partially seeded;
/// there is no rollback.
pub async fn seed_graph(store: &dyn GraphStore, network: &SeedNetwork) -> Result<SeedReport> {
    network.validate().context("Invalid seed network")?;

    info!("Clearing graph before seeding");
    store
        .clear_graph()
        .await
        .context("Error clearing the database")?;

    let mut report = SeedReport::default();

    for stop in &network.bus_stops {
        store
            .create_bus_stop(stop)
            .await
            .with_context(|| format!("Error creating bus stop '{}'", stop.name))?;
        debug!("Created bus stop {}", stop.name);
        report.bus_stops_created += 1;
    }

    for conn in &network.connections {
        store.create_connection(conn).await.with_context(|| {
            format!("Error creating connection {} -> {}", conn.from, conn.to)
        })?;
        debug!(
            "Created connection {} -> {} ({})",
            conn.from, conn.to, conn.distance
        );
        report.connections_created += 1;
    }

    info!(
        "Seeded {} bus stops and {} connections",
        report.bus_stops_created, report.connections_created
    );

    Ok(report)
}
