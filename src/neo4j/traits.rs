//! GraphStore trait definition
//!
//! Abstract interface over the Neo4j operations the seeder and the HTTP
//! handlers need. `Neo4jClient` implements it against a live database and
//! `MockGraphStore` implements it in memory for tests.

use crate::neo4j::models::*;
use anyhow::Result;
use async_trait::async_trait;

/// Abstract interface for all graph database operations.
#[async_trait]
pub trait GraphStore: Send + Sync {
    // ========================================================================
    // Write operations (seeding)
    // ========================================================================

    /// Delete every node and relationship in the database
    async fn clear_graph(&self) -> Result<()>;

    /// Create a `BusStop` node
    async fn create_bus_stop(&self, stop: &BusStop) -> Result<()>;

    /// Create a `CONNECTED_TO` relationship between two existing stops.
    ///
    /// Fails if either endpoint does not exist.
    async fn create_connection(&self, connection: &Connection) -> Result<()>;

    // ========================================================================
    // Read operations (projection)
    // ========================================================================

    /// List all stops
    async fn list_bus_stops(&self) -> Result<Vec<BusStop>>;

    /// List all directed connections with their distances
    async fn list_connections(&self) -> Result<Vec<Connection>>;

    /// Read all stops and connections as one consistent snapshot.
    ///
    /// Either both reads succeed or the whole projection fails.
    async fn get_graph_snapshot(&self) -> Result<GraphSnapshot>;

    // ========================================================================
    // Health
    // ========================================================================

    /// Check connectivity to the store
    async fn health_check(&self) -> Result<bool>;
}
