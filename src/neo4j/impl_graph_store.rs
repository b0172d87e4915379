//! `GraphStore` implementation for `Neo4jClient`.
//!
//! Every method simply delegates to the corresponding inherent method on `Neo4jClient`.

use async_trait::async_trait;

use super::client::Neo4jClient;
use super::models::*;
use super::traits::GraphStore;

#[async_trait]
impl GraphStore for Neo4jClient {
    // ========================================================================
    // Write operations
    // ========================================================================

    async fn clear_graph(&self) -> anyhow::Result<()> {
        self.clear_graph().await
    }

    async fn create_bus_stop(&self, stop: &BusStop) -> anyhow::Result<()> {
        self.create_bus_stop(stop).await
    }

    async fn create_connection(&self, connection: &Connection) -> anyhow::Result<()> {
        self.create_connection(connection).await
    }

    // ========================================================================
    // Read operations
    // ========================================================================

    async fn list_bus_stops(&self) -> anyhow::Result<Vec<BusStop>> {
        self.list_bus_stops().await
    }

    async fn list_connections(&self) -> anyhow::Result<Vec<Connection>> {
        self.list_connections().await
    }

    async fn get_graph_snapshot(&self) -> anyhow::Result<GraphSnapshot> {
        self.get_graph_snapshot().await
    }

    async fn health_check(&self) -> anyhow::Result<bool> {
        self.health_check().await
    }
}
