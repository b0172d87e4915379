//! In-memory mock implementation of GraphStore for testing.
//!
//! Keeps stops and connections in `tokio::sync::RwLock<Vec<_>>` collections
//! and mirrors the Cypher semantics the real client relies on: `DETACH
//! DELETE` empties both collections and relationship creation fails when an
//! endpoint is missing. Conditionally compiled with `#[cfg(test)]`.

use crate::neo4j::models::*;
use crate::neo4j::traits::GraphStore;
use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// In-memory mock implementation of GraphStore for testing.
pub struct MockGraphStore {
    pub bus_stops: RwLock<Vec<BusStop>>,
    pub connections: RwLock<Vec<Connection>>,

    /// When set, every read fails as if the database were unreachable
    pub fail_reads: AtomicBool,
    /// When set, every write fails as if the database were unreachable
    pub fail_writes: AtomicBool,
    /// Number of writes accepted before writes start failing
    pub write_budget: Option<usize>,
    /// Writes attempted so far (successful or not)
    pub writes: AtomicUsize,
}

impl MockGraphStore {
    /// Create a new empty MockGraphStore.
    pub fn new() -> Self {
        Self {
            bus_stops: RwLock::new(Vec::new()),
            connections: RwLock::new(Vec::new()),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            write_budget: None,
            writes: AtomicUsize::new(0),
        }
    }

    /// A store whose reads and writes all fail
    pub fn unreachable() -> Self {
        let store = Self::new();
        store.fail_reads.store(true, Ordering::SeqCst);
        store.fail_writes.store(true, Ordering::SeqCst);
        store
    }

    /// A store that accepts `budget` writes and fails every write after that
    pub fn with_write_budget(budget: usize) -> Self {
        Self {
            write_budget: Some(budget),
            ..Self::new()
        }
    }

    /// Pre-populate the store, bypassing write accounting
    pub async fn with_graph(self, stops: Vec<BusStop>, connections: Vec<Connection>) -> Self {
        *self.bus_stops.write().await = stops;
        *self.connections.write().await = connections;
        self
    }

    fn check_read(&self) -> Result<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            bail!("Neo4j connection refused: mock store is unreachable");
        }
        Ok(())
    }

    fn check_write(&self) -> Result<()> {
        let attempted = self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            bail!("Neo4j connection refused: mock store is unreachable");
        }
        if let Some(budget) = self.write_budget {
            if attempted >= budget {
                bail!("Mock write budget of {} exhausted", budget);
            }
        }
        Ok(())
    }
}

impl Default for MockGraphStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GraphStore for MockGraphStore {
    async fn clear_graph(&self) -> Result<()> {
        self.check_write()?;
        // Lock order matches get_graph_snapshot
        let mut stops = self.bus_stops.write().await;
        let mut connections = self.connections.write().await;
        stops.clear();
        connections.clear();
        Ok(())
    }

    async fn create_bus_stop(&self, stop: &BusStop) -> Result<()> {
        self.check_write()?;
        let mut stops = self.bus_stops.write().await;
        if stops.iter().any(|s| s.name == stop.name) {
            // Mirrors the uniqueness constraint on BusStop.name
            bail!("BusStop with name '{}' already exists", stop.name);
        }
        stops.push(stop.clone());
        Ok(())
    }

    async fn create_connection(&self, connection: &Connection) -> Result<()> {
        self.check_write()?;
        let stops = self.bus_stops.read().await;
        let has = |name: &str| stops.iter().any(|s| s.name == name);
        if !has(connection.from.as_str()) || !has(connection.to.as_str()) {
            return Err(anyhow!(
                "Connection {} -> {} references a missing bus stop",
                connection.from,
                connection.to
            ));
        }
        self.connections.write().await.push(connection.clone());
        Ok(())
    }

    async fn list_bus_stops(&self) -> Result<Vec<BusStop>> {
        self.check_read()?;
        Ok(self.bus_stops.read().await.clone())
    }

    async fn list_connections(&self) -> Result<Vec<Connection>> {
        self.check_read()?;
        Ok(self.connections.read().await.clone())
    }

    async fn get_graph_snapshot(&self) -> Result<GraphSnapshot> {
        self.check_read()?;
        // Both guards held together, like the single read transaction
        let stops = self.bus_stops.read().await;
        let connections = self.connections.read().await;
        Ok(GraphSnapshot {
            bus_stops: stops.clone(),
            connections: connections.clone(),
        })
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(!self.fail_reads.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connection_requires_both_endpoints() {
        let store = MockGraphStore::new();
        store.create_bus_stop(&BusStop::new("A")).await.unwrap();

        let err = store
            .create_connection(&Connection::new("A", "Z", 1.0))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("missing bus stop"));
        assert!(store.connections.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_clear_graph_removes_everything() {
        let store = MockGraphStore::new()
            .with_graph(
                vec![BusStop::new("X"), BusStop::new("Y")],
                vec![Connection::new("X", "Y", 3.5)],
            )
            .await;

        store.clear_graph().await.unwrap();
        let snapshot = store.get_graph_snapshot().await.unwrap();
        assert!(snapshot.is_empty());
    }

    #[tokio::test]
    async fn test_write_budget() {
        let store = MockGraphStore::with_write_budget(1);
        store.create_bus_stop(&BusStop::new("A")).await.unwrap();
        assert!(store.create_bus_stop(&BusStop::new("B")).await.is_err());
        assert_eq!(store.writes.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_unreachable_store() {
        let store = MockGraphStore::unreachable();
        assert!(store.get_graph_snapshot().await.is_err());
        assert!(store.clear_graph().await.is_err());
        assert!(!store.health_check().await.unwrap());
    }
}
