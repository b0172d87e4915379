//! Neo4j client for the bus stop network

use super::models::*;
use anyhow::{bail, Context, Result};
use neo4rs::{query, Graph, Query, Txn};
use std::sync::Arc;

/// Delete every node together with its relationships
const CLEAR_GRAPH: &str = "MATCH (n) DETACH DELETE n";

const CREATE_BUS_STOP: &str = "CREATE (s:BusStop {name: $name})";

const CREATE_CONNECTION: &str = r#"
    MATCH (a:BusStop {name: $from}), (b:BusStop {name: $to})
    CREATE (a)-[r:CONNECTED_TO {distance: $distance}]->(b)
    RETURN count(r) AS created
"#;

const LIST_BUS_STOPS: &str = "MATCH (n:BusStop) RETURN n.name AS name";

// toFloat keeps rows written with integer distances readable as f64
const LIST_CONNECTIONS: &str = r#"
    MATCH (a:BusStop)-[r:CONNECTED_TO]->(b:BusStop)
    RETURN a.name AS from, b.name AS to, toFloat(r.distance) AS distance
"#;

/// Client for Neo4j operations
pub struct Neo4jClient {
    graph: Arc<Graph>,
}

impl Neo4jClient {
    /// Create a new Neo4j client.
    ///
    /// neo4rs opens its pool lazily, so a `RETURN 1` ping runs before this
    /// returns. An unreachable database fails here rather than on the first
    /// request.
    pub async fn new(uri: &str, user: &str, password: &str) -> Result<Self> {
        let graph = Graph::new(uri, user, password)
            .await
            .context("Failed to connect to Neo4j")?;

        graph
            .run(query("RETURN 1"))
            .await
            .with_context(|| format!("Neo4j at {} is not responding to queries", uri))?;

        let client = Self {
            graph: Arc::new(graph),
        };

        // Initialize schema
        client.init_schema().await?;

        Ok(client)
    }

    /// Initialize the graph schema with constraints
    async fn init_schema(&self) -> Result<()> {
        let constraints = vec![
            "CREATE CONSTRAINT bus_stop_name IF NOT EXISTS FOR (s:BusStop) REQUIRE s.name IS UNIQUE",
        ];

        for constraint in constraints {
            if let Err(e) = self.graph.run(query(constraint)).await {
                tracing::warn!("Constraint may already exist: {}", e);
            }
        }

        Ok(())
    }

    /// Execute a raw Cypher query (internal use only)
    pub(crate) async fn execute(&self, cypher: &str) -> Result<Vec<neo4rs::Row>> {
        self.execute_with_params(query(cypher)).await
    }

    /// Execute a parameterized Cypher query (internal use only)
    pub(crate) async fn execute_with_params(&self, q: Query) -> Result<Vec<neo4rs::Row>> {
        let mut result = self.graph.execute(q).await?;
        let mut rows = Vec::new();
        while let Some(row) = result.next().await? {
            rows.push(row);
        }
        Ok(rows)
    }

    // ========================================================================
    // Write operations
    // ========================================================================

    /// Delete all nodes and relationships
    pub async fn clear_graph(&self) -> Result<()> {
        self.graph
            .run(query(CLEAR_GRAPH))
            .await
            .context("Failed to clear the graph")?;
        Ok(())
    }

    /// Create a bus stop node
    pub async fn create_bus_stop(&self, stop: &BusStop) -> Result<()> {
        let q = query(CREATE_BUS_STOP).param("name", stop.name.clone());
        self.graph
            .run(q)
            .await
            .with_context(|| format!("Failed to create bus stop '{}'", stop.name))?;
        Ok(())
    }

    /// Create a CONNECTED_TO relationship between two existing stops
    pub async fn create_connection(&self, connection: &Connection) -> Result<()> {
        let q = query(CREATE_CONNECTION)
            .param("from", connection.from.clone())
            .param("to", connection.to.clone())
            .param("distance", connection.distance);

        let rows = self.execute_with_params(q).await.with_context(|| {
            format!(
                "Failed to create connection {} -> {}",
                connection.from, connection.to
            )
        })?;

        let created: i64 = match rows.first() {
            Some(row) => row.get("created")?,
            None => 0,
        };
        if created == 0 {
            // MATCH found no endpoints, so CREATE never ran
            bail!(
                "Connection {} -> {} references a missing bus stop",
                connection.from,
                connection.to
            );
        }
        Ok(())
    }

    // ========================================================================
    // Read operations
    // ========================================================================

    /// List all bus stops
    pub async fn list_bus_stops(&self) -> Result<Vec<BusStop>> {
        let rows = self
            .execute(LIST_BUS_STOPS)
            .await
            .context("Failed to list bus stops")?;
        rows.iter().map(row_to_bus_stop).collect()
    }

    /// List all connections
    pub async fn list_connections(&self) -> Result<Vec<Connection>> {
        let rows = self
            .execute(LIST_CONNECTIONS)
            .await
            .context("Failed to list connections")?;
        rows.iter().map(row_to_connection).collect()
    }

    /// Read stops and connections inside a single transaction
    pub async fn get_graph_snapshot(&self) -> Result<GraphSnapshot> {
        let mut txn = self
            .graph
            .start_txn()
            .await
            .context("Failed to open a read transaction")?;

        match read_snapshot(&mut txn).await {
            Ok(snapshot) => {
                txn.commit()
                    .await
                    .context("Failed to close the read transaction")?;
                Ok(snapshot)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::warn!("Rollback after failed projection: {}", rollback_err);
                }
                Err(e)
            }
        }
    }

    /// Ping the database
    pub async fn health_check(&self) -> Result<bool> {
        match self.execute("RETURN 1 AS ping").await {
            Ok(_) => Ok(true),
            Err(_) => Ok(false),
        }
    }
}

async fn read_snapshot(txn: &mut Txn) -> Result<GraphSnapshot> {
    let mut bus_stops = Vec::new();
    let mut stream = txn
        .execute(query(LIST_BUS_STOPS))
        .await
        .context("Failed to list bus stops")?;
    while let Some(row) = stream.next(txn.handle()).await? {
        bus_stops.push(row_to_bus_stop(&row)?);
    }

    let mut connections = Vec::new();
    let mut stream = txn
        .execute(query(LIST_CONNECTIONS))
        .await
        .context("Failed to list connections")?;
    while let Some(row) = stream.next(txn.handle()).await? {
        connections.push(row_to_connection(&row)?);
    }

    Ok(GraphSnapshot {
        bus_stops,
        connections,
    })
}

fn row_to_bus_stop(row: &neo4rs::Row) -> Result<BusStop> {
    Ok(BusStop {
        name: row.get("name")?,
    })
}

fn row_to_connection(row: &neo4rs::Row) -> Result<Connection> {
    Ok(Connection {
        from: row.get("from")?,
        to: row.get("to")?,
        distance: row.get("distance")?,
    })
}
