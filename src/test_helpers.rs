//! Test helper factories and mock state builders
//!
//! Helpers for building mock AppState / ApiState instances backed by the
//! in-memory graph store.
#![allow(dead_code)]

use crate::api::{ApiState, ServerState};
use crate::neo4j::mock::MockGraphStore;
use crate::seed::{seed_graph, SeedNetwork};
use crate::{AppState, Config};
use std::sync::Arc;

// ============================================================================
// Mock state builders
// ============================================================================

/// Config pointing at a host that is never contacted
pub fn mock_config() -> Config {
    Config {
        neo4j_uri: "bolt://mock:7687".to_string(),
        neo4j_user: "neo4j".to_string(),
        neo4j_password: "mock".to_string(),
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        seed_on_start: true,
    }
}

/// Create a mock AppState around the given store
pub fn mock_app_state(store: MockGraphStore) -> AppState {
    AppState {
        neo4j: Arc::new(store),
        config: Arc::new(mock_config()),
    }
}

/// Create API state around the given store
pub fn mock_api_state(store: MockGraphStore) -> ApiState {
    ServerState::new(Arc::new(store))
}

/// A mock store holding the demo network, as it looks right after startup
pub async fn seeded_mock_store() -> MockGraphStore {
    let store = MockGraphStore::new();
    seed_graph(&store, &SeedNetwork::default_network())
        .await
        .expect("seeding the mock store should succeed");
    store
}

/// API state backed by a freshly seeded mock store
pub async fn seeded_api_state() -> ApiState {
    mock_api_state(seeded_mock_store().await)
}
