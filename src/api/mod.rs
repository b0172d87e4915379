//! HTTP API for the bus stop graph

pub mod handlers;
pub mod page;
pub mod routes;

pub use handlers::{ApiState, ServerState};
pub use routes::create_router;
