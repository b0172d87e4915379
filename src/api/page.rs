//! Visualization page.
//!
//! Serves the embedded vis-network page that fetches `/graph` and draws it.

use axum::response::{Html, IntoResponse};

const INDEX_HTML: &str = include_str!("index.html");

/// GET / - Serve the network visualization page.
pub async fn index() -> impl IntoResponse {
    Html(INDEX_HTML)
}
