use axum::{routing::get, Router};

use crate::handlers;

/// Application route table
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // Stats table handlers
        .route("/api/stats/table", get(handlers::stats::get_table))
        .route("/api/stats/table/csv", get(handlers::stats::export_csv))
        .route("/api/stats/groups", get(handlers::stats::list_groups))
}
