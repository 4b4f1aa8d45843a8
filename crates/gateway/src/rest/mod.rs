//! REST API endpoints for the gateway

pub mod health;
pub mod whois;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn create_rest_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/whois", post(whois::lookup_whois))
}

pub use health::*;
pub use whois::*;
