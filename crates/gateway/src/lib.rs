//! # WHOIS Lookup Gateway
//!
//! HTTP surface for the lookup service. Exposes `POST /api/whois`, a health
//! probe and the generated OpenAPI document, behind an origin allow-list.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use whois_lookup_config::CorsConfig;
//! use whois_lookup_core::{HttpWhoisProvider, ProviderSettings};
//! use whois_lookup_gateway::{build_router, AppState};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let provider = HttpWhoisProvider::new(ProviderSettings::new(
//!     "at_key",
//!     "https://www.whoisxmlapi.com/whoisserver/WhoisService",
//! ))?;
//! let app = build_router(AppState::new(Arc::new(provider)), &CorsConfig::default());
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:5000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod docs;
pub mod error;
pub mod middleware;
pub mod rest;
pub mod state;

pub use docs::ApiDoc;
pub use error::{ApiError, ErrorResponse};
pub use middleware::OriginAllowList;
pub use state::AppState;

use axum::{middleware as axum_middleware, routing::get, Router};
use whois_lookup_config::CorsConfig;

/// Build the application router.
///
/// Layer order, outermost first: request logging, origin guard, CORS headers.
/// A disallowed origin is answered with 403 before any handler runs.
pub fn build_router(state: AppState, cors: &CorsConfig) -> Router {
    let allow_list = OriginAllowList::new(cors.allowed_origins.as_slice());

    rest::create_rest_routes()
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        .with_state(state)
        .layer(middleware::cors_layer(&allow_list, cors.allow_credentials))
        .layer(axum_middleware::from_fn_with_state(
            allow_list,
            middleware::origin_guard,
        ))
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
}
