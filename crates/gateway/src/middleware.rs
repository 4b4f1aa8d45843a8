//! Cross-cutting request handling: origin allow-listing, CORS headers, and
//! request logging.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE, ORIGIN},
        HeaderValue, Method,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

use crate::error::ApiError;

/// Origins permitted to call the API from a browser.
#[derive(Debug, Clone, Default)]
pub struct OriginAllowList {
    origins: Arc<[HeaderValue]>,
}

impl OriginAllowList {
    pub fn new<S: AsRef<str>>(origins: &[S]) -> Self {
        let origins = origins
            .iter()
            .filter_map(|origin| {
                let trimmed = origin.as_ref().trim().trim_end_matches('/');
                // tower-http refuses a wildcard inside an origin list
                match HeaderValue::from_str(trimmed) {
                    Ok(value) if !trimmed.is_empty() && trimmed != "*" => Some(value),
                    _ => {
                        warn!(origin = origin.as_ref(), "ignoring unusable allowed origin");
                        None
                    }
                }
            })
            .collect::<Vec<_>>();

        Self {
            origins: origins.into(),
        }
    }

    pub fn is_allowed(&self, origin: &HeaderValue) -> bool {
        self.origins.iter().any(|allowed| allowed == origin)
    }

    pub fn origins(&self) -> &[HeaderValue] {
        &self.origins
    }
}

/// Reject any request whose `Origin` is not on the allow-list. Requests
/// without an `Origin` header (curl, server-to-server) pass through.
pub async fn origin_guard(
    State(allow_list): State<OriginAllowList>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(origin) = request.headers().get(ORIGIN) {
        if !allow_list.is_allowed(origin) {
            warn!(
                origin = ?origin,
                method = %request.method(),
                uri = %request.uri(),
                "rejecting request from disallowed origin"
            );
            return ApiError::forbidden("Not allowed by CORS").into_response();
        }
    }

    next.run(request).await
}

pub fn cors_layer(allow_list: &OriginAllowList, allow_credentials: bool) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allow_list.origins().iter().cloned()))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(allow_credentials)
}

/// Logging middleware for request/response logging
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let start = Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed();

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %response.status(),
        duration_ms = duration.as_millis(),
        "Request completed"
    );

    response
}
