use axum::Json;
use utoipa::OpenApi;
use whois_lookup_core::{ContactSummary, DomainSummary, LookupPayload, LookupType, Summary};

use crate::error::ErrorResponse;
use crate::rest;

#[derive(OpenApi)]
#[openapi(
    paths(rest::health::health_check, rest::whois::lookup_whois),
    components(schemas(
        rest::health::HealthResponse,
        ErrorResponse,
        LookupPayload,
        LookupType,
        DomainSummary,
        ContactSummary,
        Summary
    )),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Whois", description = "Domain and contact lookups")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
