use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::{debug, info};
use whois_lookup_core::{lookup, LookupError, LookupPayload, LookupRequest, Summary};

use crate::error::{ApiError, ErrorResponse};
use crate::state::AppState;

/// Look up a domain through the hosted WHOIS service.
///
/// An unreadable body is treated the same as a payload with missing fields,
/// so the caller always gets the `{ "error": ... }` shape back.
#[utoipa::path(
    post,
    path = "/api/whois",
    tag = "Whois",
    request_body = LookupPayload,
    responses(
        (status = 200, description = "Projected WHOIS record", body = Summary),
        (status = 400, description = "Invalid input or provider rejection", body = ErrorResponse),
        (status = 500, description = "Provider failure", body = ErrorResponse),
        (status = 503, description = "Provider unreachable", body = ErrorResponse)
    )
)]
pub async fn lookup_whois(
    State(state): State<AppState>,
    payload: Result<Json<LookupPayload>, JsonRejection>,
) -> Result<Json<Summary>, ApiError> {
    let Json(payload) = payload.map_err(|rejection| {
        debug!(reason = %rejection.body_text(), "unreadable lookup body");
        LookupError::invalid_input(rejection.body_text())
    })?;

    let request = LookupRequest::try_from(payload)?;
    let summary = lookup(&request, state.provider()).await?;

    info!(
        domain = %request.domain(),
        lookup_type = %request.lookup_type(),
        "whois lookup completed"
    );

    Ok(Json(summary))
}
