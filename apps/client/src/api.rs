//! HTTP client for the gateway's lookup endpoint.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};
use whois_lookup_core::{ContactSummary, DomainSummary, LookupPayload, LookupType, Summary};

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

const INVALID_REQUEST_MESSAGE: &str = "Invalid request. Please check your input.";
const SERVER_ERROR_MESSAGE: &str = "Server error. Please try again later.";
const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// A failed lookup. `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("{message}")]
    Response { status: u16, message: String },
    #[error("An unexpected error occurred")]
    Transport { detail: String },
    #[error("An unexpected error occurred")]
    Decode { detail: String },
}

impl ClientError {
    /// Pick the user-facing message for a non-success response.
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        let server_message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|body| body.error)
            .filter(|message| !message.is_empty());

        let message = if status == StatusCode::BAD_REQUEST {
            server_message.unwrap_or_else(|| INVALID_REQUEST_MESSAGE.to_string())
        } else if status == StatusCode::INTERNAL_SERVER_ERROR {
            SERVER_ERROR_MESSAGE.to_string()
        } else {
            server_message.unwrap_or_else(|| UNEXPECTED_ERROR_MESSAGE.to_string())
        };

        Self::Response {
            status: status.as_u16(),
            message,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Response { status, .. } => Some(*status),
            Self::Transport { .. } | Self::Decode { .. } => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit one lookup. The success body is decoded as the shape matching
    /// the requested type.
    pub async fn lookup(
        &self,
        domain: &str,
        lookup_type: LookupType,
    ) -> Result<Summary, ClientError> {
        debug!(%domain, %lookup_type, base_url = %self.base_url, "submitting lookup");

        let payload = LookupPayload {
            domain: Some(domain.to_string()),
            lookup_type: Some(lookup_type.as_str().to_string()),
        };

        let response = self
            .client
            .post(format!("{}/api/whois", self.base_url))
            .json(&payload)
            .send()
            .await
            .map_err(|error| {
                warn!(%error, "lookup request failed before a response arrived");
                ClientError::Transport {
                    detail: error.to_string(),
                }
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|error| ClientError::Transport {
            detail: error.to_string(),
        })?;

        if !status.is_success() {
            let error = ClientError::from_response(status, &body);
            debug!(%status, message = %error, "lookup rejected by gateway");
            return Err(error);
        }

        let decoded = match lookup_type {
            LookupType::Domain => serde_json::from_slice::<DomainSummary>(&body).map(Summary::Domain),
            LookupType::Contact => {
                serde_json::from_slice::<ContactSummary>(&body).map(Summary::Contact)
            }
        };

        decoded.map_err(|error| ClientError::Decode {
            detail: error.to_string(),
        })
    }
}
