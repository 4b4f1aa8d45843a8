//! # WHOIS Lookup Core
//!
//! Validates lookup requests, fetches a record from the hosted WHOIS API
//! through a [`WhoisProvider`], and reshapes it into a [`DomainSummary`] or a
//! [`ContactSummary`].
//!
//! [`lookup`] is a plain async function of the request and a provider
//! capability. It holds no state, so the gateway and tests can drive it
//! with any provider implementation.

mod error;
mod provider;
mod record;
mod types;

pub use error::{LookupError, ProviderError};
pub use provider::{HttpWhoisProvider, ProviderSettings, WhoisProvider};
pub use record::{
    join_hostnames, normalize, truncate_hostname, ContactRecord, ErrorDescriptor, NameServers,
    ProviderResponse, WhoisRecord, HOSTNAME_DISPLAY_LIMIT,
};
pub use types::{
    ContactSummary, DomainSummary, LookupPayload, LookupRequest, LookupType, Summary,
};

use tracing::{debug, warn};

/// Run one lookup: a single provider call followed by normalization.
pub async fn lookup(
    request: &LookupRequest,
    provider: &dyn WhoisProvider,
) -> Result<Summary, LookupError> {
    debug!(
        domain = %request.domain(),
        lookup_type = %request.lookup_type(),
        "fetching whois record"
    );

    let response = provider
        .fetch_record(request.domain())
        .await
        .map_err(|error| {
            warn!(domain = %request.domain(), %error, "whois provider call failed");
            LookupError::from(error)
        })?;

    normalize(request, response)
}
