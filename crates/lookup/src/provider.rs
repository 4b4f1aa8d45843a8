//! Capability for reaching the hosted WHOIS API, and its reqwest-backed
//! implementation.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::record::ProviderResponse;
use crate::ProviderError;

/// Anything that can fetch a raw provider record for a domain.
#[async_trait]
pub trait WhoisProvider: Send + Sync {
    async fn fetch_record(&self, domain: &str) -> Result<ProviderResponse, ProviderError>;
}

#[derive(Clone)]
pub struct ProviderSettings {
    pub api_key: String,
    pub base_url: String,
    /// `None` leaves the outbound call without an explicit timeout.
    pub request_timeout: Option<Duration>,
}

impl ProviderSettings {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            request_timeout: None,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Single-attempt client for the `WhoisService` JSON endpoint.
pub struct HttpWhoisProvider {
    client: Client,
    settings: ProviderSettings,
}

impl HttpWhoisProvider {
    pub fn new(settings: ProviderSettings) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            settings,
        })
    }

    pub fn settings(&self) -> &ProviderSettings {
        &self.settings
    }
}

#[async_trait]
impl WhoisProvider for HttpWhoisProvider {
    async fn fetch_record(&self, domain: &str) -> Result<ProviderResponse, ProviderError> {
        debug!(%domain, base_url = %self.settings.base_url, "requesting whois record");

        let response = self
            .client
            .get(&self.settings.base_url)
            .query(&[
                ("apiKey", self.settings.api_key.as_str()),
                ("domainName", domain),
                ("outputFormat", "JSON"),
            ])
            .send()
            .await
            .map_err(ProviderError::from_transport)?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(ProviderError::from_transport)?;

        match serde_json::from_slice::<ProviderResponse>(&body) {
            Ok(parsed) if status.is_success() || parsed.error_message.is_some() => Ok(parsed),
            Ok(_) => {
                warn!(status = status.as_u16(), "provider returned a non-success status");
                Err(ProviderError::Status(status.as_u16()))
            }
            Err(error) if status.is_success() => Err(ProviderError::Decode(error.to_string())),
            Err(_) => {
                warn!(status = status.as_u16(), "provider returned a non-success status");
                Err(ProviderError::Status(status.as_u16()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_debug_output_redacts_api_key() {
        let settings = ProviderSettings::new("at_secret", "https://whois.test/WhoisService");
        let rendered = format!("{settings:?}");
        assert!(!rendered.contains("at_secret"));
        assert!(rendered.contains("whois.test"));
    }

    #[test]
    fn timeout_defaults_to_none() {
        let settings = ProviderSettings::new("key", "https://whois.test");
        assert!(settings.request_timeout.is_none());

        let settings = settings.with_request_timeout(Some(Duration::from_secs(3)));
        assert_eq!(settings.request_timeout, Some(Duration::from_secs(3)));
    }
}
