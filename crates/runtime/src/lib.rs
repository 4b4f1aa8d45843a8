use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;
use whois_lookup_config::{AppConfig, API_KEY_ENV};
use whois_lookup_core::{HttpWhoisProvider, ProviderSettings};

pub mod telemetry {
    use anyhow::Result;
    use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

    pub fn init_tracing() -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = SubscriberBuilder::default()
            .with_env_filter(env_filter)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

/// Long-lived collaborators shared by the server and the one-shot CLI.
#[derive(Clone)]
pub struct LookupServices {
    pub provider: Arc<HttpWhoisProvider>,
}

impl LookupServices {
    pub fn initialise(config: &AppConfig) -> Result<Self> {
        let api_key = config.provider.resolve_api_key().with_context(|| {
            format!(
                "no WHOIS API key configured; set provider.api_key or the {API_KEY_ENV} environment variable"
            )
        })?;

        let settings = ProviderSettings::new(api_key, config.provider.base_url.clone())
            .with_request_timeout(
                config
                    .provider
                    .request_timeout_seconds
                    .map(Duration::from_secs),
            );

        let provider =
            HttpWhoisProvider::new(settings).context("failed to build whois http client")?;

        info!(
            base_url = %config.provider.base_url,
            timeout_seconds = ?config.provider.request_timeout_seconds,
            "whois provider ready"
        );

        Ok(Self {
            provider: Arc::new(provider),
        })
    }
}

pub async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(?error, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
