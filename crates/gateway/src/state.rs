//! Shared application state for the gateway

use std::sync::Arc;

use whois_lookup_core::WhoisProvider;

/// Per-router state. Cloned into every request; holds no mutable data.
#[derive(Clone)]
pub struct AppState {
    provider: Arc<dyn WhoisProvider>,
}

impl AppState {
    pub fn new(provider: Arc<dyn WhoisProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &dyn WhoisProvider {
        self.provider.as_ref()
    }
}
