use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "whois-lookup.toml",
    "config/whois-lookup.toml",
    "crates/config/whois-lookup.toml",
];

/// Environment variable consulted for the provider credential when the
/// configuration itself does not carry one.
pub const API_KEY_ENV: &str = "WHOIS_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub http: HttpConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

/// Settings for the hosted WHOIS JSON API.
///
/// ```
/// use whois_lookup_config::ProviderConfig;
///
/// let provider = ProviderConfig::default();
/// assert_eq!(provider.base_url, "https://www.whoisxmlapi.com/whoisserver/WhoisService");
/// assert!(provider.request_timeout_seconds.is_none());
/// assert!(provider.api_key.is_none());
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "ProviderConfig::default_base_url")]
    pub base_url: String,
    /// Unset means the outbound call carries no explicit timeout.
    #[serde(default)]
    pub request_timeout_seconds: Option<u64>,
}

impl ProviderConfig {
    fn default_base_url() -> String {
        "https://www.whoisxmlapi.com/whoisserver/WhoisService".to_string()
    }

    /// Credential from the configuration, falling back to `WHOIS_API_KEY`.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: Self::default_base_url(),
            request_timeout_seconds: None,
        }
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "CorsConfig::default_allowed_origins")]
    pub allowed_origins: Vec<String>,
    #[serde(default = "CorsConfig::default_allow_credentials")]
    pub allow_credentials: bool,
}

impl CorsConfig {
    fn default_allowed_origins() -> Vec<String> {
        vec!["http://localhost:3000".to_string()]
    }

    const fn default_allow_credentials() -> bool {
        true
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Self::default_allowed_origins(),
            allow_credentials: Self::default_allow_credentials(),
        }
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use whois_lookup_config::load;
///
/// std::env::remove_var("WHOIS_LOOKUP_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.http.address.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let mut builder = config::Config::builder()
        .set_default("http.address", defaults.http.address.clone())?
        .set_default("http.port", i64::from(defaults.http.port))?
        .set_default("provider.base_url", defaults.provider.base_url.clone())?
        .set_default("cors.allowed_origins", defaults.cors.allowed_origins.clone())?
        .set_default("cors.allow_credentials", defaults.cors.allow_credentials)?;

    let environment_overrides = config::Environment::with_prefix("WHOIS_LOOKUP")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("cors.allowed_origins")
        .try_parsing(true);

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("WHOIS_LOOKUP_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via WHOIS_LOOKUP_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    debug!(?config, "loaded service configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_debug_output_redacts_api_key() {
        let provider = ProviderConfig {
            api_key: Some("at_supersecret".to_string()),
            ..ProviderConfig::default()
        };

        let rendered = format!("{provider:?}");
        assert!(!rendered.contains("at_supersecret"));
        assert!(rendered.contains("<redacted>"));
    }
}
