use thiserror::Error;

/// Outcome taxonomy for a single lookup. Every variant is terminal for the
/// request; nothing is retried.
///
/// `Display` yields the short message shown to the end user. Diagnostic
/// detail that must not leak to callers lives in the `detail` fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Invalid domain or type")]
    InvalidInput { reason: String },

    /// Provider answered with its own error descriptor; message is verbatim.
    #[error("{0}")]
    UpstreamRejected(String),

    #[error("Service unavailable. Please try again later.")]
    ServiceUnavailable { detail: String },

    #[error("Network error occurred while connecting to Whois API. Please try again later.")]
    NetworkError { detail: String },

    #[error("Failed to fetch data from Whois API")]
    UpstreamMalformed { detail: String },
}

impl LookupError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::UpstreamMalformed {
            detail: detail.into(),
        }
    }

    /// Stable identifier used in logs and metrics labels.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "invalid_input",
            Self::UpstreamRejected(_) => "upstream_rejected",
            Self::ServiceUnavailable { .. } => "service_unavailable",
            Self::NetworkError { .. } => "network_error",
            Self::UpstreamMalformed { .. } => "upstream_malformed",
        }
    }

    /// Internal detail for logging; falls back to the user message.
    pub fn detail(&self) -> String {
        match self {
            Self::InvalidInput { reason } => reason.clone(),
            Self::ServiceUnavailable { detail }
            | Self::NetworkError { detail }
            | Self::UpstreamMalformed { detail } => detail.clone(),
            Self::UpstreamRejected(message) => message.clone(),
        }
    }
}

/// Transport-level failures reported by a [`crate::WhoisProvider`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("connection refused by provider: {0}")]
    ConnectionRefused(String),
    #[error("provider transport failure: {0}")]
    Transport(String),
    #[error("provider responded with HTTP status {0}")]
    Status(u16),
    #[error("provider response is not valid JSON: {0}")]
    Decode(String),
}

impl ProviderError {
    /// Classify a reqwest failure, separating connection refusal from every
    /// other transport fault.
    pub fn from_transport(error: reqwest::Error) -> Self {
        if is_connection_refused(&error) {
            Self::ConnectionRefused(error.to_string())
        } else {
            Self::Transport(error.to_string())
        }
    }
}

impl From<ProviderError> for LookupError {
    fn from(error: ProviderError) -> Self {
        match error {
            ProviderError::ConnectionRefused(detail) => Self::ServiceUnavailable { detail },
            ProviderError::Transport(detail) => Self::NetworkError { detail },
            ProviderError::Status(status) => Self::NetworkError {
                detail: format!("provider responded with HTTP status {status}"),
            },
            ProviderError::Decode(detail) => Self::UpstreamMalformed { detail },
        }
    }
}

fn is_connection_refused(error: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(error);
    while let Some(err) = current {
        if let Some(io) = err.downcast_ref::<std::io::Error>() {
            if io.kind() == std::io::ErrorKind::ConnectionRefused {
                return true;
            }
        }
        current = err.source();
    }
    false
}
