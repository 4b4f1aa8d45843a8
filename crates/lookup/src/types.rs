//! Request and summary shapes exchanged with callers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::LookupError;

/// Which summary the caller wants back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LookupType {
    #[default]
    Domain,
    Contact,
}

impl LookupType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Contact => "contact",
        }
    }

    /// Heading used when presenting results of this type.
    pub fn label(self) -> &'static str {
        match self {
            Self::Domain => "Domain Info",
            Self::Contact => "Contact Info",
        }
    }
}

impl fmt::Display for LookupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LookupType {
    type Err = LookupError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "domain" => Ok(Self::Domain),
            "contact" => Ok(Self::Contact),
            other => Err(LookupError::invalid_input(format!(
                "unsupported lookup type {other:?}"
            ))),
        }
    }
}

/// Raw inbound body of `POST /api/whois`, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct LookupPayload {
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default, rename = "type")]
    #[schema(example = "domain")]
    pub lookup_type: Option<String>,
}

/// A validated lookup: non-empty domain and a known type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    domain: String,
    lookup_type: LookupType,
}

impl LookupRequest {
    pub fn new(domain: impl Into<String>, lookup_type: LookupType) -> Result<Self, LookupError> {
        let domain = domain.into();
        let trimmed = domain.trim();
        if trimmed.is_empty() {
            return Err(LookupError::invalid_input("domain is empty"));
        }

        Ok(Self {
            domain: trimmed.to_string(),
            lookup_type,
        })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn lookup_type(&self) -> LookupType {
        self.lookup_type
    }
}

impl TryFrom<LookupPayload> for LookupRequest {
    type Error = LookupError;

    fn try_from(payload: LookupPayload) -> Result<Self, Self::Error> {
        let domain = payload
            .domain
            .ok_or_else(|| LookupError::invalid_input("domain is missing"))?;
        let lookup_type = payload
            .lookup_type
            .ok_or_else(|| LookupError::invalid_input("type is missing"))?
            .parse::<LookupType>()?;

        Self::new(domain, lookup_type)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DomainSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registrar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_domain_age: Option<i64>,
    /// Nameserver hostnames, each truncated for display, joined by `", "`.
    pub hostnames: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registrant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical_contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
}

/// Successful lookup result. Serialized without a tag so the wire body is
/// exactly the inner summary object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum Summary {
    Domain(DomainSummary),
    Contact(ContactSummary),
}

impl Summary {
    pub fn lookup_type(&self) -> LookupType {
        match self {
            Self::Domain(_) => LookupType::Domain,
            Self::Contact(_) => LookupType::Contact,
        }
    }
}
