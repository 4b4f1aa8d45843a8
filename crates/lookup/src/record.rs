//! Provider payload as it arrives on the wire, and its projection onto the
//! two summary shapes.
//!
//! Every field is optional at the deserialization layer. Which absences are
//! tolerated and which are contract violations is decided in [`normalize`].

use serde::Deserialize;
use tracing::debug;

use crate::types::{ContactSummary, DomainSummary, LookupRequest, LookupType, Summary};
use crate::LookupError;

/// Hostnames longer than this many characters are cut for display.
pub const HOSTNAME_DISPLAY_LIMIT: usize = 25;
const TRUNCATION_MARKER: &str = "...";
const HOSTNAME_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderResponse {
    #[serde(default, rename = "ErrorMessage")]
    pub error_message: Option<ErrorDescriptor>,
    #[serde(default, rename = "WhoisRecord")]
    pub whois_record: Option<WhoisRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDescriptor {
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoisRecord {
    #[serde(default)]
    pub domain_name: Option<String>,
    #[serde(default)]
    pub registrar_name: Option<String>,
    #[serde(default)]
    pub created_date: Option<String>,
    #[serde(default)]
    pub expires_date: Option<String>,
    #[serde(default)]
    pub estimated_domain_age: Option<i64>,
    #[serde(default)]
    pub name_servers: Option<NameServers>,
    #[serde(default)]
    pub registrant: Option<ContactRecord>,
    #[serde(default)]
    pub technical_contact: Option<ContactRecord>,
    #[serde(default)]
    pub administrative_contact: Option<ContactRecord>,
    #[serde(default)]
    pub contact_email: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameServers {
    #[serde(default)]
    pub host_names: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactRecord {
    #[serde(default)]
    pub organization: Option<String>,
}

/// Shorten a hostname to [`HOSTNAME_DISPLAY_LIMIT`] characters plus `"..."`.
///
/// Length is counted in characters, so multi-byte labels are never split.
///
/// ```
/// use whois_lookup_core::truncate_hostname;
///
/// assert_eq!(truncate_hostname("ns1.example.com"), "ns1.example.com");
/// assert_eq!(
///     truncate_hostname("a-very-long-nameserver-hostname.example.com"),
///     "a-very-long-nameserver-ho...",
/// );
/// ```
pub fn truncate_hostname(hostname: &str) -> String {
    match hostname.char_indices().nth(HOSTNAME_DISPLAY_LIMIT) {
        Some((cut, _)) => format!("{}{TRUNCATION_MARKER}", &hostname[..cut]),
        None => hostname.to_string(),
    }
}

pub fn join_hostnames<S: AsRef<str>>(hostnames: &[S]) -> String {
    hostnames
        .iter()
        .map(|hostname| truncate_hostname(hostname.as_ref()))
        .collect::<Vec<_>>()
        .join(HOSTNAME_SEPARATOR)
}

/// Map a provider payload onto the summary requested by `request`.
///
/// An error descriptor wins over everything else; no field projection is
/// attempted once one is present.
pub fn normalize(request: &LookupRequest, response: ProviderResponse) -> Result<Summary, LookupError> {
    if let Some(descriptor) = response.error_message {
        debug!(code = ?descriptor.error_code, "provider returned an error descriptor");
        return match descriptor.msg {
            Some(message) => Err(LookupError::UpstreamRejected(message)),
            None => Err(LookupError::malformed("error descriptor without a message")),
        };
    }

    let record = response
        .whois_record
        .ok_or_else(|| LookupError::malformed("WhoisRecord is missing"))?;

    match request.lookup_type() {
        LookupType::Domain => domain_summary(record).map(Summary::Domain),
        LookupType::Contact => contact_summary(record).map(Summary::Contact),
    }
}

fn domain_summary(record: WhoisRecord) -> Result<DomainSummary, LookupError> {
    let hostnames = record
        .name_servers
        .ok_or_else(|| LookupError::malformed("WhoisRecord.nameServers is missing"))?
        .host_names
        .ok_or_else(|| LookupError::malformed("WhoisRecord.nameServers.hostNames is missing"))?;

    Ok(DomainSummary {
        domain_name: record.domain_name,
        registrar: record.registrar_name,
        created_date: record.created_date,
        expires_date: record.expires_date,
        estimated_domain_age: record.estimated_domain_age,
        hostnames: join_hostnames(&hostnames),
    })
}

fn contact_summary(record: WhoisRecord) -> Result<ContactSummary, LookupError> {
    let registrant = require_contact(record.registrant, "registrant")?;
    let technical = require_contact(record.technical_contact, "technicalContact")?;
    let administrative = require_contact(record.administrative_contact, "administrativeContact")?;

    Ok(ContactSummary {
        registrant: registrant.organization,
        technical_contact: technical.organization,
        admin_contact: administrative.organization,
        contact_email: record.contact_email,
    })
}

fn require_contact(contact: Option<ContactRecord>, field: &str) -> Result<ContactRecord, LookupError> {
    contact.ok_or_else(|| LookupError::malformed(format!("WhoisRecord.{field} is missing")))
}
