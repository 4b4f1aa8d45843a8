//! Plain-text tables for the two summary shapes.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use whois_lookup_core::{ContactSummary, DomainSummary};

const DOMAIN_COLUMNS: [&str; 6] = [
    "Domain Name",
    "Registrar",
    "Registration Date",
    "Expiration Date",
    "Estimated Domain Age",
    "Hostnames",
];

const CONTACT_COLUMNS: [&str; 4] = [
    "Registrant Name",
    "Technical Contact Name",
    "Administrative Contact Name",
    "Contact Email",
];

/// Render a provider date as e.g. `January 5, 2024`.
///
/// Absent or blank input renders as an empty string. Input in a format that
/// cannot be read is shown unchanged.
///
/// ```
/// use whois_lookup_client::format_long_date;
///
/// assert_eq!(format_long_date(Some("2024-01-05T00:00:00Z")), "January 5, 2024");
/// assert_eq!(format_long_date(None), "");
/// ```
pub fn format_long_date(value: Option<&str>) -> String {
    let raw = match value.map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return String::new(),
    };

    match parse_date(raw) {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc).date_naive());
    }
    // provider records often carry offsets without a colon, e.g. +0000
    if let Ok(timestamp) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z") {
        return Some(timestamp.with_timezone(&Utc).date_naive());
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S UTC") {
        return Some(timestamp.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

pub fn domain_table(summary: &DomainSummary) -> String {
    let row = [
        summary.domain_name.clone().unwrap_or_default(),
        summary.registrar.clone().unwrap_or_default(),
        format_long_date(summary.created_date.as_deref()),
        format_long_date(summary.expires_date.as_deref()),
        summary
            .estimated_domain_age
            .map(|age| age.to_string())
            .unwrap_or_default(),
        summary.hostnames.clone(),
    ];
    table(&DOMAIN_COLUMNS, &row)
}

pub fn contact_table(summary: &ContactSummary) -> String {
    let row = [
        summary.registrant.clone().unwrap_or_default(),
        summary.technical_contact.clone().unwrap_or_default(),
        summary.admin_contact.clone().unwrap_or_default(),
        summary.contact_email.clone().unwrap_or_default(),
    ];
    table(&CONTACT_COLUMNS, &row)
}

fn table(headers: &[&str], row: &[String]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .zip(row)
        .map(|(header, cell)| header.chars().count().max(cell.chars().count()))
        .collect();

    let header_line = line(headers.iter().copied(), &widths);
    let separator = widths
        .iter()
        .map(|width| "-".repeat(width + 2))
        .collect::<Vec<_>>()
        .join("+");
    let row_line = line(row.iter().map(String::as_str), &widths);

    format!("{header_line}\n+{separator}+\n{row_line}")
}

fn line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let cells = cells
        .zip(widths)
        .map(|(cell, width)| format!(" {cell:<width$} "))
        .collect::<Vec<_>>()
        .join("|");
    format!("|{cells}|")
}
