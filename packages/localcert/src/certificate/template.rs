//! Certificate template helpers
//!
//! Small builders shared by the CA and server issuers: subject names,
//! validity windows, DNS SAN entries and fixed serial numbers.

use rcgen::{DistinguishedName, DnType, SanType, SerialNumber};
use time::{Duration, OffsetDateTime};

use crate::error::{PkiError, Result, Role};

/// Build a subject with an organization and a common name
pub(crate) fn distinguished_name(organization: &str, common_name: &str) -> DistinguishedName {
    let mut distinguished_name = DistinguishedName::new();
    distinguished_name.push(DnType::OrganizationName, organization);
    distinguished_name.push(DnType::CommonName, common_name);
    distinguished_name
}

/// Validity window starting now and ending `years` calendar years later
///
/// A start on Feb 29 whose end year is not a leap year ends on Mar 1.
pub(crate) fn validity_window(years: u16, role: Role) -> Result<(OffsetDateTime, OffsetDateTime)> {
    let not_before = OffsetDateTime::now_utc();
    let not_after = add_years(not_before, years).map_err(|source| PkiError::Validity { role, source })?;
    Ok((not_before, not_after))
}

fn add_years(
    start: OffsetDateTime,
    years: u16,
) -> std::result::Result<OffsetDateTime, time::error::ComponentRange> {
    let year = start.year() + i32::from(years);
    match start.replace_year(year) {
        Ok(end) => Ok(end),
        // Feb 29 into a common year
        Err(_) => (start - Duration::DAY)
            .replace_year(year)
            .map(|end| end + Duration::DAY),
    }
}

/// Every SAN as a dNSName entry, in the order supplied
pub(crate) fn dns_san_entries(sans: &[String]) -> Result<Vec<SanType>> {
    sans.iter()
        .map(|name| {
            name.clone()
                .try_into()
                .map(SanType::DnsName)
                .map_err(|source| PkiError::InvalidDnsName {
                    name: name.clone(),
                    source,
                })
        })
        .collect()
}

/// Minimal big-endian encoding of a fixed serial number
pub(crate) fn serial_number(serial: u64) -> SerialNumber {
    let bytes = serial.to_be_bytes();
    let start = bytes
        .iter()
        .position(|b| *b != 0)
        .unwrap_or(bytes.len() - 1);
    SerialNumber::from_slice(&bytes[start..])
}
