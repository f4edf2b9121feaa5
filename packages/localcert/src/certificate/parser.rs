//! Certificate inspection
//!
//! Parses an issued certificate back into an owned summary. The server issuer
//! uses it to recover the CA subject and public key; the CLI uses it to report
//! what is on disk.

use x509_parser::certificate::X509Certificate;
use x509_parser::extensions::GeneralName;

use crate::error::{PkiError, Result};

/// PEM label of an X.509 certificate
pub const CERTIFICATE_LABEL: &str = "CERTIFICATE";

/// Owned view of the fields this tool sets on a certificate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateSummary {
    /// Serial number as lowercase hex of its minimal big-endian bytes
    pub serial: String,
    /// Subject in RFC 4514 form
    pub subject: String,
    /// First subject common name, if any
    pub subject_common_name: Option<String>,
    /// Issuer in RFC 4514 form
    pub issuer: String,
    /// DER encoding of the subject name
    pub subject_raw: Vec<u8>,
    /// DER encoding of the issuer name
    pub issuer_raw: Vec<u8>,
    /// Basic constraints CA flag
    pub is_ca: bool,
    /// dNSName entries of the subject alternative name extension
    pub dns_names: Vec<String>,
    /// dNSName entries of the permitted name-constraint subtrees
    pub permitted_dns_domains: Vec<String>,
    /// Whether the name constraints extension is present and critical
    pub name_constraints_critical: bool,
    /// Key usage bits, by RFC 5280 name
    pub key_usage: Vec<&'static str>,
    /// Extended key usages, by RFC 5280 name or dotted OID
    pub extended_key_usage: Vec<String>,
    /// DER SubjectPublicKeyInfo
    pub public_key_der: Vec<u8>,
    /// Start of validity, unix seconds
    pub not_before: i64,
    /// End of validity, unix seconds
    pub not_after: i64,
}

impl CertificateSummary {
    /// Parse a single PEM `CERTIFICATE` block
    ///
    /// # Errors
    ///
    /// Returns `CertificateParse` for malformed PEM, a different label or
    /// malformed DER.
    pub fn from_pem(text: &str) -> Result<Self> {
        let block =
            pem::parse(text).map_err(|e| PkiError::CertificateParse(format!("invalid PEM: {e}")))?;
        if block.tag() != CERTIFICATE_LABEL {
            return Err(PkiError::CertificateParse(format!(
                "expected PEM block '{CERTIFICATE_LABEL}', found '{}'",
                block.tag()
            )));
        }
        Self::from_der(block.contents())
    }

    /// Parse a DER-encoded certificate
    ///
    /// # Errors
    ///
    /// Returns `CertificateParse` when the bytes are not a valid X.509 certificate.
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let (_, cert) = x509_parser::parse_x509_certificate(der)
            .map_err(|e| PkiError::CertificateParse(format!("X.509 parsing failed: {e}")))?;
        summarize(&cert)
    }

    /// Whether the only extended key usage is server authentication
    #[must_use]
    pub fn is_server_auth_only(&self) -> bool {
        self.extended_key_usage == ["serverAuth"]
    }
}

fn summarize(cert: &X509Certificate<'_>) -> Result<CertificateSummary> {
    let parse_err = |e: x509_parser::error::X509Error| PkiError::CertificateParse(e.to_string());

    let serial = serial_hex(cert.tbs_certificate.raw_serial());

    let subject_common_name = cert
        .subject()
        .iter_common_name()
        .next()
        .and_then(|cn| cn.as_str().ok())
        .map(str::to_string);

    let is_ca = cert
        .basic_constraints()
        .map_err(parse_err)?
        .is_some_and(|ext| ext.value.ca);

    let dns_names = cert
        .subject_alternative_name()
        .map_err(parse_err)?
        .map(|ext| dns_entries(ext.value.general_names.iter()))
        .unwrap_or_default();

    let (permitted_dns_domains, name_constraints_critical) = match cert
        .name_constraints()
        .map_err(parse_err)?
    {
        Some(ext) => {
            let permitted = ext
                .value
                .permitted_subtrees
                .as_ref()
                .map(|subtrees| dns_entries(subtrees.iter().map(|s| &s.base)))
                .unwrap_or_default();
            (permitted, ext.critical)
        }
        None => (Vec::new(), false),
    };

    let key_usage = match cert.key_usage().map_err(parse_err)? {
        Some(ext) => {
            let ku = ext.value;
            [
                (ku.digital_signature(), "digitalSignature"),
                (ku.non_repudiation(), "contentCommitment"),
                (ku.key_encipherment(), "keyEncipherment"),
                (ku.data_encipherment(), "dataEncipherment"),
                (ku.key_agreement(), "keyAgreement"),
                (ku.key_cert_sign(), "keyCertSign"),
                (ku.crl_sign(), "cRLSign"),
                (ku.encipher_only(), "encipherOnly"),
                (ku.decipher_only(), "decipherOnly"),
            ]
            .into_iter()
            .filter_map(|(set, name)| set.then_some(name))
            .collect()
        }
        None => Vec::new(),
    };

    let extended_key_usage = match cert.extended_key_usage().map_err(parse_err)? {
        Some(ext) => {
            let eku = ext.value;
            let mut names: Vec<String> = [
                (eku.any, "anyExtendedKeyUsage"),
                (eku.server_auth, "serverAuth"),
                (eku.client_auth, "clientAuth"),
                (eku.code_signing, "codeSigning"),
                (eku.email_protection, "emailProtection"),
                (eku.time_stamping, "timeStamping"),
                (eku.ocsp_signing, "OCSPSigning"),
            ]
            .into_iter()
            .filter_map(|(set, name)| set.then(|| name.to_string()))
            .collect();
            names.extend(eku.other.iter().map(|oid| oid.to_id_string()));
            names
        }
        None => Vec::new(),
    };

    let validity = cert.validity();

    Ok(CertificateSummary {
        serial,
        subject: cert.subject().to_string(),
        subject_common_name,
        issuer: cert.issuer().to_string(),
        subject_raw: cert.subject().as_raw().to_vec(),
        issuer_raw: cert.issuer().as_raw().to_vec(),
        is_ca,
        dns_names,
        permitted_dns_domains,
        name_constraints_critical,
        key_usage,
        extended_key_usage,
        public_key_der: cert.public_key().raw.to_vec(),
        not_before: validity.not_before.timestamp(),
        not_after: validity.not_after.timestamp(),
    })
}

fn dns_entries<'a, 'b: 'a>(names: impl Iterator<Item = &'a GeneralName<'b>>) -> Vec<String> {
    names
        .filter_map(|name| match name {
            GeneralName::DNSName(dns) => Some((*dns).to_string()),
            _ => None,
        })
        .collect()
}

/// Hex of a DER integer's content bytes without sign padding; never empty
fn serial_hex(raw: &[u8]) -> String {
    let hex: String = raw
        .iter()
        .skip_while(|b| **b == 0)
        .map(|b| format!("{b:02x}"))
        .collect();
    if hex.is_empty() {
        "00".to_string()
    } else {
        hex
    }
}
