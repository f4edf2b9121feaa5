//! Certificate authority issuance and loading
//!
//! The CA is created at most once per output directory: the presence of its
//! private key file is the only marker consulted. Once present, the CA is
//! loaded from disk to sign the server certificate.

use std::fs;
use std::path::Path;

use log::{debug, info};
use rcgen::{
    BasicConstraints, CertificateParams, GeneralSubtree, IsCa, Issuer, KeyPair, KeyUsagePurpose,
    NameConstraints,
};
use zeroize::Zeroizing;

use localcert_common::LoggingTransformer;

use crate::certificate::keys::{RsaKeyMaterial, RSA_PRIVATE_KEY_LABEL};
use crate::certificate::parser::{CertificateSummary, CERTIFICATE_LABEL};
use crate::certificate::template::{distinguished_name, serial_number, validity_window};
use crate::certificate::{write_pem, Issuance};
use crate::config::IssuerConfig;
use crate::error::{PkiError, Result, Role};

/// Issue the self-signed CA into `output_dir` unless its key already exists
///
/// With `use_name_constraints`, every SAN becomes a permitted DNS subtree of
/// a critical name-constraints extension, so verifiers reject leaves for any
/// other name.
///
/// # Errors
///
/// Returns `NoSubjectAltNames` for an empty SAN list, and otherwise the error
/// of whichever generation, signing or write step failed.
pub fn issue_ca(
    config: &IssuerConfig,
    output_dir: &Path,
    sans: &[String],
    use_name_constraints: bool,
) -> Result<Issuance> {
    let first_san = sans.first().ok_or(PkiError::NoSubjectAltNames)?;
    let layout = config.layout(output_dir);

    if layout.ca_key.exists() {
        LoggingTransformer::log_artifact_skipped(&layout.ca_key);
        return Ok(Issuance::Skipped {
            private_key: layout.ca_key,
        });
    }

    let key = RsaKeyMaterial::generate(config.key_size, Role::Ca)?;
    let signing_key = key.signing_key(Role::Ca)?;

    let params = ca_params(config, sans, first_san, use_name_constraints)?;
    let cert = params
        .self_signed(&signing_key)
        .map_err(|source| PkiError::Signing {
            role: Role::Ca,
            source,
        })?;

    write_pem(
        &layout.ca_cert,
        CERTIFICATE_LABEL,
        cert.der().as_ref(),
        config.cert_file_mode,
    )?;

    let key_der = key.pkcs1_der(Role::Ca)?;
    write_pem(
        &layout.ca_key,
        RSA_PRIVATE_KEY_LABEL,
        &key_der,
        config.key_file_mode,
    )?;

    Ok(Issuance::Created {
        certificate: layout.ca_cert,
        private_key: layout.ca_key,
    })
}

/// Template of the CA certificate
fn ca_params(
    config: &IssuerConfig,
    sans: &[String],
    first_san: &str,
    use_name_constraints: bool,
) -> Result<CertificateParams> {
    let mut params = CertificateParams::default();
    params.serial_number = Some(serial_number(config.ca_serial));
    params.distinguished_name = distinguished_name(
        &config.ca_organization(),
        &config.ca_common_name(first_san),
    );

    let (not_before, not_after) = validity_window(config.valid_for_years, Role::Ca)?;
    params.not_before = not_before;
    params.not_after = not_after;

    params.key_usages = vec![KeyUsagePurpose::KeyCertSign, KeyUsagePurpose::CrlSign];
    params.extended_key_usages = Vec::new();
    params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);

    if use_name_constraints {
        // rcgen always marks this extension critical
        params.name_constraints = Some(NameConstraints {
            permitted_subtrees: sans.iter().cloned().map(GeneralSubtree::DnsName).collect(),
            excluded_subtrees: Vec::new(),
        });
    }

    Ok(params)
}

/// A CA read back from disk, ready to sign
pub struct LoadedAuthority {
    summary: CertificateSummary,
    issuer: Issuer<'static, KeyPair>,
}

impl LoadedAuthority {
    /// Load the CA certificate and key from `output_dir`
    ///
    /// The key may be PKCS#1 or PKCS#8 and must match the certificate's
    /// public key.
    ///
    /// # Errors
    ///
    /// Returns `CaLoad` when a file is missing, unreadable, undecodable or the
    /// pair does not match, and `CertificateParse` for a corrupt certificate.
    pub fn load(config: &IssuerConfig, output_dir: &Path) -> Result<Self> {
        let layout = config.layout(output_dir);

        let cert_pem = fs::read_to_string(&layout.ca_cert).map_err(|e| PkiError::CaLoad {
            path: layout.ca_cert.clone(),
            reason: e.to_string(),
        })?;
        let key_pem = Zeroizing::new(fs::read_to_string(&layout.ca_key).map_err(|e| {
            PkiError::CaLoad {
                path: layout.ca_key.clone(),
                reason: e.to_string(),
            }
        })?);

        let key = RsaKeyMaterial::from_pem(&key_pem).map_err(|reason| PkiError::CaLoad {
            path: layout.ca_key.clone(),
            reason,
        })?;

        let summary = CertificateSummary::from_pem(&cert_pem)?;
        if !key.matches_public_key_der(&summary.public_key_der) {
            return Err(PkiError::CaLoad {
                path: layout.ca_key,
                reason: "private key does not match CA certificate".to_string(),
            });
        }
        debug!("Loaded CA {} (serial {})", summary.subject, summary.serial);

        let signing_key = key.signing_key(Role::Ca)?;
        let issuer = Issuer::from_ca_cert_pem(&cert_pem, signing_key).map_err(|e| {
            PkiError::CaLoad {
                path: layout.ca_cert,
                reason: format!("unusable as issuer: {e}"),
            }
        })?;

        info!("Using CA {}", summary.subject);
        Ok(Self { summary, issuer })
    }

    /// Parsed view of the CA certificate
    #[must_use]
    pub fn summary(&self) -> &CertificateSummary {
        &self.summary
    }

    pub(crate) fn issuer(&self) -> &Issuer<'static, KeyPair> {
        &self.issuer
    }
}
