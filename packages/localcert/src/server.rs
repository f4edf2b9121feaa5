//! Server certificate issuance
//!
//! The server certificate is signed by the CA previously issued into the same
//! directory. Its SAN list is exactly the list supplied on this invocation;
//! whether that list satisfies the CA's name constraints is left to verifiers.

use std::path::Path;

use rcgen::{CertificateParams, ExtendedKeyUsagePurpose, KeyUsagePurpose};

use localcert_common::LoggingTransformer;

use crate::authority::LoadedAuthority;
use crate::certificate::keys::{RsaKeyMaterial, RSA_PRIVATE_KEY_LABEL};
use crate::certificate::parser::CERTIFICATE_LABEL;
use crate::certificate::template::{
    distinguished_name, dns_san_entries, serial_number, validity_window,
};
use crate::certificate::{write_pem, Issuance};
use crate::config::IssuerConfig;
use crate::error::{PkiError, Result, Role};

/// Issue the CA-signed server certificate unless its key already exists
///
/// An existing server key is kept even when `sans` differs from the list it
/// was issued for.
///
/// # Errors
///
/// Returns `NoSubjectAltNames` for an empty SAN list, `CaLoad` or
/// `CertificateParse` when the CA cannot be loaded, and otherwise the error
/// of whichever generation, signing or write step failed.
pub fn issue_server_cert(config: &IssuerConfig, output_dir: &Path, sans: &[String]) -> Result<Issuance> {
    let first_san = sans.first().ok_or(PkiError::NoSubjectAltNames)?;
    let layout = config.layout(output_dir);

    if layout.server_key.exists() {
        LoggingTransformer::log_artifact_skipped(&layout.server_key);
        return Ok(Issuance::Skipped {
            private_key: layout.server_key,
        });
    }

    let ca = LoadedAuthority::load(config, output_dir)?;

    let key = RsaKeyMaterial::generate(config.key_size, Role::Server)?;
    let signing_key = key.signing_key(Role::Server)?;

    let params = server_params(config, sans, first_san)?;
    let cert = params
        .signed_by(&signing_key, ca.issuer())
        .map_err(|source| PkiError::Signing {
            role: Role::Server,
            source,
        })?;

    write_pem(
        &layout.server_cert,
        CERTIFICATE_LABEL,
        cert.der().as_ref(),
        config.cert_file_mode,
    )?;

    let key_der = key.pkcs1_der(Role::Server)?;
    write_pem(
        &layout.server_key,
        RSA_PRIVATE_KEY_LABEL,
        &key_der,
        config.key_file_mode,
    )?;

    Ok(Issuance::Created {
        certificate: layout.server_cert,
        private_key: layout.server_key,
    })
}

/// Template of the server certificate; the issuer name comes from the CA at signing time
fn server_params(config: &IssuerConfig, sans: &[String], first_san: &str) -> Result<CertificateParams> {
    let mut params = CertificateParams::default();
    params.serial_number = Some(serial_number(config.server_serial));
    params.distinguished_name = distinguished_name(&config.tool_name, first_san);

    let (not_before, not_after) = validity_window(config.valid_for_years, Role::Server)?;
    params.not_before = not_before;
    params.not_after = not_after;

    params.extended_key_usages = vec![ExtendedKeyUsagePurpose::ServerAuth];
    params.key_usages = vec![
        KeyUsagePurpose::DigitalSignature,
        KeyUsagePurpose::KeyEncipherment,
    ];
    params.subject_alt_names = dns_san_entries(sans)?;

    Ok(params)
}
