//! Issuance configuration
//!
//! Every issuer receives an explicit `IssuerConfig` instead of reading
//! process-wide constants, so the same logic runs against temporary
//! directories and smaller keys in tests.

use std::path::{Path, PathBuf};

/// Key size used for both the CA and the server key
pub const DEFAULT_KEY_SIZE: usize = 4096;

/// Label used in subject names
pub const DEFAULT_TOOL_NAME: &str = "create-local-cert";

/// File names, modes, key size and certificate constants for one output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuerConfig {
    /// RSA modulus size in bits
    pub key_size: usize,
    /// CA private key file name
    pub ca_key_file: String,
    /// CA certificate file name
    pub ca_cert_file: String,
    /// Server private key file name
    pub server_key_file: String,
    /// Server certificate file name
    pub server_cert_file: String,
    /// Permission mode applied to private key files
    pub key_file_mode: u32,
    /// Permission mode applied to certificate files
    pub cert_file_mode: u32,
    /// Validity of both certificates in calendar years
    pub valid_for_years: u16,
    /// Label used in subject common and organization names
    pub tool_name: String,
    /// Serial number of the CA certificate
    pub ca_serial: u64,
    /// Serial number of the server certificate
    pub server_serial: u64,
}

impl Default for IssuerConfig {
    fn default() -> Self {
        Self {
            key_size: DEFAULT_KEY_SIZE,
            ca_key_file: "ca.key".to_string(),
            ca_cert_file: "ca.crt".to_string(),
            server_key_file: "server.key".to_string(),
            server_cert_file: "server.crt".to_string(),
            key_file_mode: 0o400,
            cert_file_mode: 0o444,
            valid_for_years: 10,
            tool_name: DEFAULT_TOOL_NAME.to_string(),
            ca_serial: 1,
            server_serial: 2,
        }
    }
}

impl IssuerConfig {
    /// Set RSA key size in bits
    #[must_use]
    pub fn key_size(self, bits: usize) -> Self {
        Self {
            key_size: bits,
            ..self
        }
    }

    /// Set validity period in years
    #[must_use]
    pub fn valid_for_years(self, years: u16) -> Self {
        Self {
            valid_for_years: years,
            ..self
        }
    }

    /// Set the label used in subject names
    #[must_use]
    pub fn tool_name(self, name: &str) -> Self {
        Self {
            tool_name: name.to_string(),
            ..self
        }
    }

    /// Resolved paths of the four artifacts inside `output_dir`
    #[must_use]
    pub fn layout(&self, output_dir: &Path) -> ArtifactLayout {
        ArtifactLayout {
            ca_key: output_dir.join(&self.ca_key_file),
            ca_cert: output_dir.join(&self.ca_cert_file),
            server_key: output_dir.join(&self.server_key_file),
            server_cert: output_dir.join(&self.server_cert_file),
        }
    }

    /// Common name of the CA certificate for the given first SAN
    pub(crate) fn ca_common_name(&self, first_san: &str) -> String {
        format!("{} CA for {first_san}", self.tool_name)
    }

    /// Organization name of the CA certificate
    pub(crate) fn ca_organization(&self) -> String {
        format!("{} CA", self.tool_name)
    }
}

/// Paths of the on-disk artifact set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLayout {
    /// CA private key, the idempotency marker for CA issuance
    pub ca_key: PathBuf,
    /// CA certificate
    pub ca_cert: PathBuf,
    /// Server private key, the idempotency marker for server issuance
    pub server_key: PathBuf,
    /// Server certificate
    pub server_cert: PathBuf,
}
