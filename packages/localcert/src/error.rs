//! Issuance error types

use std::fmt;
use std::path::PathBuf;

use localcert_common::ErrorKind;

/// Which certificate of the pair an operation was working on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The self-signed certificate authority
    Ca,
    /// The leaf certificate signed by the authority
    Server,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ca => f.write_str("CA"),
            Self::Server => f.write_str("server"),
        }
    }
}

/// Errors produced while issuing or loading certificates
#[derive(Debug, thiserror::Error)]
pub enum PkiError {
    /// The SAN list was empty
    #[error("at least one SAN must be provided")]
    NoSubjectAltNames,

    /// The output path could not be made absolute
    #[error("failed to resolve output path {path:?}: {source}")]
    ResolveOutputPath {
        /// Path as given
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The output directory or one of its parents could not be created
    #[error("failed to create output directory {path:?}: {source}")]
    CreateDirectory {
        /// Directory being created
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// An artifact file could not be created
    #[error("file creation failed for {path:?}: {source}")]
    FileCreate {
        /// File being created
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The permission mode of an artifact file could not be set
    #[error("failed to set file permissions on {path:?}: {source}")]
    FilePermissions {
        /// File whose mode was being set
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The PEM block could not be written or flushed
    #[error("failed to write PEM block to {path:?}: {source}")]
    PemWrite {
        /// File being written
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// RSA key generation failed
    #[error("failed to generate {role} key: {source}")]
    KeyGeneration {
        /// Certificate the key was for
        role: Role,
        /// Error from the RSA library
        source: rsa::Error,
    },

    /// A key could not be encoded or imported for signing
    #[error("failed to encode {role} key: {reason}")]
    KeyEncoding {
        /// Certificate the key was for
        role: Role,
        /// What went wrong
        reason: String,
    },

    /// A SAN is not representable as a dNSName
    #[error("invalid DNS name '{name}': {source}")]
    InvalidDnsName {
        /// The offending SAN
        name: String,
        /// Error from the certificate library
        source: rcgen::Error,
    },

    /// The validity window falls outside the representable date range
    #[error("failed to compute {role} certificate validity: {source}")]
    Validity {
        /// Certificate being built
        role: Role,
        /// Date arithmetic error
        source: time::error::ComponentRange,
    },

    /// Signing the certificate failed
    #[error("failed to create {role} certificate: {source}")]
    Signing {
        /// Certificate being signed
        role: Role,
        /// Error from the certificate library
        source: rcgen::Error,
    },

    /// The CA key or certificate is missing, undecodable or mismatched
    #[error("failed to load CA keypair from {path:?}: {reason}")]
    CaLoad {
        /// File that could not be used
        path: PathBuf,
        /// What went wrong
        reason: String,
    },

    /// A certificate could not be parsed
    #[error("failed to parse certificate: {0}")]
    CertificateParse(String),
}

impl PkiError {
    /// Classify the error for reporting at the process boundary
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoSubjectAltNames | Self::ResolveOutputPath { .. } | Self::InvalidDnsName { .. } => {
                ErrorKind::Configuration
            }
            Self::CreateDirectory { .. }
            | Self::FileCreate { .. }
            | Self::FilePermissions { .. }
            | Self::PemWrite { .. } => ErrorKind::Io,
            Self::KeyGeneration { .. }
            | Self::KeyEncoding { .. }
            | Self::Validity { .. }
            | Self::Signing { .. } => ErrorKind::Crypto,
            Self::CaLoad { .. } | Self::CertificateParse(_) => ErrorKind::CaLoad,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, PkiError>;
