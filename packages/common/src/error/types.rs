//! Core error kinds

use thiserror::Error;

/// Broad class of a failure, used when reporting errors at the process boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ErrorKind {
    /// Invalid or missing user input (no SANs, unresolvable output path)
    #[error("Configuration error")]
    Configuration,

    /// Filesystem errors: directory creation, file creation, permissions, writes
    #[error("I/O error")]
    Io,

    /// Key generation, key encoding, validity computation or signing errors
    #[error("Cryptographic error")]
    Crypto,

    /// Missing, corrupt or mismatched certificate authority artifacts
    #[error("Certificate authority load error")]
    CaLoad,
}

impl ErrorKind {
    /// Short lowercase tag suitable for structured log fields
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Io => "io",
            Self::Crypto => "crypto",
            Self::CaLoad => "ca_load",
        }
    }
}
