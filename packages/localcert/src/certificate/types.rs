//! Issuance outcome types

use std::path::PathBuf;

/// What an issuer did with its artifact pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issuance {
    /// Key and certificate were generated and written
    Created {
        /// Path of the written certificate
        certificate: PathBuf,
        /// Path of the written private key
        private_key: PathBuf,
    },
    /// The private key already existed; nothing was generated
    Skipped {
        /// Path of the existing private key
        private_key: PathBuf,
    },
}

impl Issuance {
    /// Whether new artifacts were written
    #[must_use]
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created { .. })
    }
}
