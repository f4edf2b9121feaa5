//! Certificate building blocks
//!
//! This module provides the pieces the issuers are assembled from:
//! - `file_ops`: output directory creation and PEM persistence
//! - keys: RSA key generation, encoding and loading
//! - template: subject names, validity, SANs and serials
//! - parser: inspection of issued certificates

pub mod file_ops;
pub mod keys;
pub mod parser;
pub(crate) mod template;
pub mod types;

// Re-export main types
pub use file_ops::{create_output_dir, resolve_output_dir, write_pem};
pub use keys::RsaKeyMaterial;
pub use parser::CertificateSummary;
pub use types::Issuance;
