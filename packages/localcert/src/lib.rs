#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

//! Local development PKI bootstrap
//!
//! Issues a self-signed certificate authority and one server certificate
//! signed by it into an output directory:
//!
//! | File | Content | Mode |
//! |---|---|---|
//! | `ca.key` | PEM `RSA PRIVATE KEY` | 0400 |
//! | `ca.crt` | PEM `CERTIFICATE` | 0444 |
//! | `server.key` | PEM `RSA PRIVATE KEY` | 0400 |
//! | `server.crt` | PEM `CERTIFICATE` | 0444 |
//!
//! Each pair is generated once. The existence of its key file makes every
//! later issuance of that pair a no-op.

pub mod authority;
pub mod certificate;
pub mod cli;
pub mod config;
pub mod error;
pub mod server;

pub use authority::{issue_ca, LoadedAuthority};
pub use certificate::{CertificateSummary, Issuance, RsaKeyMaterial};
pub use config::{ArtifactLayout, IssuerConfig};
pub use error::{PkiError, Result, Role};
pub use server::issue_server_cert;
