//! Common infrastructure for the create-local-cert workspace
//!
//! This crate provides shared functionality used by the issuance library and
//! the command line entry point:
//! - Error classification (`ErrorKind`)
//! - Structured logging bootstrap (`LoggingTransformer`)

pub mod error;

pub use error::*;
