//! Error classification and logging
//!
//! Provides the error taxonomy shared by every crate in the workspace and the
//! logging facade used to report progress and failures.

pub mod logging;
pub mod types;

// Re-export all public types
pub use logging::LoggingTransformer;
pub use types::ErrorKind;
