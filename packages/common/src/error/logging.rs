//! Structured logging infrastructure
//!
//! Provides env_logger-based logging with the standard log crate as facade.
//! Every progress line is emitted before the step it announces, so the last
//! line printed before a failure names the artifact that was being produced.

use log::{error, info};
use std::fmt::Display;
use std::path::Path;
use std::sync::Once;

use super::types::ErrorKind;

static INIT_LOGGER: Once = Once::new();

/// Logging infrastructure using `env_logger`
pub struct LoggingTransformer;

impl LoggingTransformer {
    /// Initialize logging system (should be called once at application startup)
    ///
    /// Defaults to the `info` level. Configure via `RUST_LOG`:
    /// - `RUST_LOG=debug` - Include certificate details and key sizes
    /// - `RUST_LOG=error` - Only the fatal error line
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .format_timestamp_micros()
                .init();
        });
    }

    /// Initialize logging for test environments
    ///
    /// Safe to call from every test; only the first call installs the logger.
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Log the build banner: tool name, version, commit and build date
    pub fn log_build_info(tool: &str, version: &str, commit: &str, date: &str) {
        info!("{tool} {version} ({commit}) built on {date}");
    }

    /// Echo the effective run parameters
    pub fn log_parameters(sans: &[String], out_path: &Path, name_constraints: bool) {
        info!("Params:");
        info!("  SANs: {sans:?}");
        info!("  outPath: {}", out_path.display());
        info!("  isUsingNameConstraints: {name_constraints}");
    }

    /// Log a file write together with the permission mode it will receive
    pub fn log_artifact_write(path: &Path, mode: u32) {
        info!("Writing {} with mode {mode:04o}", path.display());
    }

    /// Log that an artifact set was left untouched because its marker exists
    pub fn log_artifact_skipped(path: &Path) {
        info!("{} already exists, skipping creation", path.display());
    }

    /// Log a cryptographic failure without echoing key material
    pub fn log_crypto_error(operation: &str, error: &dyn std::error::Error) {
        error!(
            "Cryptographic operation failed: {} (error_type: {})",
            operation,
            std::any::type_name_of_val(error)
        );
    }

    /// Log the fatal error that ends the run
    pub fn log_fatal(stage: &str, kind: ErrorKind, error: &dyn Display) {
        error!("failed to {stage}: {error} (kind: {})", kind.as_str());
    }
}
