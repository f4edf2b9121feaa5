//! File operations for certificate issuance
//!
//! This module handles file operations including:
//! - Output directory creation
//! - PEM block persistence with a fixed permission mode

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use localcert_common::LoggingTransformer;

use crate::error::{PkiError, Result};

/// Mode of a freshly created output directory
#[cfg(unix)]
const OUTPUT_DIR_MODE: u32 = 0o755;

/// Resolve `path` against the current directory without requiring it to exist
///
/// # Errors
///
/// Returns `ResolveOutputPath` when the current directory cannot be read.
pub fn resolve_output_dir(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|source| PkiError::ResolveOutputPath {
        path: path.to_path_buf(),
        source,
    })
}

/// Create the output directory and any missing parents
///
/// # Errors
///
/// Returns `CreateDirectory` when any component cannot be created.
pub fn create_output_dir(path: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(OUTPUT_DIR_MODE);
    }
    builder
        .create(path)
        .map_err(|source| PkiError::CreateDirectory {
            path: path.to_path_buf(),
            source,
        })
}

/// Write `contents` as a single PEM block labelled `label` to `path`
///
/// The file is created (or truncated), its mode is set to `mode`, and only
/// then is the block written, so key material never lands in a file that
/// still carries the default creation mode.
///
/// # Errors
///
/// Returns `FileCreate`, `FilePermissions` or `PemWrite` naming the step that
/// failed. A partially written file is left in place.
pub fn write_pem(path: &Path, label: &str, contents: &[u8], mode: u32) -> Result<()> {
    LoggingTransformer::log_artifact_write(path, mode);

    let mut out = File::create(path).map_err(|source| PkiError::FileCreate {
        path: path.to_path_buf(),
        source,
    })?;

    set_mode(path, mode).map_err(|source| PkiError::FilePermissions {
        path: path.to_path_buf(),
        source,
    })?;

    let block = pem::encode(&pem::Pem::new(label, contents));
    out.write_all(block.as_bytes())
        .and_then(|()| out.sync_all())
        .map_err(|source| PkiError::PemWrite {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(path: &Path, mode: u32) -> std::io::Result<()> {
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_readonly(mode & 0o222 == 0);
    fs::set_permissions(path, perms)
}
