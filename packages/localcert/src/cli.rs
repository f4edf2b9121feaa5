//! Command line surface of `create-local-cert`

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};
use log::{info, warn};

use localcert_common::LoggingTransformer;

use crate::authority::issue_ca;
use crate::certificate::{create_output_dir, resolve_output_dir, CertificateSummary, Issuance};
use crate::config::IssuerConfig;
use crate::error::PkiError;
use crate::server::issue_server_cert;

/// Commit the binary was built from, injected at build time
pub const BUILD_COMMIT: &str = match option_env!("LOCALCERT_BUILD_COMMIT") {
    Some(commit) => commit,
    None => "none",
};

/// Date the binary was built, injected at build time
pub const BUILD_DATE: &str = match option_env!("LOCALCERT_BUILD_DATE") {
    Some(date) => date,
    None => "na",
};

/// Long flags that may also be spelled with a single dash
const LEGACY_LONG_FLAGS: &[&str] = &["out", "name-constraints", "help", "version"];

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "create-local-cert", version)]
#[command(about = "Issue a local development CA and a server certificate signed by it")]
pub struct Cli {
    /// Output path for certificates
    #[arg(long, default_value = "./certs")]
    pub out: PathBuf,

    /// Use name constraints in the CA certificate
    #[arg(
        long = "name-constraints",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value = "true",
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub name_constraints: bool,

    /// Hostnames or IPs the certificates are valid for; the first one names them
    ///
    /// Flag parsing stops at the first SAN; everything after it is a SAN too.
    #[arg(value_name = "SAN", num_args = 1.., trailing_var_arg = true)]
    pub sans: Vec<String>,
}

/// Rewrite `-out` style flags to `--out` so clap accepts the single-dash spelling
///
/// The first element is the program name. Rewriting stops at a `--`
/// terminator or at the first positional argument, after which every
/// argument is passed through untouched.
pub fn normalize_legacy_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args = args.into_iter();
    let mut normalized: Vec<OsString> = args.next().into_iter().collect();
    let mut value_pending = false;

    for arg in args.by_ref() {
        if value_pending {
            value_pending = false;
            normalized.push(arg);
            continue;
        }
        let Some(text) = arg.to_str() else {
            normalized.push(arg);
            break;
        };
        if text == "--" || text == "-" || !text.starts_with('-') {
            normalized.push(arg);
            break;
        }

        let rest = text.trim_start_matches('-');
        let (name, inline_value) = match rest.split_once('=') {
            Some((name, _)) => (name, true),
            None => (rest, false),
        };
        value_pending = name == "out" && !inline_value;

        if !text.starts_with("--") && LEGACY_LONG_FLAGS.contains(&name) {
            normalized.push(OsString::from(format!("-{text}")));
        } else {
            normalized.push(arg);
        }
    }

    normalized.extend(args);
    normalized
}

/// A failure together with the stage of the run it ended
#[derive(Debug, thiserror::Error)]
#[error("failed to {stage}: {source}")]
pub struct RunError {
    /// What the run was doing, phrased to follow "failed to"
    pub stage: &'static str,
    /// Underlying error
    pub source: PkiError,
}

fn at_stage(stage: &'static str) -> impl FnOnce(PkiError) -> RunError {
    move |source| RunError { stage, source }
}

/// What a completed run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Absolute output directory
    pub output_dir: PathBuf,
    /// Outcome of CA issuance
    pub ca: Issuance,
    /// Outcome of server certificate issuance
    pub server: Issuance,
}

/// Run the whole issuance sequence: resolve and create the output directory,
/// issue the CA, then the server certificate, then report what is on disk
///
/// # Errors
///
/// Returns the first failure; nothing is retried.
pub fn run(cli: &Cli, config: &IssuerConfig) -> Result<RunSummary, RunError> {
    if cli.sans.is_empty() {
        return Err(at_stage("validate arguments")(PkiError::NoSubjectAltNames));
    }

    let output_dir = resolve_output_dir(&cli.out).map_err(at_stage("resolve outpath"))?;

    LoggingTransformer::log_parameters(&cli.sans, &output_dir, cli.name_constraints);

    create_output_dir(&output_dir).map_err(at_stage("create output directory"))?;

    info!("Creating CA...");
    let ca = issue_ca(config, &output_dir, &cli.sans, cli.name_constraints)
        .map_err(at_stage("create CA"))?;

    info!("Creating server certificate...");
    let server = issue_server_cert(config, &output_dir, &cli.sans)
        .map_err(at_stage("create server certificate"))?;

    report(config, &output_dir, &cli.sans);

    info!("Done!");
    Ok(RunSummary {
        output_dir,
        ca,
        server,
    })
}

/// Log a one-line summary of each certificate on disk
///
/// Only the key files gate issuance, so an unreadable certificate here is
/// reported and never fails the run.
fn report(config: &IssuerConfig, output_dir: &Path, sans: &[String]) {
    let layout = config.layout(output_dir);

    if let Some(ca) = inspect(&layout.ca_cert) {
        info!(
            "CA certificate: {} (serial {}, CA: {}, permitted DNS domains: {:?})",
            ca.subject, ca.serial, ca.is_ca, ca.permitted_dns_domains
        );
    }

    let Some(server) = inspect(&layout.server_cert) else {
        return;
    };
    info!(
        "Server certificate: {} (serial {}, SANs: {:?})",
        server.subject, server.serial, server.dns_names
    );
    if server.dns_names != sans {
        warn!(
            "{} was issued for {:?}, not the requested {:?}; delete {} to reissue",
            layout.server_cert.display(),
            server.dns_names,
            sans,
            layout.server_key.display()
        );
    }
}

fn inspect(path: &Path) -> Option<CertificateSummary> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            warn!("Cannot read {}: {e}", path.display());
            return None;
        }
    };
    match CertificateSummary::from_pem(&text) {
        Ok(summary) => Some(summary),
        Err(e) => {
            warn!("Cannot inspect {}: {e}", path.display());
            None
        }
    }
}
