//! Main entry point for the create-local-cert CLI application

use std::process::ExitCode;

use clap::Parser;
use localcert::cli::{normalize_legacy_flags, run, Cli, BUILD_COMMIT, BUILD_DATE};
use localcert::config::DEFAULT_TOOL_NAME;
use localcert::IssuerConfig;
use localcert_common::LoggingTransformer;

fn main() -> ExitCode {
    LoggingTransformer::init();
    LoggingTransformer::log_build_info(
        DEFAULT_TOOL_NAME,
        env!("CARGO_PKG_VERSION"),
        BUILD_COMMIT,
        BUILD_DATE,
    );

    let cli = Cli::parse_from(normalize_legacy_flags(std::env::args_os()));

    match run(&cli, &IssuerConfig::default()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            LoggingTransformer::log_fatal(err.stage, err.source.kind(), &err.source);
            ExitCode::FAILURE
        }
    }
}
