//! kvguard - Entry Point
//!
//! Binary entry point for the `kvguard` command line.

// Force-link kvguard-providers to ensure linkme registrations are included
extern crate kvguard_providers;

use clap::Parser;
use kvguard::cli::{Cli, run};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("kvguard: {e:#}");
            ExitCode::FAILURE
        }
    }
}
