//! # Bazaar App Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Mobile UI ── stdin (JSON lines) ──► bazaar-app ── stdout ──► Mobile UI │
//! │                                          │                              │
//! │                                          └── logs ──► stderr            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The actual setup is in lib.rs for better testability.

use std::process::ExitCode;

use bazaar_app_lib::Cli;
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match bazaar_app_lib::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "bazaar-app stopped");
            ExitCode::FAILURE
        }
    }
}
