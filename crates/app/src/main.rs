//! Pet Store end-to-end suite - Main Entry Point
//!
//! Runs the pet lifecycle once, prints the pass/fail matrix and exits
//! non-zero if any step did not pass or the report could not be written.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use petstore_infrastructure::{ReqwestHttpClient, SuiteConfig, render_matrix};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting petstore-e2e v{}", env!("CARGO_PKG_VERSION"));

    let config = SuiteConfig::load().context("loading configuration")?;
    let client = ReqwestHttpClient::new()?;

    let outcome = petstore_e2e::run_suite(&config, Arc::new(client)).await?;

    print!("{}", render_matrix(&outcome.report));
    if let Some(path) = &outcome.report_path {
        println!("report: {}", path.display());
    }
    if let Some(e) = &outcome.report_error {
        eprintln!("report not written: {e}");
    }

    if outcome.succeeded() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
