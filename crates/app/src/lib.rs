//! Pet Store end-to-end suite
//!
//! Wires configuration, adapters and the lifecycle use case into one run.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use petstore_application::ports::HttpClient;
use petstore_application::use_cases::{LifecyclePolicies, PetLifecycle, RunPetLifecycle};
use petstore_application::{
    PetStoreApi, RequestDefaults, ResponseVerifier, ScenarioRunner, SessionFixtures, resolve_pet_id,
};
use petstore_domain::{Exchange, PetId, ScenarioReport};
use petstore_infrastructure::{
    JsonSchemaValidator, MemoryRecorder, ReportError, RunReport, SuiteConfig, TracingRecorder,
    write_report,
};

/// Everything a finished run produced.
#[derive(Debug)]
pub struct SuiteOutcome {
    /// Identifier used by every step.
    pub pet_id: PetId,
    /// Pass/fail matrix.
    pub report: ScenarioReport,
    /// Recorded exchanges, in order.
    pub exchanges: Vec<Exchange>,
    /// Location of `report.json`, when one was written.
    pub report_path: Option<PathBuf>,
    /// Why `report.json` could not be written.
    pub report_error: Option<ReportError>,
}

impl SuiteOutcome {
    /// Every step passed and any requested report was written.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        self.report.all_passed() && self.report_error.is_none()
    }
}

/// Runs the pet lifecycle once against the configured service.
///
/// Step failures end up in the report and a failed report write ends up in
/// [`SuiteOutcome::report_error`]; only setup problems are returned as
/// errors.
///
/// # Errors
///
/// Returns an error if the endpoint or the schemas are unusable.
pub async fn run_suite(config: &SuiteConfig, client: Arc<dyn HttpClient>) -> anyhow::Result<SuiteOutcome> {
    let defaults = RequestDefaults::new(&config.base_url, &config.base_path, config.request_timeout_ms)
        .context("invalid service endpoint")?;
    let fixtures = SessionFixtures::new(defaults);

    let mut schemas = JsonSchemaValidator::with_builtin().context("built-in schema")?;
    if let Some(dir) = &config.schema_dir {
        let count = schemas
            .load_dir(dir)
            .with_context(|| format!("loading schemas from {}", dir.display()))?;
        tracing::info!(count, dir = %dir.display(), "loaded schemas");
    }

    let memory = Arc::new(MemoryRecorder::new());
    let api = PetStoreApi::new(client, fixtures.request.clone())
        .with_recorder(Arc::new(TracingRecorder))
        .with_recorder(memory.clone());

    let pet_id = resolve_pet_id(config.pet_id_override.as_deref(), &mut rand::rng())?;
    tracing::info!(%pet_id, endpoint = fixtures.request.endpoint(), "Using pet id");

    let lifecycle = PetLifecycle::new(
        pet_id,
        api,
        ResponseVerifier::new(Arc::new(schemas)),
        fixtures.ok_json,
        LifecyclePolicies::standard()?,
    );
    let runner = ScenarioRunner::new().with_stop_on_failure(config.stop_on_failure);
    let report = RunPetLifecycle::new(runner).execute(&lifecycle).await;
    let exchanges = memory.exchanges();

    let (report_path, report_error) = match &config.report_dir {
        Some(dir) => {
            let run = RunReport {
                pet_id,
                report: &report,
                exchanges: &exchanges,
            };
            match write_report(dir, &run).await {
                Ok(path) => (Some(path), None),
                Err(e) => {
                    tracing::error!(error = %e, dir = %dir.display(), "report not written");
                    (None, Some(e))
                }
            }
        }
        None => (None, None),
    };

    Ok(SuiteOutcome {
        pet_id,
        report,
        exchanges,
        report_path,
        report_error,
    })
}
