//! Scenario runner implementation.
//!
//! Executes steps strictly in declared order and produces a
//! [`ScenarioReport`] with one outcome per step.

use chrono::Utc;
use petstore_domain::{ScenarioReport, StepOutcome};
use tokio::time::Instant;
use tracing::Instrument;

use super::Scenario;

/// Runs scenarios sequentially.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScenarioRunner {
    /// Whether to skip the remaining steps after the first failure.
    stop_on_failure: bool,
}

impl ScenarioRunner {
    /// Create a runner that isolates steps: every step runs.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            stop_on_failure: false,
        }
    }

    /// Set whether to stop on first failure.
    #[must_use]
    pub const fn with_stop_on_failure(mut self, stop: bool) -> Self {
        self.stop_on_failure = stop;
        self
    }

    /// Run every step of `scenario` against `ctx`, in order.
    pub async fn run<C: Sync>(&self, scenario: &Scenario<C>, ctx: &C) -> ScenarioReport {
        let started_at = Utc::now();
        let start = Instant::now();
        let mut outcomes = Vec::with_capacity(scenario.len());
        let mut halted = false;

        tracing::info!(scenario = scenario.name(), steps = scenario.len(), "starting scenario");

        for (index, step) in scenario.steps.iter().enumerate() {
            let order = index + 1;
            let name = step.name();

            if halted {
                tracing::info!(order, step = name, "skipped");
                outcomes.push(StepOutcome::skipped(order, name));
                continue;
            }

            let span = tracing::info_span!("step", order, step = name);
            let step_start = Instant::now();
            let result = step.run(ctx).instrument(span.clone()).await;
            let duration_ms = millis(step_start.elapsed());

            match result {
                Ok(()) => {
                    tracing::info!(parent: &span, duration_ms, "passed");
                    outcomes.push(StepOutcome::passed(order, name, duration_ms));
                }
                Err(e) => {
                    tracing::warn!(parent: &span, duration_ms, error = %e, "failed");
                    outcomes.push(StepOutcome::failed(order, name, e.to_string(), duration_ms));
                    halted = self.stop_on_failure;
                }
            }
        }

        let report = ScenarioReport::new(scenario.name(), started_at, outcomes, millis(start.elapsed()));
        tracing::info!(
            scenario = scenario.name(),
            passed = report.passed,
            failed = report.failed,
            skipped = report.skipped,
            "scenario finished"
        );
        report
    }
}

fn millis(duration: std::time::Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
