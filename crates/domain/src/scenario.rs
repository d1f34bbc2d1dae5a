//! Outcome records of an ordered scenario run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Final state of one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// Every assertion held.
    Passed,
    /// The step reported a failure.
    Failed,
    /// Not executed because an earlier step failed in fail-fast mode.
    Skipped,
}

impl StepStatus {
    /// Short uppercase label for the pass/fail matrix.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Passed => "PASS",
            Self::Failed => "FAIL",
            Self::Skipped => "SKIP",
        }
    }
}

/// Result of a single step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// 1-based position in the scenario.
    pub order: usize,
    /// Step name.
    pub name: String,
    /// Final state.
    pub status: StepStatus,
    /// Failure description, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Wall time spent in the step.
    pub duration_ms: u64,
}

impl StepOutcome {
    /// A passed step.
    #[must_use]
    pub fn passed(order: usize, name: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            order,
            name: name.into(),
            status: StepStatus::Passed,
            error: None,
            duration_ms,
        }
    }

    /// A failed step.
    #[must_use]
    pub fn failed(
        order: usize,
        name: impl Into<String>,
        error: impl Into<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            order,
            name: name.into(),
            status: StepStatus::Failed,
            error: Some(error.into()),
            duration_ms,
        }
    }

    /// A step that never ran.
    #[must_use]
    pub fn skipped(order: usize, name: impl Into<String>) -> Self {
        Self {
            order,
            name: name.into(),
            status: StepStatus::Skipped,
            error: None,
            duration_ms: 0,
        }
    }
}

/// Pass/fail matrix of one scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioReport {
    /// Unique identifier of the run.
    pub id: Uuid,
    /// Scenario name.
    pub scenario: String,
    /// When the first step started.
    pub started_at: DateTime<Utc>,
    /// Step outcomes in declared order.
    pub steps: Vec<StepOutcome>,
    /// Number of steps.
    pub total: usize,
    /// Passed steps.
    pub passed: usize,
    /// Failed steps.
    pub failed: usize,
    /// Skipped steps.
    pub skipped: usize,
    /// Wall time of the whole run.
    pub duration_ms: u64,
}

impl ScenarioReport {
    /// Builds a report and its totals from step outcomes.
    #[must_use]
    pub fn new(
        scenario: impl Into<String>,
        started_at: DateTime<Utc>,
        steps: Vec<StepOutcome>,
        duration_ms: u64,
    ) -> Self {
        let count = |status| steps.iter().filter(|s| s.status == status).count();
        let passed = count(StepStatus::Passed);
        let failed = count(StepStatus::Failed);
        let skipped = count(StepStatus::Skipped);

        Self {
            id: Uuid::now_v7(),
            scenario: scenario.into(),
            started_at,
            total: steps.len(),
            steps,
            passed,
            failed,
            skipped,
            duration_ms,
        }
    }

    /// True when no step failed or was skipped.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0 && self.skipped == 0
    }

    /// Looks up a step by name.
    #[must_use]
    pub fn step(&self, name: &str) -> Option<&StepOutcome> {
        self.steps.iter().find(|s| s.name == name)
    }
}
