//! Ordered scenarios.
//!
//! A scenario is an explicit, ordered list of named steps sharing one
//! read-only context. Steps never inspect each other's outcomes; ordering
//! alone carries the dependency between them.

mod runner;

pub use runner::ScenarioRunner;

use async_trait::async_trait;

use crate::error::ApplicationResult;

/// One named step of a scenario.
#[async_trait]
pub trait ScenarioStep<C: Sync>: Send + Sync {
    /// Display name used in logs and reports.
    fn name(&self) -> &str;

    /// Runs the step against the shared context.
    ///
    /// # Errors
    ///
    /// Returns the step's failure; the runner records it and moves on.
    async fn run(&self, ctx: &C) -> ApplicationResult<()>;
}

/// Named, ordered list of steps over a context of type `C`.
pub struct Scenario<C: Sync> {
    name: String,
    steps: Vec<Box<dyn ScenarioStep<C>>>,
}

impl<C: Sync> Scenario<C> {
    /// Creates an empty scenario.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    /// Appends a step (builder pattern).
    #[must_use]
    pub fn then(mut self, step: impl ScenarioStep<C> + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Scenario name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True if the scenario has no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step names in declared order.
    #[must_use]
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }
}

impl<C: Sync> std::fmt::Debug for Scenario<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.name)
            .field("steps", &self.step_names())
            .finish()
    }
}
