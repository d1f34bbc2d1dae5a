//! Pet lifecycle use case.
//!
//! Create, read, update, query by status, delete and read-after-delete of a
//! single pet, in that order, all keyed on one session identifier.

mod steps;

pub use steps::{CreatePet, DeletePet, FindByStatus, ReadAfterDelete, ReadPet, UpdatePet};

use petstore_domain::{
    Assertion, Category, DomainResult, Expectations, JsonKind, Pet, PetId, PetStatus, PollPolicy,
    ScenarioReport, Tag,
};

use crate::petstore_api::PetStoreApi;
use crate::scenario::{Scenario, ScenarioRunner};
use crate::verify::ResponseVerifier;

/// Schema every pet body must satisfy.
pub const PET_SCHEMA: &str = "pet";
/// Name of the pet as created.
pub const CREATED_NAME: &str = "test-dog";
/// Name of the pet after the update.
pub const UPDATED_NAME: &str = "updated-dog";
/// Photo attached to the pet.
pub const PHOTO_URL: &str = "https://example.com/dog.png";
/// Name of the scenario in reports.
pub const SCENARIO_NAME: &str = "pet lifecycle";

/// Builds the pet submitted by the suite for `id`.
#[must_use]
pub fn build_pet(id: PetId, name: &str, status: PetStatus) -> Pet {
    Pet::new(id, name, status)
        .with_category(Category::new(1, "dogs"))
        .with_photo_url(PHOTO_URL)
        .with_tag(Tag::new(11, "automation"))
}

/// Poll policies of the polling steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecyclePolicies {
    /// Read after create.
    pub read: PollPolicy,
    /// Update retried after a 404.
    pub update: PollPolicy,
    /// Query by status.
    pub query: PollPolicy,
    /// Read after delete.
    pub read_after_delete: PollPolicy,
}

impl LifecyclePolicies {
    /// The timings used against the public service.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in values; the constructor validates them.
    pub fn standard() -> DomainResult<Self> {
        Ok(Self {
            read: PollPolicy::from_millis(10_000, 500)?,
            update: PollPolicy::from_millis(10_000, 1_000)?,
            query: PollPolicy::from_millis(10_000, 1_000)?,
            read_after_delete: PollPolicy::from_millis(5_000, 500)?,
        })
    }
}

/// Shared, read-only state of one lifecycle run.
#[derive(Debug, Clone)]
pub struct PetLifecycle {
    /// Session identifier.
    pub pet_id: PetId,
    /// Pet submitted by the create step.
    pub created: Pet,
    /// Replacement submitted by the update step.
    pub updated: Pet,
    api: PetStoreApi,
    verifier: ResponseVerifier,
    ok_json: Expectations,
    policies: LifecyclePolicies,
}

impl PetLifecycle {
    /// Builds the context for `pet_id`.
    #[must_use]
    pub fn new(
        pet_id: PetId,
        api: PetStoreApi,
        verifier: ResponseVerifier,
        ok_json: Expectations,
        policies: LifecyclePolicies,
    ) -> Self {
        Self {
            pet_id,
            created: build_pet(pet_id, CREATED_NAME, PetStatus::Available),
            updated: build_pet(pet_id, UPDATED_NAME, PetStatus::Sold),
            api,
            verifier,
            ok_json,
            policies,
        }
    }

    /// Poll policies in use.
    #[must_use]
    pub const fn policies(&self) -> &LifecyclePolicies {
        &self.policies
    }

    /// What a create or update response must echo for `pet`.
    #[must_use]
    pub fn echo_expectations(&self, check: &str, pet: &Pet) -> Expectations {
        Expectations::new(check)
            .with(Assertion::status(200))
            .including(&self.ok_json)
            .with(Assertion::json_eq("$.id", pet.id.get()))
            .with(Assertion::json_eq("$.name", pet.name.as_str()))
            .with(Assertion::json_eq("$.status", pet.status.as_str()))
            .with(Assertion::schema(PET_SCHEMA))
    }

    /// What a read of the created pet must return.
    #[must_use]
    pub fn read_expectations(&self) -> Expectations {
        let pet = &self.created;
        let mut expected = Expectations::new("read pet")
            .with(Assertion::status(200))
            .including(&self.ok_json)
            .with(Assertion::json_eq("$.id", pet.id.get()))
            .with(Assertion::json_eq("$.name", pet.name.as_str()))
            .with(Assertion::json_eq("$.status", pet.status.as_str()));

        if let Some(category) = &pet.category {
            expected = expected
                .with(Assertion::json_eq("$.category.id", category.id))
                .with(Assertion::json_eq("$.category.name", category.name.as_str()));
        }
        for url in &pet.photo_urls {
            expected = expected.with(Assertion::json_contains("$.photoUrls", url.as_str()));
        }
        if let Some(tag) = pet.tags.first() {
            expected = expected
                .with(Assertion::json_eq("$.tags[0].id", tag.id))
                .with(Assertion::json_eq("$.tags[0].name", tag.name.as_str()));
        }

        expected.with(Assertion::schema(PET_SCHEMA))
    }

    /// What a query by the updated status must contain.
    #[must_use]
    pub fn query_expectations(&self) -> Expectations {
        let pet = &self.updated;
        Expectations::new(format!("find {} pets", pet.status))
            .with(Assertion::status(200))
            .including(&self.ok_json)
            .with(Assertion::json_type("$", JsonKind::Array))
            .with(Assertion::json_contains("$[*].id", pet.id.get()))
            .with(Assertion::json_contains("$[*].name", pet.name.as_str()))
            .with(Assertion::json_contains("$[*].status", pet.status.as_str()))
    }
}

/// Builds the six-step lifecycle scenario.
#[must_use]
pub fn pet_lifecycle_scenario() -> Scenario<PetLifecycle> {
    Scenario::new(SCENARIO_NAME)
        .then(CreatePet)
        .then(ReadPet)
        .then(UpdatePet)
        .then(FindByStatus)
        .then(DeletePet)
        .then(ReadAfterDelete)
}

/// Use case running the lifecycle scenario to completion.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunPetLifecycle {
    runner: ScenarioRunner,
}

impl RunPetLifecycle {
    /// Creates the use case around `runner`.
    #[must_use]
    pub const fn new(runner: ScenarioRunner) -> Self {
        Self { runner }
    }

    /// Runs every step and returns the pass/fail matrix.
    pub async fn execute(&self, ctx: &PetLifecycle) -> ScenarioReport {
        tracing::info!(pet_id = %ctx.pet_id, "running pet lifecycle");
        self.runner.run(&pet_lifecycle_scenario(), ctx).await
    }
}

#[cfg(test)]
mod tests;
