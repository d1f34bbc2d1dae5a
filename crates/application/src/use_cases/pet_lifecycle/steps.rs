//! The six lifecycle steps.

use async_trait::async_trait;
use petstore_domain::{Assertion, Expectations};

use super::PetLifecycle;
use crate::error::ApplicationResult;
use crate::retry::retry_until;
use crate::scenario::ScenarioStep;

/// `POST /pet`, checked once.
#[derive(Debug, Clone, Copy)]
pub struct CreatePet;

#[async_trait]
impl ScenarioStep<PetLifecycle> for CreatePet {
    fn name(&self) -> &str {
        "Create pet (POST /pet) -> 200"
    }

    async fn run(&self, ctx: &PetLifecycle) -> ApplicationResult<()> {
        let expected = ctx.echo_expectations("create pet", &ctx.created);
        let response = ctx.api.create(&ctx.created).await?;
        ctx.verifier.check(&expected, &response)?;
        Ok(())
    }
}

/// `GET /pet/{id}`, polled until the created pet is fully visible.
#[derive(Debug, Clone, Copy)]
pub struct ReadPet;

#[async_trait]
impl ScenarioStep<PetLifecycle> for ReadPet {
    fn name(&self) -> &str {
        "Get pet (GET /pet/{id}) -> 200"
    }

    async fn run(&self, ctx: &PetLifecycle) -> ApplicationResult<()> {
        let expected = &ctx.read_expectations();
        retry_until(ctx.policies.read, move || async move {
            let response = ctx.api.get(ctx.pet_id).await?;
            ctx.verifier.check(expected, &response)
        })
        .await?;
        Ok(())
    }
}

/// `PUT /pet`. A 404 means the create is not visible to the node serving
/// the update yet, so the PUT itself is re-polled.
#[derive(Debug, Clone, Copy)]
pub struct UpdatePet;

#[async_trait]
impl ScenarioStep<PetLifecycle> for UpdatePet {
    fn name(&self) -> &str {
        "Update pet (PUT /pet) -> 200"
    }

    async fn run(&self, ctx: &PetLifecycle) -> ApplicationResult<()> {
        let expected = &ctx.echo_expectations("update pet", &ctx.updated);
        let first = ctx.api.update(&ctx.updated).await?;

        if first.status != 404 {
            ctx.verifier.check(expected, &first)?;
            return Ok(());
        }

        tracing::info!(pet_id = %ctx.pet_id, "update returned 404, polling the PUT");
        retry_until(ctx.policies.update, move || async move {
            let response = ctx.api.update(&ctx.updated).await?;
            ctx.verifier.check(expected, &response)
        })
        .await?;
        Ok(())
    }
}

/// `GET /pet/findByStatus`, polled until the updated pet shows up.
#[derive(Debug, Clone, Copy)]
pub struct FindByStatus;

#[async_trait]
impl ScenarioStep<PetLifecycle> for FindByStatus {
    fn name(&self) -> &str {
        "GET /pet/findByStatus?status=sold -> 200"
    }

    async fn run(&self, ctx: &PetLifecycle) -> ApplicationResult<()> {
        let expected = &ctx.query_expectations();
        let status = ctx.updated.status;
        retry_until(ctx.policies.query, move || async move {
            let response = ctx.api.find_by_status(status).await?;
            ctx.verifier.check(expected, &response)
        })
        .await?;
        Ok(())
    }
}

/// `DELETE /pet/{id}`, checked once.
#[derive(Debug, Clone, Copy)]
pub struct DeletePet;

#[async_trait]
impl ScenarioStep<PetLifecycle> for DeletePet {
    fn name(&self) -> &str {
        "Delete pet (DELETE /pet/{id}) -> 200"
    }

    async fn run(&self, ctx: &PetLifecycle) -> ApplicationResult<()> {
        let expected = Expectations::new("delete pet").with(Assertion::status(200));
        let response = ctx.api.delete(ctx.pet_id).await?;
        ctx.verifier.check(&expected, &response)?;
        Ok(())
    }
}

/// `GET /pet/{id}`, polled until the pet is gone.
#[derive(Debug, Clone, Copy)]
pub struct ReadAfterDelete;

#[async_trait]
impl ScenarioStep<PetLifecycle> for ReadAfterDelete {
    fn name(&self) -> &str {
        "Get after delete -> 404"
    }

    async fn run(&self, ctx: &PetLifecycle) -> ApplicationResult<()> {
        let expected = &Expectations::new("pet deleted").with(Assertion::status(404));
        retry_until(ctx.policies.read_after_delete, move || async move {
            let response = ctx.api.get(ctx.pet_id).await?;
            ctx.verifier.check(expected, &response)
        })
        .await?;
        Ok(())
    }
}
