#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use petstore_domain::request::HttpMethod;
use petstore_domain::response::ResponseSpec;
use petstore_domain::StepStatus;
use pretty_assertions::assert_eq;
use serde_json::json;

use super::*;
use crate::ports::HttpClientError;
use crate::scenario::ScenarioStep;
use crate::session::{RequestDefaults, SessionFixtures};
use crate::test_support::{PetSchema, ScriptedClient};

const ID: i64 = 123_456_789;

fn pet_json(name: &str, status: &str) -> ResponseSpec {
    ResponseSpec::json(
        200,
        &json!({
            "id": ID,
            "name": name,
            "status": status,
            "category": {"id": 1, "name": "dogs"},
            "photoUrls": [PHOTO_URL],
            "tags": [{"id": 11, "name": "automation"}]
        }),
    )
}

fn not_found() -> ResponseSpec {
    let mut response = ResponseSpec::json(404, &json!(null));
    response.body = "Pet not found".to_string();
    response
}

fn context(client: &Arc<ScriptedClient>) -> PetLifecycle {
    let defaults = RequestDefaults::new("http://petstore.test", "/api/v3", 1_000).unwrap();
    let fixtures = SessionFixtures::new(defaults.clone());
    PetLifecycle::new(
        PetId::new(ID).unwrap(),
        PetStoreApi::new(client.clone(), defaults),
        ResponseVerifier::new(Arc::new(PetSchema)),
        fixtures.ok_json,
        LifecyclePolicies::standard().unwrap(),
    )
}

async fn run_step(step: impl ScenarioStep<PetLifecycle>, ctx: &PetLifecycle) -> String {
    step.run(ctx).await.err().map(|e| e.to_string()).unwrap_or_default()
}

#[test]
fn test_fixture_pets_share_the_session_id() {
    let client = Arc::new(ScriptedClient::default());
    let ctx = context(&client);

    assert_eq!(ctx.created.id, ctx.pet_id);
    assert_eq!(ctx.updated.id, ctx.pet_id);
    assert_eq!(ctx.created.name, CREATED_NAME);
    assert_eq!(ctx.created.status, PetStatus::Available);
    assert_eq!(ctx.updated.name, UPDATED_NAME);
    assert_eq!(ctx.updated.status, PetStatus::Sold);
    assert_eq!(ctx.updated.photo_urls, vec![PHOTO_URL.to_string()]);
}

#[test]
fn test_scenario_order() {
    assert_eq!(
        pet_lifecycle_scenario().step_names(),
        vec![
            "Create pet (POST /pet) -> 200",
            "Get pet (GET /pet/{id}) -> 200",
            "Update pet (PUT /pet) -> 200",
            "GET /pet/findByStatus?status=sold -> 200",
            "Delete pet (DELETE /pet/{id}) -> 200",
            "Get after delete -> 404",
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_create_checks_echoed_fields() {
    let client = Arc::new(ScriptedClient::default());
    client.push(pet_json("someone-else", "available"));
    let ctx = context(&client);

    let error = run_step(CreatePet, &ctx).await;
    assert!(error.contains("expected \"test-dog\", got \"someone-else\""), "{error}");
    assert_eq!(client.count(HttpMethod::Post), 1);
}

#[tokio::test(start_paused = true)]
async fn test_read_polls_until_visible() {
    let client = Arc::new(ScriptedClient::default());
    client.push(not_found());
    client.push(not_found());
    client.push(pet_json(CREATED_NAME, "available"));
    let ctx = context(&client);

    assert_eq!(run_step(ReadPet, &ctx).await, "");
    assert_eq!(client.count(HttpMethod::Get), 3);
}

#[tokio::test(start_paused = true)]
async fn test_read_exhaustion_reports_last_mismatch() {
    let client = Arc::new(ScriptedClient::default());
    client.push(not_found());
    let ctx = context(&client);

    let error = run_step(ReadPet, &ctx).await;
    assert!(error.starts_with("read pet: Expected status = 200, got 404"), "{error}");
    assert!(error.contains("gave up after 21 attempt(s)"), "{error}");
}

#[tokio::test(start_paused = true)]
async fn test_update_repolls_put_after_404() {
    let client = Arc::new(ScriptedClient::default());
    client.push(not_found());
    client.push(not_found());
    client.push(pet_json(UPDATED_NAME, "sold"));
    let ctx = context(&client);

    assert_eq!(run_step(UpdatePet, &ctx).await, "");
    assert_eq!(client.count(HttpMethod::Put), 3);
}

#[tokio::test(start_paused = true)]
async fn test_update_checks_first_response_directly() {
    let client = Arc::new(ScriptedClient::default());
    client.push(pet_json(UPDATED_NAME, "available"));
    let ctx = context(&client);

    let error = run_step(UpdatePet, &ctx).await;
    assert!(error.contains("JSON path '$.status' value mismatch"), "{error}");
    assert_eq!(client.count(HttpMethod::Put), 1);
}

#[tokio::test(start_paused = true)]
async fn test_query_waits_for_updated_pet() {
    let client = Arc::new(ScriptedClient::default());
    client.push(ResponseSpec::json(200, &json!([{"id": 1, "name": "other", "status": "sold"}])));
    client.push(ResponseSpec::json(
        200,
        &json!([
            {"id": 1, "name": "other", "status": "sold"},
            {"id": ID, "name": UPDATED_NAME, "status": "sold"}
        ]),
    ));
    let ctx = context(&client);

    assert_eq!(run_step(FindByStatus, &ctx).await, "");
    let requests = client.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].query, vec![("status".to_string(), "sold".to_string())]);
}

#[tokio::test(start_paused = true)]
async fn test_delete_is_not_polled() {
    let client = Arc::new(ScriptedClient::default());
    client.push(not_found());
    let ctx = context(&client);

    let error = run_step(DeletePet, &ctx).await;
    assert_eq!(error, "assertion failed: delete pet: Expected status = 200, got 404");
    assert_eq!(client.count(HttpMethod::Delete), 1);
}

#[tokio::test(start_paused = true)]
async fn test_read_after_delete_tolerates_stale_reads() {
    let client = Arc::new(ScriptedClient::default());
    client.push(pet_json(UPDATED_NAME, "sold"));
    client.push(pet_json(UPDATED_NAME, "sold"));
    client.push(not_found());
    let ctx = context(&client);

    assert_eq!(run_step(ReadAfterDelete, &ctx).await, "");
    assert_eq!(client.count(HttpMethod::Get), 3);
}

#[tokio::test(start_paused = true)]
async fn test_transport_error_fails_step_without_retry() {
    let client = Arc::new(ScriptedClient::default());
    client.push_error(HttpClientError::ConnectionRefused {
        host: "petstore.test".to_string(),
        port: 80,
    });
    let ctx = context(&client);

    let error = run_step(ReadPet, &ctx).await;
    assert_eq!(
        error,
        "transport error on attempt 1: connection refused by petstore.test:80"
    );
    assert_eq!(client.count(HttpMethod::Get), 1);
}

#[tokio::test(start_paused = true)]
async fn test_full_run_produces_passing_matrix() {
    let client = Arc::new(ScriptedClient::default());
    client.push(pet_json(CREATED_NAME, "available"));
    client.push(pet_json(CREATED_NAME, "available"));
    client.push(pet_json(UPDATED_NAME, "sold"));
    client.push(ResponseSpec::json(
        200,
        &json!([{"id": ID, "name": UPDATED_NAME, "status": "sold"}]),
    ));
    client.push(ResponseSpec::json(200, &json!({"message": ID.to_string()})));
    client.push(not_found());
    let ctx = context(&client);

    let report = RunPetLifecycle::default().execute(&ctx).await;

    assert!(report.all_passed(), "{:?}", report.steps);
    assert_eq!(report.total, 6);
    assert_eq!(report.scenario, SCENARIO_NAME);
    let methods: Vec<_> = client.requests().iter().map(|r| r.method).collect();
    assert_eq!(
        methods,
        vec![
            HttpMethod::Post,
            HttpMethod::Get,
            HttpMethod::Put,
            HttpMethod::Get,
            HttpMethod::Delete,
            HttpMethod::Get,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_fail_fast_run_skips_after_first_failure() {
    let client = Arc::new(ScriptedClient::default());
    client.push(not_found());
    let ctx = context(&client);

    let report = RunPetLifecycle::new(ScenarioRunner::new().with_stop_on_failure(true))
        .execute(&ctx)
        .await;

    let statuses: Vec<_> = report.steps.iter().map(|s| s.status).collect();
    assert_eq!(statuses[0], StepStatus::Failed);
    assert!(statuses[1..].iter().all(|s| *s == StepStatus::Skipped));
    assert_eq!(client.requests().len(), 1);
}
