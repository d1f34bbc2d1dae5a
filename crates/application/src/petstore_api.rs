//! Typed access to the Pet Store endpoints.
//!
//! Each call builds a [`RequestSpec`] from the session defaults, executes it
//! through the [`HttpClient`] port and hands the exchange to every
//! registered [`ExchangeRecorder`]. Responses come back unjudged; callers
//! decide what they expect.

use std::sync::Arc;

use petstore_domain::{
    Exchange, Pet, PetId, PetStatus,
    request::{HttpMethod, PathTemplate, RequestBody, RequestSpec},
    response::ResponseSpec,
};

use crate::ports::{ExchangeRecorder, HttpClient, HttpClientError};
use crate::session::RequestDefaults;

const PET_PATH: &str = "/pet";
const PET_BY_ID_PATH: &str = "/pet/{id}";
const FIND_BY_STATUS_PATH: &str = "/pet/findByStatus";

/// Client for the pet resource.
#[derive(Clone)]
pub struct PetStoreApi {
    client: Arc<dyn HttpClient>,
    defaults: RequestDefaults,
    recorders: Vec<Arc<dyn ExchangeRecorder>>,
}

impl PetStoreApi {
    /// Creates an API client over `client`.
    #[must_use]
    pub fn new(client: Arc<dyn HttpClient>, defaults: RequestDefaults) -> Self {
        Self {
            client,
            defaults,
            recorders: Vec::new(),
        }
    }

    /// Registers a recorder (builder pattern).
    #[must_use]
    pub fn with_recorder(mut self, recorder: Arc<dyn ExchangeRecorder>) -> Self {
        self.recorders.push(recorder);
        self
    }

    /// `POST /pet`
    ///
    /// # Errors
    ///
    /// Returns a transport error if the exchange fails.
    pub async fn create(&self, pet: &Pet) -> Result<ResponseSpec, HttpClientError> {
        let request = self
            .defaults
            .request("Create pet", HttpMethod::Post, &PathTemplate::new(PET_PATH), &[])?
            .with_body(RequestBody::to_json(pet)?);
        self.send(&request).await
    }

    /// `GET /pet/{id}`
    ///
    /// # Errors
    ///
    /// Returns a transport error if the exchange fails.
    pub async fn get(&self, id: PetId) -> Result<ResponseSpec, HttpClientError> {
        let id = id.to_string();
        let request = self.defaults.request(
            "Get pet",
            HttpMethod::Get,
            &PathTemplate::new(PET_BY_ID_PATH),
            &[("id", id.as_str())],
        )?;
        self.send(&request).await
    }

    /// `PUT /pet`
    ///
    /// # Errors
    ///
    /// Returns a transport error if the exchange fails.
    pub async fn update(&self, pet: &Pet) -> Result<ResponseSpec, HttpClientError> {
        let request = self
            .defaults
            .request("Update pet", HttpMethod::Put, &PathTemplate::new(PET_PATH), &[])?
            .with_body(RequestBody::to_json(pet)?);
        self.send(&request).await
    }

    /// `GET /pet/findByStatus?status={status}`
    ///
    /// # Errors
    ///
    /// Returns a transport error if the exchange fails.
    pub async fn find_by_status(&self, status: PetStatus) -> Result<ResponseSpec, HttpClientError> {
        let request = self
            .defaults
            .request(
                "Find pets by status",
                HttpMethod::Get,
                &PathTemplate::new(FIND_BY_STATUS_PATH),
                &[],
            )?
            .with_query("status", status.as_str());
        self.send(&request).await
    }

    /// `DELETE /pet/{id}`
    ///
    /// # Errors
    ///
    /// Returns a transport error if the exchange fails.
    pub async fn delete(&self, id: PetId) -> Result<ResponseSpec, HttpClientError> {
        let id = id.to_string();
        let request = self.defaults.request(
            "Delete pet",
            HttpMethod::Delete,
            &PathTemplate::new(PET_BY_ID_PATH),
            &[("id", id.as_str())],
        )?;
        self.send(&request).await
    }

    async fn send(&self, request: &RequestSpec) -> Result<ResponseSpec, HttpClientError> {
        let response = self.client.execute(request).await?;
        if !self.recorders.is_empty() {
            let exchange = Exchange::new(request, &response);
            for recorder in &self.recorders {
                recorder.record(&exchange);
            }
        }
        Ok(response)
    }
}

impl std::fmt::Debug for PetStoreApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PetStoreApi")
            .field("endpoint", &self.defaults.endpoint())
            .field("recorders", &self.recorders.len())
            .finish_non_exhaustive()
    }
}
