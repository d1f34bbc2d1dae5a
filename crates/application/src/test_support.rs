//! In-memory fakes for unit tests.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;
use petstore_domain::{Exchange, request::RequestSpec, response::ResponseSpec};
use serde_json::Value;

use crate::ports::{ExchangeRecorder, HttpClient, HttpClientError, SchemaError, SchemaValidator};

/// Replies with queued responses in order and remembers every request.
///
/// Once the queue is empty the last reply is repeated.
#[derive(Default)]
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Result<ResponseSpec, HttpClientError>>>,
    last: Mutex<Option<Result<ResponseSpec, HttpClientError>>>,
    requests: Mutex<Vec<RequestSpec>>,
}

impl ScriptedClient {
    pub fn push(&self, response: ResponseSpec) {
        self.replies.lock().push_back(Ok(response));
    }

    pub fn push_error(&self, error: HttpClientError) {
        self.replies.lock().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<RequestSpec> {
        self.requests.lock().clone()
    }

    pub fn count(&self, method: petstore_domain::request::HttpMethod) -> usize {
        self.requests.lock().iter().filter(|r| r.method == method).count()
    }
}

#[async_trait]
impl HttpClient for ScriptedClient {
    async fn execute(&self, request: &RequestSpec) -> Result<ResponseSpec, HttpClientError> {
        self.requests.lock().push(request.clone());
        let next = self.replies.lock().pop_front();
        let mut last = self.last.lock();
        if let Some(reply) = next {
            *last = Some(reply);
        }
        last.clone()
            .unwrap_or_else(|| Err(HttpClientError::Other("no scripted reply".to_string())))
    }
}

/// Accepts any object carrying a `name`, rejects everything else.
pub struct PetSchema;

impl SchemaValidator for PetSchema {
    fn validate(&self, schema: &str, instance: &Value) -> Result<(), SchemaError> {
        if schema != "pet" {
            return Err(SchemaError::UnknownSchema(schema.to_string()));
        }
        match instance.get("name") {
            Some(Value::String(_)) => Ok(()),
            _ => Err(SchemaError::Violations(vec![
                "\"name\" is a required property".to_string(),
            ])),
        }
    }
}

/// Collects exchanges.
#[derive(Default)]
pub struct MemoryLog {
    exchanges: Mutex<Vec<Exchange>>,
}

impl MemoryLog {
    pub fn exchanges(&self) -> Vec<Exchange> {
        self.exchanges.lock().clone()
    }
}

impl ExchangeRecorder for MemoryLog {
    fn record(&self, exchange: &Exchange) {
        self.exchanges.lock().push(exchange.clone());
    }
}
