//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the suite and the outside world.
//! Each port is a trait implemented by adapters in the infrastructure layer.

mod exchange_recorder;
mod http_client;
mod schema_validator;

pub use exchange_recorder::ExchangeRecorder;
pub use http_client::{HttpClient, HttpClientError};
pub use schema_validator::{SchemaError, SchemaValidator};
