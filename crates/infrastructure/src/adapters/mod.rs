//! Adapters implementing the application ports.

mod json_schema;
mod recorders;
mod reqwest_client;

pub use json_schema::JsonSchemaValidator;
pub use recorders::{MemoryRecorder, TracingRecorder};
pub use reqwest_client::ReqwestHttpClient;
