//! Petstore Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus configuration loading and
//! report output.

pub mod adapters;
pub mod config;
pub mod report;

pub use adapters::{JsonSchemaValidator, MemoryRecorder, ReqwestHttpClient, TracingRecorder};
pub use config::{ConfigError, SuiteConfig};
pub use report::{ReportError, RunReport, render_matrix, to_json_stable, write_report};
