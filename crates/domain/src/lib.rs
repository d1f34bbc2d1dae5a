//! Petstore Domain - Core types
//!
//! This crate defines the domain model of the Pet Store end-to-end suite:
//! the entities under test, request/response shapes, assertion vocabulary,
//! polling policy and run reports. All types here are pure Rust with no I/O.

pub mod error;
pub mod exchange;
pub mod expectation;
pub mod pet;
pub mod poll;
pub mod request;
pub mod response;
pub mod scenario;

pub use error::{DomainError, DomainResult};
pub use exchange::Exchange;
pub use expectation::{
    Assertion, AssertionFailure, AssertionResult, Expectations, JsonKind, Verdict,
};
pub use pet::{Category, Pet, PetId, PetStatus, Tag};
pub use poll::PollPolicy;
pub use scenario::{ScenarioReport, StepOutcome, StepStatus};
