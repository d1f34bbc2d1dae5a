//! Petstore Application - Engines, ports and use cases
//!
//! This crate holds the retry-until-assert engine, the ordered scenario
//! runner, response verification and the pet lifecycle use case. All I/O
//! goes through the ports in [`ports`].

pub mod error;
pub mod petstore_api;
pub mod ports;
pub mod retry;
pub mod scenario;
pub mod session;
pub mod use_cases;
pub mod verify;

#[cfg(test)]
mod test_support;

pub use error::{ApplicationError, ApplicationResult};
pub use petstore_api::PetStoreApi;
pub use retry::{ProbeError, RetryError, retry_until};
pub use scenario::{Scenario, ScenarioRunner, ScenarioStep};
pub use session::{GENERATED_ID_RANGE, RequestDefaults, SessionFixtures, resolve_pet_id};
pub use verify::ResponseVerifier;
