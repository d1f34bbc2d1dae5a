//! Application use cases (business logic orchestration).

pub mod pet_lifecycle;

pub use pet_lifecycle::{
    LifecyclePolicies, PetLifecycle, RunPetLifecycle, build_pet, pet_lifecycle_scenario,
};
