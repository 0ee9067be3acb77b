//! Data access layer and preference use-cases.
//!
//! # Responsibility
//! - Expose async CRUD entry points per entity kind over the entity store.
//! - Emulate network round-trips with a fixed per-call latency.
//! - Persist per-project view preferences with swallow-on-failure semantics.
//!
//! # Invariants
//! - Not-found is reported as `None`, never as an error.
//! - Service APIs never hold the store lock across an `.await`.

pub mod backend;
pub mod preference_store;
pub mod project_api;
pub mod task_api;
pub mod user_api;
