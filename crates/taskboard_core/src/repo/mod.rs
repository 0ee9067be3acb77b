//! Repository contracts and SQLite implementations.
//!
//! # Invariants
//! - Repository APIs return raw stored text; (de)serialization belongs to
//!   the service layer.
//! - Repository errors always carry the underlying storage error.

pub mod preference_repo;
