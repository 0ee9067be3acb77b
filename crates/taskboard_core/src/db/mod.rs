//! SQLite storage for remembered view preferences.
//!
//! # Responsibility
//! - Open preference connections (file-backed or in-memory).
//! - Bring the `preferences` table up to the schema this build expects.
//!
//! # Invariants
//! - Every connection handed out has passed `ensure_schema`.
//! - Failures surface as `RepoError`, the same type the repository returns.

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory};
pub use schema::{ensure_schema, schema_version, SchemaStatus};
