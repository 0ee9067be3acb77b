//! Domain model for users, projects and tasks.
//!
//! # Responsibility
//! - Define the records held by the entity store and returned by services.
//! - Define partial-update shapes used by `update` operations.
//!
//! # Invariants
//! - Every record is identified by a stable UUID that is never reassigned.
//! - `created_at` never changes after creation.
//! - Task assignees are snapshots, not live references to `User` records.

use chrono::{DateTime, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod project;
pub mod task;
pub mod user;

/// Wall-clock instant used for `created_at` / `updated_at` stamps.
pub type Timestamp = DateTime<Utc>;

/// Error returned when a wire string does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseValueError {
    kind: &'static str,
    value: String,
}

impl ParseValueError {
    pub(crate) fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// Name of the value family that failed to parse (`task status`, ...).
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

impl Display for ParseValueError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {} `{}`", self.kind, self.value)
    }
}

impl Error for ParseValueError {}
