//! Project records.
//!
//! # Invariants
//! - `name` is required by callers (see `form::ProjectForm`); the store does
//!   not re-check it.
//! - Deleting a project removes every task whose `project_id` matches.

use crate::model::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ProjectId = Uuid;

/// A named container of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    /// Refreshed on every successful update.
    pub updated_at: Timestamp,
}

/// Fields supplied when creating a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
}

/// Partial update for a project.
///
/// `description: Some(None)` clears the description, `None` keeps it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

impl Project {
    pub(crate) fn from_new(id: ProjectId, new: NewProject, now: Timestamp) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn apply(&mut self, patch: ProjectPatch, now: Timestamp) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        self.updated_at = now;
    }
}
