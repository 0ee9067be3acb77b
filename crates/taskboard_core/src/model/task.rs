//! Task records.
//!
//! # Responsibility
//! - Define the task record and its status/priority vocabularies.
//! - Provide the stable wire strings used by JSON and stored preferences.
//!
//! # Invariants
//! - `project_id` referenced an existing project when the task was created;
//!   it is not re-checked afterwards.
//! - `assigned_users` holds copies taken at assignment time. Later user edits
//!   do not reach tasks that already embed the old copy.

use crate::model::project::ProjectId;
use crate::model::user::User;
use crate::model::{ParseValueError, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

pub type TaskId = Uuid;

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Created but not started.
    #[default]
    Todo,
    /// Work is in progress.
    InProgress,
    /// Completed.
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [Self::Todo, Self::InProgress, Self::Done];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Done => "done",
        }
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ParseValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "todo" => Ok(Self::Todo),
            "in-progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            other => Err(ParseValueError::new("task status", other)),
        }
    }
}

/// Task urgency. Variants are declared in ascending severity so the derived
/// `Ord` ranks `High` above `Medium` above `Low`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl Display for TaskPriority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = ParseValueError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(ParseValueError::new("task priority", other)),
        }
    }
}

/// A unit of work owned by one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub project_id: ProjectId,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    /// Serialized as `due_date` to match the client wire shape.
    #[serde(rename = "due_date")]
    pub due_date: NaiveDate,
    pub assigned_users: Vec<User>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fields supplied when creating a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub project_id: ProjectId,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[serde(rename = "due_date")]
    pub due_date: NaiveDate,
    pub assigned_users: Vec<User>,
}

/// Partial update for a task. `None` keeps the current value.
///
/// Every present field is overwritten as-is; nothing is validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub project_id: Option<ProjectId>,
    pub title: Option<String>,
    /// `Some(None)` clears the description.
    pub description: Option<Option<String>>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<NaiveDate>,
    pub assigned_users: Option<Vec<User>>,
}

impl TaskPatch {
    /// Patch that only changes the status.
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl Task {
    pub(crate) fn from_new(id: TaskId, new: NewTask, now: Timestamp) -> Self {
        Self {
            id,
            project_id: new.project_id,
            title: new.title,
            description: new.description,
            status: new.status,
            priority: new.priority,
            due_date: new.due_date,
            assigned_users: new.assigned_users,
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn apply(&mut self, patch: TaskPatch, now: Timestamp) {
        if let Some(project_id) = patch.project_id {
            self.project_id = project_id;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(assigned_users) = patch.assigned_users {
            self.assigned_users = assigned_users;
        }
        self.updated_at = now;
    }

    /// Returns whether the task is past due on `today`.
    ///
    /// Tasks due today are not overdue, and finished tasks never are.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status != TaskStatus::Done && self.due_date < today
    }
}
