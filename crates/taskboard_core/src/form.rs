//! Create/edit form models with required-field checks.
//!
//! # Responsibility
//! - Turn raw form input into `NewProject`, `NewTask` or `TaskPatch`.
//! - Report every missing required field at once.
//!
//! # Invariants
//! - Services never call into this module; validation is the caller's job.
//! - Blank optional text (description) is stored as `None`.

use crate::model::project::{NewProject, ProjectId};
use crate::model::task::{NewTask, Task, TaskPatch, TaskPriority, TaskStatus};
use crate::model::user::User;
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// A single failed required-field check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    ProjectNameRequired,
    TitleRequired,
    DueDateRequired,
}

impl FormError {
    /// Name of the offending form field.
    pub fn field(self) -> &'static str {
        match self {
            Self::ProjectNameRequired => "name",
            Self::TitleRequired => "title",
            Self::DueDateRequired => "due_date",
        }
    }
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProjectNameRequired => f.write_str("Project name is required"),
            Self::TitleRequired => f.write_str("Title is required"),
            Self::DueDateRequired => f.write_str("Due date is required"),
        }
    }
}

impl Error for FormError {}

/// Every failed check from one submission, in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormErrors(Vec<FormError>);

impl FormErrors {
    pub fn errors(&self) -> &[FormError] {
        &self.0
    }

    pub fn contains(&self, error: FormError) -> bool {
        self.0.contains(&error)
    }
}

impl Display for FormErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, error) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl Error for FormErrors {}

fn check(errors: Vec<FormError>) -> Result<(), FormErrors> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(FormErrors(errors))
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Input for the "new project" dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectForm {
    pub name: String,
    pub description: String,
}

impl ProjectForm {
    pub fn into_new_project(self) -> Result<NewProject, FormErrors> {
        if self.name.trim().is_empty() {
            return Err(FormErrors(vec![FormError::ProjectNameRequired]));
        }
        Ok(NewProject {
            name: self.name,
            description: non_blank(self.description),
        })
    }
}

/// Input for the create/edit task page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
    pub assigned_users: Vec<User>,
}

impl TaskForm {
    /// Pre-fills the form from an existing task for editing.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            status: task.status,
            priority: task.priority,
            due_date: Some(task.due_date),
            assigned_users: task.assigned_users.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = Vec::new();
        if self.title.trim().is_empty() {
            errors.push(FormError::TitleRequired);
        }
        if self.due_date.is_none() {
            errors.push(FormError::DueDateRequired);
        }
        check(errors)
    }

    /// Adds a snapshot of `user` to the assignees, or removes it when a user
    /// with the same id is already assigned.
    pub fn toggle_assignee(&mut self, user: &User) {
        if let Some(index) = self
            .assigned_users
            .iter()
            .position(|assigned| assigned.id == user.id)
        {
            self.assigned_users.remove(index);
        } else {
            self.assigned_users.push(user.clone());
        }
    }

    pub fn into_new_task(self, project_id: ProjectId) -> Result<NewTask, FormErrors> {
        self.validate()?;
        let due_date = self
            .due_date
            .ok_or_else(|| FormErrors(vec![FormError::DueDateRequired]))?;
        Ok(NewTask {
            project_id,
            title: self.title,
            description: non_blank(self.description),
            status: self.status,
            priority: self.priority,
            due_date,
            assigned_users: self.assigned_users,
        })
    }

    /// Builds a patch that overwrites every editable task field.
    pub fn into_patch(self) -> Result<TaskPatch, FormErrors> {
        self.validate()?;
        Ok(TaskPatch {
            project_id: None,
            title: Some(self.title),
            description: Some(non_blank(self.description)),
            status: Some(self.status),
            priority: Some(self.priority),
            due_date: self.due_date,
            assigned_users: Some(self.assigned_users),
        })
    }
}
