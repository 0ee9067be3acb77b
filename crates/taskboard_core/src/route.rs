//! Client route table.
//!
//! Paths map to the records each view requests. Unknown paths and malformed
//! identifiers fall back to the project list.

use crate::model::project::ProjectId;
use crate::model::task::TaskId;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Projects,
    /// `/projects/:projectId`
    ProjectDetails { project_id: ProjectId },
    /// `/projects/:projectId/tasks/new`
    NewTask { project_id: ProjectId },
    /// `/projects/:projectId/tasks/:taskId/edit`
    EditTask {
        project_id: ProjectId,
        task_id: TaskId,
    },
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|segment| !segment.is_empty()).collect();

        let parsed = match segments.as_slice() {
            ["projects", project] => {
                parse_id(project).map(|project_id| Self::ProjectDetails { project_id })
            }
            ["projects", project, "tasks", "new"] => {
                parse_id(project).map(|project_id| Self::NewTask { project_id })
            }
            ["projects", project, "tasks", task, "edit"] => parse_id(project)
                .zip(parse_id(task))
                .map(|(project_id, task_id)| Self::EditTask {
                    project_id,
                    task_id,
                }),
            _ => None,
        };
        parsed.unwrap_or(Self::Projects)
    }

    /// Project the route is scoped to, if any.
    pub fn project_id(&self) -> Option<ProjectId> {
        match self {
            Self::Projects => None,
            Self::ProjectDetails { project_id }
            | Self::NewTask { project_id }
            | Self::EditTask { project_id, .. } => Some(*project_id),
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Projects => f.write_str("/"),
            Self::ProjectDetails { project_id } => write!(f, "/projects/{project_id}"),
            Self::NewTask { project_id } => write!(f, "/projects/{project_id}/tasks/new"),
            Self::EditTask {
                project_id,
                task_id,
            } => write!(f, "/projects/{project_id}/tasks/{task_id}/edit"),
        }
    }
}

fn parse_id(segment: &str) -> Option<Uuid> {
    Uuid::parse_str(segment).ok()
}
