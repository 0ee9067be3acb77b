//! Project CRUD over the shared store.
//!
//! # Invariants
//! - `delete` removes the project and its tasks in one store mutation.
//! - `delete` reports success whether or not the project existed.

use crate::model::project::{NewProject, Project, ProjectId, ProjectPatch};
use crate::service::backend::{found_status, Backend};
use log::{debug, info};

#[derive(Debug, Clone)]
pub struct ProjectApi {
    backend: Backend,
}

impl ProjectApi {
    pub(crate) fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// Lists all projects in creation order.
    pub async fn list(&self) -> Vec<Project> {
        let projects = self
            .backend
            .round_trip(|store| store.projects().to_vec())
            .await;
        debug!(
            "event=project_list module=service status=ok count={}",
            projects.len()
        );
        projects
    }

    pub async fn get_by_id(&self, id: ProjectId) -> Option<Project> {
        let project = self
            .backend
            .round_trip(|store| store.project(id).cloned())
            .await;
        debug!(
            "event=project_get module=service status={} id={id}",
            found_status(project.is_some())
        );
        project
    }

    /// Creates a project with a fresh id and matching create/update stamps.
    pub async fn create(&self, project: NewProject) -> Project {
        let created = self
            .backend
            .round_trip(|store| store.insert_project(project))
            .await;
        info!(
            "event=project_create module=service status=ok id={}",
            created.id
        );
        created
    }

    /// Overwrites the fields present in `patch` and refreshes `updated_at`.
    ///
    /// Returns `None` when no project has `id`.
    pub async fn update(&self, id: ProjectId, patch: ProjectPatch) -> Option<Project> {
        let updated = self
            .backend
            .round_trip(|store| store.update_project(id, patch))
            .await;
        info!(
            "event=project_update module=service status={} id={id}",
            found_status(updated.is_some())
        );
        updated
    }

    /// Deletes the project and every task that belongs to it.
    pub async fn delete(&self, id: ProjectId) -> bool {
        let removed_tasks = self
            .backend
            .round_trip(|store| store.remove_project(id))
            .await;
        info!(
            "event=project_delete module=service status=ok id={id} cascaded_tasks={removed_tasks}"
        );
        true
    }
}
