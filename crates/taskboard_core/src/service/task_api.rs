//! Task CRUD over the shared store.

use crate::model::project::ProjectId;
use crate::model::task::{NewTask, Task, TaskId, TaskPatch};
use crate::service::backend::{found_status, Backend};
use log::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct TaskApi {
    backend: Backend,
}

impl TaskApi {
    pub(crate) fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// Lists every task across all projects in creation order.
    pub async fn list(&self) -> Vec<Task> {
        let tasks = self.backend.round_trip(|store| store.tasks().to_vec()).await;
        debug!(
            "event=task_list module=service status=ok count={}",
            tasks.len()
        );
        tasks
    }

    /// Lists the tasks of one project, in creation order.
    ///
    /// An unknown project yields an empty list.
    pub async fn get_by_project_id(&self, project_id: ProjectId) -> Vec<Task> {
        let tasks = self
            .backend
            .round_trip(|store| store.tasks_for_project(project_id))
            .await;
        debug!(
            "event=task_list module=service status=ok project_id={project_id} count={}",
            tasks.len()
        );
        tasks
    }

    pub async fn get_by_id(&self, id: TaskId) -> Option<Task> {
        let task = self
            .backend
            .round_trip(|store| store.task(id).cloned())
            .await;
        debug!(
            "event=task_get module=service status={} id={id}",
            found_status(task.is_some())
        );
        task
    }

    /// Creates a task with a fresh id.
    ///
    /// The owning project is expected to exist; a dangling `project_id` is
    /// stored anyway and logged.
    pub async fn create(&self, task: NewTask) -> Task {
        let (created, project_known) = self
            .backend
            .round_trip(|store| {
                let project_known = store.project(task.project_id).is_some();
                (store.insert_task(task), project_known)
            })
            .await;
        if project_known {
            info!(
                "event=task_create module=service status=ok id={} project_id={}",
                created.id, created.project_id
            );
        } else {
            warn!(
                "event=task_create module=service status=orphan id={} project_id={}",
                created.id, created.project_id
            );
        }
        created
    }

    /// Overwrites the fields present in `patch` and refreshes `updated_at`.
    ///
    /// Returns `None` when no task has `id`.
    pub async fn update(&self, id: TaskId, patch: TaskPatch) -> Option<Task> {
        let updated = self
            .backend
            .round_trip(|store| store.update_task(id, patch))
            .await;
        info!(
            "event=task_update module=service status={} id={id}",
            found_status(updated.is_some())
        );
        updated
    }

    pub async fn delete(&self, id: TaskId) -> bool {
        self.backend.round_trip(|store| store.remove_task(id)).await;
        info!("event=task_delete module=service status=ok id={id}");
        true
    }
}
