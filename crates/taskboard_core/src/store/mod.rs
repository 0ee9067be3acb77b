//! In-memory entity store.
//!
//! # Responsibility
//! - Hold the user, project and task collections for one session.
//! - Apply record-level mutations on behalf of the service layer.
//!
//! # Invariants
//! - Collections keep insertion order; mutations never re-sort them.
//! - Identifiers are fresh v4 UUIDs and never reused.
//! - `updated_at` stamps handed out by one store are strictly increasing.
//! - Deleting a project removes its tasks within the same call.
//!
//! Mutators are crate-private: callers go through `service::Backend`.

use crate::model::project::{NewProject, Project, ProjectId, ProjectPatch};
use crate::model::task::{NewTask, Task, TaskId, TaskPatch};
use crate::model::user::{NewUser, User, UserId, UserPatch};
use crate::model::Timestamp;
use chrono::{Duration, Utc};
use uuid::Uuid;

mod fixtures;

pub use fixtures::{MOBILE_PROJECT_ID, WEBSITE_PROJECT_ID};

/// Session-scoped collections of users, projects and tasks.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    users: Vec<User>,
    projects: Vec<Project>,
    tasks: Vec<Task>,
    clock: StoreClock,
}

/// Hands out wall-clock stamps, nudged forward when the clock has not moved
/// since the previous stamp.
#[derive(Debug, Clone, Copy, Default)]
struct StoreClock {
    last: Option<Timestamp>,
}

impl StoreClock {
    fn tick(&mut self) -> Timestamp {
        let now = Utc::now();
        let stamp = match self.last {
            Some(last) if now <= last => last + Duration::milliseconds(1),
            _ => now,
        };
        self.last = Some(stamp);
        stamp
    }
}

impl EntityStore {
    /// Creates a store with no records.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a store seeded with the demo fixture data.
    pub fn seeded() -> Self {
        let (users, projects, tasks) = fixtures::records();
        Self::from_records(users, projects, tasks)
    }

    /// Creates a store from caller-provided records, kept in the given order.
    ///
    /// Stamps issued later are never earlier than the newest `updated_at`
    /// among the provided records.
    pub fn from_records(users: Vec<User>, projects: Vec<Project>, tasks: Vec<Task>) -> Self {
        let last = projects
            .iter()
            .map(|project| project.updated_at)
            .chain(tasks.iter().map(|task| task.updated_at))
            .max();
        Self {
            users,
            projects,
            tasks,
            clock: StoreClock { last },
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub(crate) fn user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    pub(crate) fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    pub(crate) fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub(crate) fn tasks_for_project(&self, project_id: ProjectId) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| task.project_id == project_id)
            .cloned()
            .collect()
    }

    pub(crate) fn insert_user(&mut self, new: NewUser) -> User {
        let user = User::from_new(Uuid::new_v4(), new);
        self.users.push(user.clone());
        user
    }

    pub(crate) fn update_user(&mut self, id: UserId, patch: UserPatch) -> Option<User> {
        let user = self.users.iter_mut().find(|user| user.id == id)?;
        user.apply(patch);
        Some(user.clone())
    }

    pub(crate) fn remove_user(&mut self, id: UserId) {
        self.users.retain(|user| user.id != id);
    }

    pub(crate) fn insert_project(&mut self, new: NewProject) -> Project {
        let now = self.clock.tick();
        let project = Project::from_new(Uuid::new_v4(), new, now);
        self.projects.push(project.clone());
        project
    }

    pub(crate) fn update_project(&mut self, id: ProjectId, patch: ProjectPatch) -> Option<Project> {
        let index = self.projects.iter().position(|project| project.id == id)?;
        let now = self.clock.tick();
        let project = &mut self.projects[index];
        project.apply(patch, now);
        Some(project.clone())
    }

    /// Removes the project and every task that references it.
    ///
    /// Returns the number of tasks removed alongside the project.
    pub(crate) fn remove_project(&mut self, id: ProjectId) -> usize {
        self.projects.retain(|project| project.id != id);
        let before = self.tasks.len();
        self.tasks.retain(|task| task.project_id != id);
        before - self.tasks.len()
    }

    pub(crate) fn insert_task(&mut self, new: NewTask) -> Task {
        let now = self.clock.tick();
        let task = Task::from_new(Uuid::new_v4(), new, now);
        self.tasks.push(task.clone());
        task
    }

    pub(crate) fn update_task(&mut self, id: TaskId, patch: TaskPatch) -> Option<Task> {
        let index = self.tasks.iter().position(|task| task.id == id)?;
        let now = self.clock.tick();
        let task = &mut self.tasks[index];
        task.apply(patch, now);
        Some(task.clone())
    }

    pub(crate) fn remove_task(&mut self, id: TaskId) {
        self.tasks.retain(|task| task.id != id);
    }
}
