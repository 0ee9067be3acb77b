//! Core of the taskboard task-management client.
//! Holds the session data, the simulated data access layer, the task view
//! pipeline and persisted view preferences.

pub mod config;
pub mod db;
pub mod filter;
pub mod form;
pub mod logging;
pub mod model;
pub mod repo;
pub mod route;
pub mod service;
pub mod store;

pub use config::{AppConfig, BackendConfig, ConfigError, LoggingConfig, DEFAULT_LATENCY_MS};
pub use filter::{Filter, PriorityFilter, SortKey, StatusFilter, TaskViewCriteria};
pub use form::{FormError, FormErrors, ProjectForm, TaskForm};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::project::{NewProject, Project, ProjectId, ProjectPatch};
pub use model::task::{NewTask, Task, TaskId, TaskPatch, TaskPriority, TaskStatus};
pub use model::user::{NewUser, User, UserId, UserPatch};
pub use model::{ParseValueError, Timestamp};
pub use repo::preference_repo::{
    PreferenceRepository, RepoError, RepoResult, SqlitePreferenceRepository,
};
pub use route::Route;
pub use service::backend::Backend;
pub use service::preference_store::{PreferenceStore, STORAGE_PREFIX};
pub use service::project_api::ProjectApi;
pub use service::task_api::TaskApi;
pub use service::user_api::UserApi;
pub use store::EntityStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
