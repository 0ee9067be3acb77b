//! Namespaced, best-effort preference persistence.
//!
//! # Responsibility
//! - Serialize preference values to JSON under a fixed key prefix.
//! - Remember per-project filter and sort choices for task views.
//!
//! # Invariants
//! - No method returns an error or panics: failures are logged and the call
//!   degrades to a no-op (writes) or to the default (reads).
//! - Unreadable stored values are treated as absent.
//! - `clear` only touches keys under this store's prefix.

use crate::filter::{PriorityFilter, SortKey, StatusFilter, TaskViewCriteria};
use crate::model::project::ProjectId;
use crate::repo::preference_repo::PreferenceRepository;
use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Namespace prepended to every stored key.
pub const STORAGE_PREFIX: &str = "task_app_";

pub fn status_filter_key(project_id: ProjectId) -> String {
    format!("filter_status_{project_id}")
}

pub fn priority_filter_key(project_id: ProjectId) -> String {
    format!("filter_priority_{project_id}")
}

pub fn sort_key_key(project_id: ProjectId) -> String {
    format!("sort_by_{project_id}")
}

/// Preference facade over a key-value repository.
pub struct PreferenceStore<R: PreferenceRepository> {
    repo: R,
    prefix: String,
}

impl<R: PreferenceRepository> PreferenceStore<R> {
    /// Creates a store using the default `task_app_` namespace.
    pub fn new(repo: R) -> Self {
        Self::with_prefix(repo, STORAGE_PREFIX)
    }

    pub fn with_prefix(repo: R, prefix: impl Into<String>) -> Self {
        Self {
            repo,
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Serializes and stores `value`; failures are logged and ignored.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(err) => {
                error!(
                    "event=pref_set module=preferences status=error error_code=serialize_failed key={key} error={err}"
                );
                return;
            }
        };

        match self.repo.write(&self.namespaced(key), &raw) {
            Ok(()) => debug!("event=pref_set module=preferences status=ok key={key}"),
            Err(err) => error!(
                "event=pref_set module=preferences status=error error_code=write_failed key={key} error={err}"
            ),
        }
    }

    /// Returns the stored value for `key`, or `default` when absent or unreadable.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get_optional(key).unwrap_or(default)
    }

    /// Returns the stored value for `key`, or `None` when absent or unreadable.
    pub fn get_optional<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.repo.read(&self.namespaced(key)) {
            Ok(raw) => raw?,
            Err(err) => {
                error!(
                    "event=pref_get module=preferences status=error error_code=read_failed key={key} error={err}"
                );
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(
                    "event=pref_get module=preferences status=error error_code=corrupt_value key={key} error={err}"
                );
                None
            }
        }
    }

    /// Removes `key`; failures are logged and ignored.
    pub fn remove(&self, key: &str) {
        if let Err(err) = self.repo.delete(&self.namespaced(key)) {
            error!(
                "event=pref_remove module=preferences status=error key={key} error={err}"
            );
        }
    }

    /// Removes every key under this store's prefix; failures are logged and ignored.
    pub fn clear(&self) {
        match self.repo.delete_prefix(&self.prefix) {
            Ok(removed) => {
                debug!("event=pref_clear module=preferences status=ok removed={removed}")
            }
            Err(err) => error!("event=pref_clear module=preferences status=error error={err}"),
        }
    }

    /// Loads the remembered filter/sort settings for one project view.
    ///
    /// Each setting falls back to its default on its own.
    pub fn task_view_criteria(&self, project_id: ProjectId) -> TaskViewCriteria {
        TaskViewCriteria {
            status: self.get(&status_filter_key(project_id), StatusFilter::All),
            priority: self.get(&priority_filter_key(project_id), PriorityFilter::All),
            sort_by: self.get(&sort_key_key(project_id), SortKey::DueDate),
        }
    }

    pub fn set_status_filter(&self, project_id: ProjectId, filter: StatusFilter) {
        self.set(&status_filter_key(project_id), &filter);
    }

    pub fn set_priority_filter(&self, project_id: ProjectId, filter: PriorityFilter) {
        self.set(&priority_filter_key(project_id), &filter);
    }

    pub fn set_sort_key(&self, project_id: ProjectId, sort_by: SortKey) {
        self.set(&sort_key_key(project_id), &sort_by);
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}{key}", self.prefix)
    }
}
