//! Shared handle to the entity store with simulated latency.
//!
//! # Invariants
//! - Every call waits the full latency before it reads or mutates the store.
//! - Mutations run to completion under the lock, so no caller observes a
//!   partially applied operation.
//! - Overlapping calls complete in timer order, not issue order. Concurrent
//!   updates to one record resolve as "last completed wins".

use crate::config::BackendConfig;
use crate::service::project_api::ProjectApi;
use crate::service::task_api::TaskApi;
use crate::service::user_api::UserApi;
use crate::store::EntityStore;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Cloneable entry point to the data access layer.
///
/// Clones share one store. Use one `Backend` per session; tests build a
/// fresh one each to stay isolated.
#[derive(Debug, Clone)]
pub struct Backend {
    store: Arc<Mutex<EntityStore>>,
    latency: Duration,
}

impl Backend {
    /// Wraps `store` using the latency from `config`.
    pub fn new(store: EntityStore, config: &BackendConfig) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            latency: config.latency(),
        }
    }

    /// Builds a backend whose store is seeded or empty per `config`.
    pub fn from_config(config: &BackendConfig) -> Self {
        let store = if config.seed_fixtures {
            EntityStore::seeded()
        } else {
            EntityStore::empty()
        };
        Self::new(store, config)
    }

    /// Returns a handle to the same store with a different latency.
    pub fn with_latency(&self, latency: Duration) -> Self {
        Self {
            store: Arc::clone(&self.store),
            latency,
        }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    pub fn projects(&self) -> ProjectApi {
        ProjectApi::new(self.clone())
    }

    pub fn tasks(&self) -> TaskApi {
        TaskApi::new(self.clone())
    }

    pub fn users(&self) -> UserApi {
        UserApi::new(self.clone())
    }

    pub(crate) async fn round_trip<T>(&self, op: impl FnOnce(&mut EntityStore) -> T) -> T {
        tokio::time::sleep(self.latency).await;
        let mut store = self.lock();
        op(&mut *store)
    }

    fn lock(&self) -> MutexGuard<'_, EntityStore> {
        // Mutations cannot panic halfway, so a poisoned store is still consistent.
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub(crate) fn found_status(found: bool) -> &'static str {
    if found {
        "ok"
    } else {
        "not_found"
    }
}
