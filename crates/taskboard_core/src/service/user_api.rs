//! User CRUD over the shared store.
//!
//! Editing or deleting a user never touches the copies embedded in tasks.

use crate::model::user::{NewUser, User, UserId, UserPatch};
use crate::service::backend::{found_status, Backend};
use log::{debug, info};

#[derive(Debug, Clone)]
pub struct UserApi {
    backend: Backend,
}

impl UserApi {
    pub(crate) fn new(backend: Backend) -> Self {
        Self { backend }
    }

    pub async fn list(&self) -> Vec<User> {
        let users = self.backend.round_trip(|store| store.users().to_vec()).await;
        debug!(
            "event=user_list module=service status=ok count={}",
            users.len()
        );
        users
    }

    pub async fn get_by_id(&self, id: UserId) -> Option<User> {
        let user = self
            .backend
            .round_trip(|store| store.user(id).cloned())
            .await;
        debug!(
            "event=user_get module=service status={} id={id}",
            found_status(user.is_some())
        );
        user
    }

    pub async fn create(&self, user: NewUser) -> User {
        let created = self
            .backend
            .round_trip(|store| store.insert_user(user))
            .await;
        info!(
            "event=user_create module=service status=ok id={}",
            created.id
        );
        created
    }

    /// Overwrites the name and/or avatar. Returns `None` when no user has `id`.
    pub async fn update(&self, id: UserId, patch: UserPatch) -> Option<User> {
        let updated = self
            .backend
            .round_trip(|store| store.update_user(id, patch))
            .await;
        info!(
            "event=user_update module=service status={} id={id}",
            found_status(updated.is_some())
        );
        updated
    }

    pub async fn delete(&self, id: UserId) -> bool {
        self.backend.round_trip(|store| store.remove_user(id)).await;
        info!("event=user_delete module=service status=ok id={id}");
        true
    }
}
