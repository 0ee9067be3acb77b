//! User records.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type UserId = Uuid;

/// A person tasks can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Short glyph (usually an emoji) rendered next to the name.
    pub avatar: String,
}

/// Fields supplied when creating a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub avatar: String,
}

/// Partial update for a user. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    pub name: Option<String>,
    pub avatar: Option<String>,
}

impl User {
    pub(crate) fn from_new(id: UserId, new: NewUser) -> Self {
        Self {
            id,
            name: new.name,
            avatar: new.avatar,
        }
    }

    pub(crate) fn apply(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(avatar) = patch.avatar {
            self.avatar = avatar;
        }
    }
}
