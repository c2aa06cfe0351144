//! Who is asking.
//!
//! Authentication happens outside this crate; callers hand in an already
//! resolved [`Actor`] on every call that needs a permission decision.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u32);

impl From<u32> for UserId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "user_{}", self.0)
    }
}

/// The authenticated caller and their role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", content = "user_id", rename_all = "snake_case")]
pub enum Actor {
    Customer(UserId),
    Admin(UserId),
}

impl Actor {
    pub fn user_id(&self) -> UserId {
        match self {
            Actor::Customer(id) | Actor::Admin(id) => *id,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Actor::Admin(_))
    }

    /// True when the caller is the given owner.
    pub fn owns(&self, owner_id: UserId) -> bool {
        self.user_id() == owner_id
    }

    /// Admins see everything; customers only what they own.
    pub fn can_view(&self, owner_id: UserId) -> bool {
        self.is_admin() || self.owns(owner_id)
    }
}

impl Display for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Actor::Customer(id) => write!(f, "customer {id}"),
            Actor::Admin(id) => write!(f, "admin {id}"),
        }
    }
}
