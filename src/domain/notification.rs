//! Notification entity.

use chrono::{DateTime, Utc};
use std::hash::{Hash, Hasher};

/// A portal notification addressed to a single user.
#[derive(Debug, Clone, Default)]
pub struct Notification {
    /// Notification id, assigned by the store on creation when empty.
    pub id: String,
    pub title: String,
    pub message: String,
    /// Username of the addressee.
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl PartialEq for Notification {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Notification {}

impl Hash for Notification {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
