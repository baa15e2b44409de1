//! Rating entity.

use chrono::{DateTime, Utc};
use std::hash::{Hash, Hasher};

/// A user rating of an API, with an optional review comment.
#[derive(Debug, Clone, Default)]
pub struct Rating {
    /// Rating id, assigned by the store on creation when empty.
    pub id: String,
    /// Name of the rated API.
    pub api: String,
    /// Username of the rating user.
    pub user: String,
    /// Rate value, 1 to 5.
    pub rate: u8,
    pub title: String,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PartialEq for Rating {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Rating {}

impl Hash for Rating {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
