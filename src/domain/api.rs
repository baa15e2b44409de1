//! Api entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use super::OwnerType;

/// Deployment state of an API on the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LifecycleState {
    Started,
    Stopped,
}

impl Default for LifecycleState {
    fn default() -> Self {
        LifecycleState::Stopped
    }
}

/// An API published on the platform.
///
/// Identity is the unique `name`, immutable after creation. The gateway
/// configuration travels as an opaque serialized blob in `definition`.
#[derive(Debug, Clone, Default)]
pub struct Api {
    /// Unique API name.
    pub name: String,
    pub version: String,
    pub lifecycle_state: LifecycleState,
    /// Private APIs are hidden from the public catalog.
    pub private_api: bool,
    /// Opaque serialized gateway configuration.
    pub definition: Option<String>,
    /// Owner reference, resolved against users or teams depending on
    /// `owner_type`. Absent when the reference could not be resolved.
    pub owner: Option<String>,
    pub owner_type: Option<OwnerType>,
    /// Username of the creating user.
    pub creator: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Identity-based equality: query results are sets keyed by name.
impl PartialEq for Api {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Api {}

impl Hash for Api {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
