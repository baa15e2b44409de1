//! Application entity and owner typing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Discriminant for the polymorphic owner reference.
///
/// Exactly one of a user or a team owns an application or an API; the
/// variant says which collection the flat `owner` name resolves against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OwnerType {
    User,
    Team,
}

/// A client application registered on the platform.
///
/// Identity is the human-assigned `name`, unique across applications and
/// immutable after creation.
#[derive(Debug, Clone, Default)]
pub struct Application {
    /// Unique application name.
    pub name: String,
    pub description: Option<String>,
    /// Free-form application kind (web, mobile, ...).
    pub app_type: Option<String>,
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
impl PartialEq for Application {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Application {}

impl Hash for Application {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn equality_is_by_name_only() {
        let a = Application {
            name: "shop".into(),
            description: Some("storefront".into()),
            ..Default::default()
        };
        let b = Application {
            name: "shop".into(),
            description: Some("rewritten".into()),
            ..Default::default()
        };
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        set.insert(b);
        assert_eq!(set.len(), 1);
    }
}
