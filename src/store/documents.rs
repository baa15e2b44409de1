//! Document shapes, one per collection.
//!
//! Field names follow the collection conventions (`camelCase`). Reference
//! fields on applications and APIs are denormalized: the full resolved user
//! or team document is embedded, with an explicit `kind` tag discriminating
//! the two — readers derive the owner type from the tag, never from the
//! shape of the embedded document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{LifecycleState, OwnerType, SubscriptionStatus};

use super::engine::Document;

/// A user document, keyed by username.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDocument {
    pub name: String,
    pub email: Option<String>,
}

impl Document for UserDocument {
    const COLLECTION: &'static str = "users";

    fn key(&self) -> &str {
        &self.name
    }

    fn assign_key(&mut self, key: String) {
        self.name = key;
    }
}

/// A team document, keyed by team name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamDocument {
    pub name: String,
    pub description: Option<String>,
}

impl Document for TeamDocument {
    const COLLECTION: &'static str = "teams";

    fn key(&self) -> &str {
        &self.name
    }

    fn assign_key(&mut self, key: String) {
        self.name = key;
    }
}

/// Denormalized owner reference: the resolved document of whichever concrete
/// type was referenced, tagged with `kind` (`USER` or `TEAM`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "UPPERCASE")]
pub enum OwnerDocument {
    User(UserDocument),
    Team(TeamDocument),
}

impl OwnerDocument {
    /// Identity of the referenced user or team.
    pub fn name(&self) -> &str {
        match self {
            OwnerDocument::User(user) => &user.name,
            OwnerDocument::Team(team) => &team.name,
        }
    }

    /// Owner type carried by the tag.
    pub fn owner_type(&self) -> OwnerType {
        match self {
            OwnerDocument::User(_) => OwnerType::User,
            OwnerDocument::Team(_) => OwnerType::Team,
        }
    }
}

/// An application document, keyed by application name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDocument {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub app_type: Option<String>,
    pub owner: Option<OwnerDocument>,
    pub creator: Option<UserDocument>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for ApplicationDocument {
    const COLLECTION: &'static str = "applications";

    fn key(&self) -> &str {
        &self.name
    }

    fn assign_key(&mut self, key: String) {
        self.name = key;
    }
}

/// An API document, keyed by API name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDocument {
    pub name: String,
    pub version: String,
    pub lifecycle_state: LifecycleState,
    pub private_api: bool,
    pub definition: Option<String>,
    pub owner: Option<OwnerDocument>,
    pub creator: Option<UserDocument>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for ApiDocument {
    const COLLECTION: &'static str = "apis";

    fn key(&self) -> &str {
        &self.name
    }

    fn assign_key(&mut self, key: String) {
        self.name = key;
    }
}

/// A subscription document. References are flat strings, not embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionDocument {
    pub id: String,
    pub api: String,
    pub plan: String,
    pub application: String,
    pub status: SubscriptionStatus,
    pub processed_at: Option<DateTime<Utc>>,
    pub reason: Option<String>,
    pub processed_by: Option<String>,
    pub subscribed_by: Option<String>,
    pub starting_at: Option<DateTime<Utc>>,
    pub ending_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for SubscriptionDocument {
    const COLLECTION: &'static str = "subscriptions";

    fn key(&self) -> &str {
        &self.id
    }

    fn assign_key(&mut self, key: String) {
        self.id = key;
    }
}

/// A notification document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDocument {
    pub id: String,
    pub title: String,
    pub message: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl Document for NotificationDocument {
    const COLLECTION: &'static str = "notifications";

    fn key(&self) -> &str {
        &self.id
    }

    fn assign_key(&mut self, key: String) {
        self.id = key;
    }
}

/// A rating document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingDocument {
    pub id: String,
    pub api: String,
    pub user: String,
    pub rate: u8,
    pub title: String,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for RatingDocument {
    const COLLECTION: &'static str = "ratings";

    fn key(&self) -> &str {
        &self.id
    }

    fn assign_key(&mut self, key: String) {
        self.id = key;
    }
}
