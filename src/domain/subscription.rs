//! Subscription entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Processing state of a subscription request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SubscriptionStatus {
    Pending,
    Accepted,
    Rejected,
    Closed,
}

impl Default for SubscriptionStatus {
    fn default() -> Self {
        SubscriptionStatus::Pending
    }
}

/// A subscription of an application to a plan of an API.
///
/// Identity is a store-assigned `id`. The linkage fields (`api`, `plan`,
/// `application`, `subscribed_by`) are fixed at creation; only the
/// processing lifecycle mutates afterwards.
#[derive(Debug, Clone, Default)]
pub struct Subscription {
    /// Subscription id, assigned by the store on creation when empty.
    pub id: String,
    /// Name of the subscribed API.
    pub api: String,
    /// Name of the subscribed plan.
    pub plan: String,
    /// Name of the subscribing application.
    pub application: String,
    pub status: SubscriptionStatus,
    /// When the subscription request was processed.
    pub processed_at: Option<DateTime<Utc>>,
    /// Reason given to the developer when the request is rejected.
    pub reason: Option<String>,
    /// Username of the processing user. Absent for automatic plans.
    pub processed_by: Option<String>,
    /// Username of the subscribing user.
    pub subscribed_by: Option<String>,
    pub starting_at: Option<DateTime<Utc>>,
    pub ending_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Identity-based equality: query results are sets keyed by id.
impl PartialEq for Subscription {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Subscription {}

impl Hash for Subscription {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
