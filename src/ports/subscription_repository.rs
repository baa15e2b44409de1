//! Subscription repository port.

use async_trait::async_trait;
use std::collections::HashSet;

use crate::domain::{RepositoryError, Subscription};

/// Repository port for [`Subscription`] persistence.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Point lookup by id. Returns `None` if not found.
    async fn find_by_id(&self, id: &str) -> Result<Option<Subscription>, RepositoryError>;

    /// Subscriptions to the given plan.
    async fn find_by_plan(&self, plan: &str) -> Result<HashSet<Subscription>, RepositoryError>;

    /// Subscriptions held by the given application.
    async fn find_by_application(
        &self,
        application: &str,
    ) -> Result<HashSet<Subscription>, RepositoryError>;

    /// Subscriptions to any plan of the given API.
    async fn find_by_api(&self, api: &str) -> Result<HashSet<Subscription>, RepositoryError>;

    /// Persists a new subscription, returning the stored form including the
    /// store-assigned id.
    async fn create(&self, subscription: &Subscription) -> Result<Subscription, RepositoryError>;

    /// Updates the processing lifecycle of an existing subscription.
    ///
    /// The linkage fields (api, plan, application, subscribed_by) and the
    /// creation timestamp stay as stored.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the payload has no id
    /// - `SubscriptionNotFound` if no subscription with that id exists
    async fn update(&self, subscription: &Subscription) -> Result<Subscription, RepositoryError>;

    /// Removes a subscription by id.
    async fn delete(&self, id: &str) -> Result<(), RepositoryError>;
}
