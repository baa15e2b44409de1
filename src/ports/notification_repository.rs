//! Notification repository port.

use async_trait::async_trait;

use crate::domain::{Notification, RepositoryError};

/// Repository port for [`Notification`] persistence.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Notifications addressed to the given user.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Vec<Notification>, RepositoryError>;

    /// Persists a new notification, returning the stored form including the
    /// store-assigned id.
    async fn create(&self, notification: &Notification) -> Result<Notification, RepositoryError>;

    /// Removes a notification by id.
    async fn delete(&self, id: &str) -> Result<(), RepositoryError>;
}
