//! Document-store implementation of NotificationRepository.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Notification, RepositoryError};
use crate::ports::NotificationRepository;
use crate::store::NotificationCollection;

use super::mapper::{notification_from_document, notification_to_document};

/// Document-store implementation of [`NotificationRepository`].
#[derive(Clone)]
pub struct DocstoreNotificationRepository {
    notifications: Arc<dyn NotificationCollection>,
}

impl DocstoreNotificationRepository {
    pub fn new(notifications: Arc<dyn NotificationCollection>) -> Self {
        Self { notifications }
    }
}

#[async_trait]
impl NotificationRepository for DocstoreNotificationRepository {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Vec<Notification>, RepositoryError> {
        tracing::debug!("Find notifications by username [{}]", username);
        let docs = self
            .notifications
            .find_by_username(username)
            .await
            .map_err(|e| {
                RepositoryError::technical(
                    format!(
                        "An error occurred while finding notifications of user [{}]",
                        username
                    ),
                    e,
                )
            })?;
        Ok(docs.into_iter().map(notification_from_document).collect())
    }

    async fn create(&self, notification: &Notification) -> Result<Notification, RepositoryError> {
        tracing::debug!("Create notification for user [{}]", notification.username);
        let created = self
            .notifications
            .insert(notification_to_document(notification))
            .await
            .map_err(|e| {
                RepositoryError::technical("An error occurred while creating notification", e)
            })?;
        Ok(notification_from_document(created))
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        tracing::debug!("Delete notification [{}]", id);
        self.notifications.delete(id).await.map_err(|e| {
            RepositoryError::technical(
                format!("An error occurred while deleting notification [{}]", id),
                e,
            )
        })
    }
}
