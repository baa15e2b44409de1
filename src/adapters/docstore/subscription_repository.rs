//! Document-store implementation of SubscriptionRepository.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{ErrorCode, RepositoryError, Subscription};
use crate::ports::SubscriptionRepository;
use crate::store::{SubscriptionCollection, SubscriptionDocument};

use super::mapper::{map_subscription, subscription_from_document, subscription_to_document};

/// Document-store implementation of [`SubscriptionRepository`].
#[derive(Clone)]
pub struct DocstoreSubscriptionRepository {
    subscriptions: Arc<dyn SubscriptionCollection>,
}

impl DocstoreSubscriptionRepository {
    pub fn new(subscriptions: Arc<dyn SubscriptionCollection>) -> Self {
        Self { subscriptions }
    }

    fn map_subscriptions(docs: Vec<SubscriptionDocument>) -> HashSet<Subscription> {
        docs.into_iter().map(subscription_from_document).collect()
    }
}

#[async_trait]
impl SubscriptionRepository for DocstoreSubscriptionRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Subscription>, RepositoryError> {
        tracing::debug!("Find subscription by id [{}]", id);
        let doc = self.subscriptions.find_one(id).await.map_err(|e| {
            RepositoryError::technical(
                format!("An error occurred while finding subscription [{}]", id),
                e,
            )
        })?;
        Ok(map_subscription(doc))
    }

    async fn find_by_plan(&self, plan: &str) -> Result<HashSet<Subscription>, RepositoryError> {
        tracing::debug!("Find subscriptions by plan [{}]", plan);
        let docs = self.subscriptions.find_by_plan(plan).await.map_err(|e| {
            RepositoryError::technical(
                format!("An error occurred while finding subscriptions by plan [{}]", plan),
                e,
            )
        })?;
        Ok(Self::map_subscriptions(docs))
    }

    async fn find_by_application(
        &self,
        application: &str,
    ) -> Result<HashSet<Subscription>, RepositoryError> {
        tracing::debug!("Find subscriptions by application [{}]", application);
        let docs = self
            .subscriptions
            .find_by_application(application)
            .await
            .map_err(|e| {
                RepositoryError::technical(
                    format!(
                        "An error occurred while finding subscriptions by application [{}]",
                        application
                    ),
                    e,
                )
            })?;
        Ok(Self::map_subscriptions(docs))
    }

    async fn find_by_api(&self, api: &str) -> Result<HashSet<Subscription>, RepositoryError> {
        tracing::debug!("Find subscriptions by api [{}]", api);
        let docs = self.subscriptions.find_by_api(api).await.map_err(|e| {
            RepositoryError::technical(
                format!("An error occurred while finding subscriptions by api [{}]", api),
                e,
            )
        })?;
        Ok(Self::map_subscriptions(docs))
    }

    async fn create(&self, subscription: &Subscription) -> Result<Subscription, RepositoryError> {
        tracing::debug!(
            "Create subscription for plan [{}] by application [{}]",
            subscription.plan,
            subscription.application
        );
        let created = self
            .subscriptions
            .insert(subscription_to_document(subscription))
            .await
            .map_err(|e| {
                RepositoryError::technical("An error occurred while creating subscription", e)
            })?;
        Ok(subscription_from_document(created))
    }

    async fn update(&self, subscription: &Subscription) -> Result<Subscription, RepositoryError> {
        if subscription.id.is_empty() {
            return Err(RepositoryError::new(
                ErrorCode::InvalidArgument,
                "Subscription to update must specify an id",
            ));
        }
        tracing::debug!("Update subscription [{}]", subscription.id);
        let mut doc = self
            .subscriptions
            .find_one(&subscription.id)
            .await
            .map_err(|e| {
                RepositoryError::technical(
                    format!("An error occurred while finding subscription [{}]", subscription.id),
                    e,
                )
            })?
            .ok_or_else(|| {
                RepositoryError::new(
                    ErrorCode::SubscriptionNotFound,
                    format!("No subscription found with id [{}]", subscription.id),
                )
            })?;

        // Only the processing lifecycle mutates; the linkage and creation
        // information stay as stored.
        doc.status = subscription.status;
        doc.processed_at = subscription.processed_at;
        doc.reason = subscription.reason.clone();
        doc.processed_by = subscription.processed_by.clone();
        doc.starting_at = subscription.starting_at;
        doc.ending_at = subscription.ending_at;
        doc.closed_at = subscription.closed_at;
        doc.updated_at = subscription.updated_at;

        let saved = self.subscriptions.save(doc).await.map_err(|e| {
            RepositoryError::technical(
                format!("An error occurred while updating subscription [{}]", subscription.id),
                e,
            )
        })?;
        Ok(subscription_from_document(saved))
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        tracing::debug!("Delete subscription [{}]", id);
        self.subscriptions.delete(id).await.map_err(|e| {
            RepositoryError::technical(
                format!("An error occurred while deleting subscription [{}]", id),
                e,
            )
        })
    }
}
