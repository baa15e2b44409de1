//! Document-store implementation of ApiRepository.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Api, ErrorCode, RepositoryError};
use crate::ports::ApiRepository;
use crate::store::{
    ApiCollection, ApiDocument, SubscriptionCollection, TeamCollection, UserCollection,
};

use super::mapper::{api_from_document, api_to_document, map_api, RefResolver};

/// Document-store implementation of [`ApiRepository`].
///
/// Holds the subscriptions collection as well: the application-scoped query
/// resolves through subscriptions.
#[derive(Clone)]
pub struct DocstoreApiRepository {
    apis: Arc<dyn ApiCollection>,
    subscriptions: Arc<dyn SubscriptionCollection>,
    resolver: RefResolver,
}

impl DocstoreApiRepository {
    pub fn new(
        apis: Arc<dyn ApiCollection>,
        subscriptions: Arc<dyn SubscriptionCollection>,
        users: Arc<dyn UserCollection>,
        teams: Arc<dyn TeamCollection>,
    ) -> Self {
        Self {
            apis,
            subscriptions,
            resolver: RefResolver::new(users, teams),
        }
    }

    fn map_apis(docs: Vec<ApiDocument>) -> HashSet<Api> {
        docs.into_iter().map(api_from_document).collect()
    }
}

#[async_trait]
impl ApiRepository for DocstoreApiRepository {
    async fn find_all(&self) -> Result<HashSet<Api>, RepositoryError> {
        tracing::debug!("Find all apis");
        let docs = self.apis.find_all().await.map_err(|e| {
            RepositoryError::technical("An error occurred while finding all apis", e)
        })?;
        Ok(Self::map_apis(docs))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Api>, RepositoryError> {
        tracing::debug!("Find api by name [{}]", name);
        let doc = self.apis.find_one(name).await.map_err(|e| {
            RepositoryError::technical(
                format!("An error occurred while finding api [{}]", name),
                e,
            )
        })?;
        Ok(map_api(doc))
    }

    async fn find_by_user(
        &self,
        username: &str,
        public_only: bool,
    ) -> Result<HashSet<Api>, RepositoryError> {
        tracing::debug!("Find apis by user [{}]", username);
        let docs = self
            .apis
            .find_by_owner_user(username, public_only)
            .await
            .map_err(|e| {
                RepositoryError::technical(
                    format!("An error occurred while finding apis by user [{}]", username),
                    e,
                )
            })?;
        Ok(Self::map_apis(docs))
    }

    async fn find_by_team(
        &self,
        team: &str,
        public_only: bool,
    ) -> Result<HashSet<Api>, RepositoryError> {
        tracing::debug!("Find apis by team [{}]", team);
        let docs = self
            .apis
            .find_by_owner_team(team, public_only)
            .await
            .map_err(|e| {
                RepositoryError::technical(
                    format!("An error occurred while finding apis by team [{}]", team),
                    e,
                )
            })?;
        Ok(Self::map_apis(docs))
    }

    async fn find_by_creator(&self, username: &str) -> Result<HashSet<Api>, RepositoryError> {
        tracing::debug!("Find apis by creator [{}]", username);
        let docs = self.apis.find_by_creator(username).await.map_err(|e| {
            RepositoryError::technical(
                format!("An error occurred while finding apis by creator [{}]", username),
                e,
            )
        })?;
        Ok(Self::map_apis(docs))
    }

    // TODO: confirm the subscription-based filter once the portal settles
    // the application/API linkage.
    async fn find_by_application(
        &self,
        application: &str,
    ) -> Result<HashSet<Api>, RepositoryError> {
        tracing::debug!("Find apis by application [{}]", application);
        let subscriptions = self
            .subscriptions
            .find_by_application(application)
            .await
            .map_err(|e| {
                RepositoryError::technical(
                    format!(
                        "An error occurred while finding subscriptions of application [{}]",
                        application
                    ),
                    e,
                )
            })?;

        let mut apis = HashSet::new();
        for subscription in subscriptions {
            let doc = self.apis.find_one(&subscription.api).await.map_err(|e| {
                RepositoryError::technical(
                    format!("An error occurred while finding api [{}]", subscription.api),
                    e,
                )
            })?;
            if let Some(doc) = doc {
                apis.insert(api_from_document(doc));
            }
        }
        Ok(apis)
    }

    async fn count_by_user(
        &self,
        username: &str,
        public_only: bool,
    ) -> Result<u64, RepositoryError> {
        self.apis
            .count_by_owner_user(username, public_only)
            .await
            .map_err(|e| RepositoryError::technical("Count by user failed", e))
    }

    async fn count_by_team(&self, team: &str, public_only: bool) -> Result<u64, RepositoryError> {
        self.apis
            .count_by_owner_team(team, public_only)
            .await
            .map_err(|e| RepositoryError::technical("Count by team failed", e))
    }

    async fn create(&self, api: &Api) -> Result<Api, RepositoryError> {
        tracing::debug!("Create api [{}]", api.name);
        let doc = api_to_document(api, &self.resolver).await.map_err(|e| {
            RepositoryError::technical(
                format!("An error occurred while mapping api [{}]", api.name),
                e,
            )
        })?;
        let created = self.apis.insert(doc).await.map_err(|e| {
            RepositoryError::technical(
                format!("An error occurred while creating api [{}]", api.name),
                e,
            )
        })?;
        Ok(api_from_document(created))
    }

    async fn update(&self, api: &Api) -> Result<Api, RepositoryError> {
        if api.name.is_empty() {
            return Err(RepositoryError::new(
                ErrorCode::InvalidArgument,
                "Api to update must specify a name",
            ));
        }
        tracing::debug!("Update api [{}]", api.name);
        let mut doc = self
            .apis
            .find_one(&api.name)
            .await
            .map_err(|e| {
                RepositoryError::technical(
                    format!("An error occurred while finding api [{}]", api.name),
                    e,
                )
            })?
            .ok_or_else(|| {
                RepositoryError::new(
                    ErrorCode::ApiNotFound,
                    format!("No api found with name [{}]", api.name),
                )
            })?;

        // Apply the mutable fields; name and creation information stay as stored.
        doc.version = api.version.clone();
        doc.lifecycle_state = api.lifecycle_state;
        doc.private_api = api.private_api;
        doc.definition = api.definition.clone();
        doc.updated_at = api.updated_at;
        doc.owner = self
            .resolver
            .resolve_owner(api.owner_type, api.owner.as_deref())
            .await
            .map_err(|e| {
                RepositoryError::technical("An error occurred while resolving the api owner", e)
            })?;

        let saved = self.apis.save(doc).await.map_err(|e| {
            RepositoryError::technical(
                format!("An error occurred while updating api [{}]", api.name),
                e,
            )
        })?;
        Ok(api_from_document(saved))
    }

    async fn delete(&self, name: &str) -> Result<(), RepositoryError> {
        tracing::debug!("Delete api [{}]", name);
        self.apis.delete(name).await.map_err(|e| {
            RepositoryError::technical(
                format!("An error occurred while deleting api [{}]", name),
                e,
            )
        })
    }
}
