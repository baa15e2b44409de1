//! Document-store implementation of ApplicationRepository.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Application, ErrorCode, RepositoryError};
use crate::ports::ApplicationRepository;
use crate::store::{
    ApplicationCollection, ApplicationDocument, TeamCollection, UserCollection,
};

use super::mapper::{
    application_from_document, application_to_document, map_application, RefResolver,
};

/// Document-store implementation of [`ApplicationRepository`].
#[derive(Clone)]
pub struct DocstoreApplicationRepository {
    applications: Arc<dyn ApplicationCollection>,
    resolver: RefResolver,
}

impl DocstoreApplicationRepository {
    pub fn new(
        applications: Arc<dyn ApplicationCollection>,
        users: Arc<dyn UserCollection>,
        teams: Arc<dyn TeamCollection>,
    ) -> Self {
        Self {
            applications,
            resolver: RefResolver::new(users, teams),
        }
    }

    fn map_applications(docs: Vec<ApplicationDocument>) -> HashSet<Application> {
        docs.into_iter().map(application_from_document).collect()
    }
}

#[async_trait]
impl ApplicationRepository for DocstoreApplicationRepository {
    async fn find_all(&self) -> Result<HashSet<Application>, RepositoryError> {
        tracing::debug!("Find all applications");
        let docs = self.applications.find_all().await.map_err(|e| {
            RepositoryError::technical("An error occurred while finding all applications", e)
        })?;
        Ok(Self::map_applications(docs))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Application>, RepositoryError> {
        tracing::debug!("Find application by name [{}]", name);
        let doc = self.applications.find_one(name).await.map_err(|e| {
            RepositoryError::technical(
                format!("An error occurred while finding application [{}]", name),
                e,
            )
        })?;
        Ok(map_application(doc))
    }

    async fn find_by_user(&self, username: &str) -> Result<HashSet<Application>, RepositoryError> {
        tracing::debug!("Find applications by user [{}]", username);
        let docs = self
            .applications
            .find_by_owner_user(username)
            .await
            .map_err(|e| {
                RepositoryError::technical(
                    format!("An error occurred while finding applications by user [{}]", username),
                    e,
                )
            })?;
        Ok(Self::map_applications(docs))
    }

    async fn find_by_team(&self, team: &str) -> Result<HashSet<Application>, RepositoryError> {
        tracing::debug!("Find applications by team [{}]", team);
        let docs = self
            .applications
            .find_by_owner_team(team)
            .await
            .map_err(|e| {
                RepositoryError::technical(
                    format!("An error occurred while finding applications by team [{}]", team),
                    e,
                )
            })?;
        Ok(Self::map_applications(docs))
    }

    async fn count_by_user(&self, username: &str) -> Result<u64, RepositoryError> {
        self.applications
            .count_by_owner_user(username)
            .await
            .map_err(|e| RepositoryError::technical("Count by user failed", e))
    }

    async fn count_by_team(&self, team: &str) -> Result<u64, RepositoryError> {
        self.applications
            .count_by_owner_team(team)
            .await
            .map_err(|e| RepositoryError::technical("Count by team failed", e))
    }

    async fn create(&self, application: &Application) -> Result<Application, RepositoryError> {
        tracing::debug!("Create application [{}]", application.name);
        let doc = application_to_document(application, &self.resolver)
            .await
            .map_err(|e| {
                RepositoryError::technical(
                    format!("An error occurred while mapping application [{}]", application.name),
                    e,
                )
            })?;
        let created = self.applications.insert(doc).await.map_err(|e| {
            RepositoryError::technical(
                format!("An error occurred while creating application [{}]", application.name),
                e,
            )
        })?;
        Ok(application_from_document(created))
    }

    async fn update(&self, application: &Application) -> Result<Application, RepositoryError> {
        if application.name.is_empty() {
            return Err(RepositoryError::new(
                ErrorCode::InvalidArgument,
                "Application to update must specify a name",
            ));
        }
        tracing::debug!("Update application [{}]", application.name);
        let mut doc = self
            .applications
            .find_one(&application.name)
            .await
            .map_err(|e| {
                RepositoryError::technical(
                    format!("An error occurred while finding application [{}]", application.name),
                    e,
                )
            })?
            .ok_or_else(|| {
                RepositoryError::new(
                    ErrorCode::ApplicationNotFound,
                    format!("No application found with name [{}]", application.name),
                )
            })?;

        // Apply the mutable fields; name and creation information stay as stored.
        doc.description = application.description.clone();
        doc.app_type = application.app_type.clone();
        doc.updated_at = application.updated_at;
        doc.owner = self
            .resolver
            .resolve_owner(application.owner_type, application.owner.as_deref())
            .await
            .map_err(|e| {
                RepositoryError::technical(
                    "An error occurred while resolving the application owner",
                    e,
                )
            })?;

        let saved = self.applications.save(doc).await.map_err(|e| {
            RepositoryError::technical(
                format!("An error occurred while updating application [{}]", application.name),
                e,
            )
        })?;
        Ok(application_from_document(saved))
    }

    async fn delete(&self, name: &str) -> Result<(), RepositoryError> {
        tracing::debug!("Delete application [{}]", name);
        self.applications.delete(name).await.map_err(|e| {
            RepositoryError::technical(
                format!("An error occurred while deleting application [{}]", name),
                e,
            )
        })
    }
}
