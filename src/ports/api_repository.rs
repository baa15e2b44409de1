//! Api repository port.

use async_trait::async_trait;
use std::collections::HashSet;

use crate::domain::{Api, RepositoryError};

/// Repository port for [`Api`] persistence.
///
/// Owner-scoped queries take a `public_only` flag restricting results to
/// APIs not marked private, for the public catalog views.
#[async_trait]
pub trait ApiRepository: Send + Sync {
    /// Returns every stored API.
    async fn find_all(&self) -> Result<HashSet<Api>, RepositoryError>;

    /// Point lookup by name. Returns `None` if not found.
    async fn find_by_name(&self, name: &str) -> Result<Option<Api>, RepositoryError>;

    /// APIs owned by the given user.
    async fn find_by_user(
        &self,
        username: &str,
        public_only: bool,
    ) -> Result<HashSet<Api>, RepositoryError>;

    /// APIs owned by the given team.
    async fn find_by_team(
        &self,
        team: &str,
        public_only: bool,
    ) -> Result<HashSet<Api>, RepositoryError>;

    /// APIs created by the given user.
    async fn find_by_creator(&self, username: &str) -> Result<HashSet<Api>, RepositoryError>;

    /// APIs subscribed to by the given application.
    async fn find_by_application(
        &self,
        application: &str,
    ) -> Result<HashSet<Api>, RepositoryError>;

    async fn count_by_user(
        &self,
        username: &str,
        public_only: bool,
    ) -> Result<u64, RepositoryError>;

    async fn count_by_team(&self, team: &str, public_only: bool)
        -> Result<u64, RepositoryError>;

    /// Persists a new API and returns the stored form.
    async fn create(&self, api: &Api) -> Result<Api, RepositoryError>;

    /// Updates an existing API.
    ///
    /// # Errors
    ///
    /// - `ApiNotFound` if no API with the payload's name exists
    /// - `StorageError` on persistence failure
    async fn update(&self, api: &Api) -> Result<Api, RepositoryError>;

    /// Removes an API by name.
    async fn delete(&self, name: &str) -> Result<(), RepositoryError>;
}
