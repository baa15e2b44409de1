//! Application repository port.
//!
//! Defines the contract for persisting and querying applications.
//! Implementations resolve the polymorphic owner reference against the
//! user and team collections.
//!
//! # Design
//!
//! - **Set-valued queries**: multi-result reads return unordered sets;
//!   entities comparing equal by name collapse
//! - **Explicit update failure**: updating a missing application is an
//!   error, never an implicit create

use async_trait::async_trait;
use std::collections::HashSet;

use crate::domain::{Application, RepositoryError};

/// Repository port for [`Application`] persistence.
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Returns every stored application.
    async fn find_all(&self) -> Result<HashSet<Application>, RepositoryError>;

    /// Point lookup by name. Returns `None` if not found.
    async fn find_by_name(&self, name: &str) -> Result<Option<Application>, RepositoryError>;

    /// Applications owned by the given user.
    async fn find_by_user(&self, username: &str) -> Result<HashSet<Application>, RepositoryError>;

    /// Applications owned by the given team.
    async fn find_by_team(&self, team: &str) -> Result<HashSet<Application>, RepositoryError>;

    /// Number of applications owned by the given user.
    async fn count_by_user(&self, username: &str) -> Result<u64, RepositoryError>;

    /// Number of applications owned by the given team.
    async fn count_by_team(&self, team: &str) -> Result<u64, RepositoryError>;

    /// Persists a new application and returns the stored form.
    ///
    /// # Errors
    ///
    /// - `StorageError` if the insert fails (e.g. duplicate name)
    async fn create(&self, application: &Application) -> Result<Application, RepositoryError>;

    /// Updates an existing application.
    ///
    /// Only the mutable fields of the payload are applied; the name and
    /// creation information stay as stored.
    ///
    /// # Errors
    ///
    /// - `ApplicationNotFound` if no application with the payload's name exists
    /// - `StorageError` on persistence failure
    async fn update(&self, application: &Application) -> Result<Application, RepositoryError>;

    /// Removes an application by name. Removing an absent name is not an
    /// error.
    async fn delete(&self, name: &str) -> Result<(), RepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn application_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ApplicationRepository) {}
    }
}
