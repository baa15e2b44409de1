//! Rating repository port.

use async_trait::async_trait;

use crate::domain::{Page, Pageable, Rating, RepositoryError};

/// Repository port for [`Rating`] persistence.
#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Point lookup by id. Returns `None` if not found.
    async fn find_by_id(&self, id: &str) -> Result<Option<Rating>, RepositoryError>;

    /// The rating the given user left on the given API, if any.
    async fn find_by_api_and_user(
        &self,
        api: &str,
        user: &str,
    ) -> Result<Option<Rating>, RepositoryError>;

    /// Every rating of the given API.
    async fn find_by_api(&self, api: &str) -> Result<Vec<Rating>, RepositoryError>;

    /// One page of the given API's ratings, newest first.
    ///
    /// Page numbers are 1-based; the page carries the total rating count
    /// for the API.
    async fn find_by_api_pageable(
        &self,
        api: &str,
        pageable: &Pageable,
    ) -> Result<Page<Rating>, RepositoryError>;

    /// Persists a new rating, returning the stored form including the
    /// store-assigned id.
    async fn create(&self, rating: &Rating) -> Result<Rating, RepositoryError>;

    /// Updates an existing rating.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the payload has no id
    /// - `RatingNotFound` if no rating with that id exists
    async fn update(&self, rating: &Rating) -> Result<Rating, RepositoryError>;

    /// Removes a rating by id.
    async fn delete(&self, id: &str) -> Result<(), RepositoryError>;
}
