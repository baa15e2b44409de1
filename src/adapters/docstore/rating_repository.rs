//! Document-store implementation of RatingRepository.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{ErrorCode, Page, Pageable, Rating, RepositoryError};
use crate::ports::RatingRepository;
use crate::store::RatingCollection;

use super::mapper::{map_rating, rating_from_document, rating_to_document};
use super::paging;

/// Document-store implementation of [`RatingRepository`].
#[derive(Clone)]
pub struct DocstoreRatingRepository {
    ratings: Arc<dyn RatingCollection>,
}

impl DocstoreRatingRepository {
    pub fn new(ratings: Arc<dyn RatingCollection>) -> Self {
        Self { ratings }
    }
}

#[async_trait]
impl RatingRepository for DocstoreRatingRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Rating>, RepositoryError> {
        tracing::debug!("Find rating by id [{}]", id);
        let doc = self.ratings.find_one(id).await.map_err(|e| {
            RepositoryError::technical(
                format!("An error occurred while finding rating [{}]", id),
                e,
            )
        })?;
        Ok(map_rating(doc))
    }

    async fn find_by_api_and_user(
        &self,
        api: &str,
        user: &str,
    ) -> Result<Option<Rating>, RepositoryError> {
        tracing::debug!("Find rating by api [{}] and user [{}]", api, user);
        let doc = self
            .ratings
            .find_by_api_and_user(api, user)
            .await
            .map_err(|e| {
                RepositoryError::technical(
                    format!(
                        "An error occurred while finding rating by api [{}] and user [{}]",
                        api, user
                    ),
                    e,
                )
            })?;
        Ok(map_rating(doc))
    }

    async fn find_by_api(&self, api: &str) -> Result<Vec<Rating>, RepositoryError> {
        tracing::debug!("Find ratings by api [{}]", api);
        let docs = self.ratings.find_by_api(api).await.map_err(|e| {
            RepositoryError::technical(
                format!("An error occurred while finding ratings by api [{}]", api),
                e,
            )
        })?;
        Ok(docs.into_iter().map(rating_from_document).collect())
    }

    async fn find_by_api_pageable(
        &self,
        api: &str,
        pageable: &Pageable,
    ) -> Result<Page<Rating>, RepositoryError> {
        tracing::debug!("Find ratings by api [{}] with pagination", api);
        let query = paging::page_query(pageable);
        let native = self
            .ratings
            .find_by_api_paged(api, &query)
            .await
            .map_err(|e| {
                RepositoryError::technical(
                    format!(
                        "An error occurred while finding ratings by api [{}] with pagination",
                        api
                    ),
                    e,
                )
            })?;
        let page = paging::to_page(native, rating_from_document);
        tracing::debug!("Find ratings by api [{}] with pagination - done", api);
        Ok(page)
    }

    async fn create(&self, rating: &Rating) -> Result<Rating, RepositoryError> {
        tracing::debug!(
            "Create rating for api [{}] by user [{}]",
            rating.api,
            rating.user
        );
        let created = self
            .ratings
            .insert(rating_to_document(rating))
            .await
            .map_err(|e| {
                RepositoryError::technical("An error occurred while creating rating", e)
            })?;
        Ok(rating_from_document(created))
    }

    async fn update(&self, rating: &Rating) -> Result<Rating, RepositoryError> {
        if rating.id.is_empty() {
            return Err(RepositoryError::new(
                ErrorCode::InvalidArgument,
                "Rating to update must specify an id",
            ));
        }
        tracing::debug!("Update rating [{}]", rating.id);
        let mut doc = self
            .ratings
            .find_one(&rating.id)
            .await
            .map_err(|e| {
                RepositoryError::technical(
                    format!("An error occurred while finding rating [{}]", rating.id),
                    e,
                )
            })?
            .ok_or_else(|| {
                RepositoryError::new(
                    ErrorCode::RatingNotFound,
                    format!("No rating found with id [{}]", rating.id),
                )
            })?;

        // The id stays as stored; everything else comes from the payload.
        doc.api = rating.api.clone();
        doc.user = rating.user.clone();
        doc.rate = rating.rate;
        doc.title = rating.title.clone();
        doc.comment = rating.comment.clone();
        doc.created_at = rating.created_at;
        doc.updated_at = rating.updated_at;

        let saved = self.ratings.save(doc).await.map_err(|e| {
            RepositoryError::technical("An error occurred while updating rating", e)
        })?;
        Ok(rating_from_document(saved))
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        tracing::debug!("Delete rating [{}]", id);
        self.ratings.delete(id).await.map_err(|e| {
            RepositoryError::technical("An error occurred while deleting rating", e)
        })
    }
}
