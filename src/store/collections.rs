//! Per-collection store contracts.
//!
//! Each trait extends the generic [`DocumentStore`] base with the derived
//! query methods its repository adapter delegates to. Engines implement
//! these against their native filtering; adapters never see engine types.

use async_trait::async_trait;

use super::documents::{
    ApiDocument, ApplicationDocument, NotificationDocument, RatingDocument, SubscriptionDocument,
    TeamDocument, UserDocument,
};
use super::engine::{DocumentPage, DocumentStore, PageQuery, StoreError};

/// The `applications` collection.
#[async_trait]
pub trait ApplicationCollection: DocumentStore<ApplicationDocument> {
    /// Applications whose owner is the given user.
    async fn find_by_owner_user(
        &self,
        username: &str,
    ) -> Result<Vec<ApplicationDocument>, StoreError>;

    /// Applications whose owner is the given team.
    async fn find_by_owner_team(&self, team: &str)
        -> Result<Vec<ApplicationDocument>, StoreError>;

    async fn count_by_owner_user(&self, username: &str) -> Result<u64, StoreError>;

    async fn count_by_owner_team(&self, team: &str) -> Result<u64, StoreError>;
}

/// The `apis` collection.
///
/// The `public_only` flag restricts results to APIs not marked private.
#[async_trait]
pub trait ApiCollection: DocumentStore<ApiDocument> {
    async fn find_by_owner_user(
        &self,
        username: &str,
        public_only: bool,
    ) -> Result<Vec<ApiDocument>, StoreError>;

    async fn find_by_owner_team(
        &self,
        team: &str,
        public_only: bool,
    ) -> Result<Vec<ApiDocument>, StoreError>;

    /// APIs created by the given user.
    async fn find_by_creator(&self, username: &str) -> Result<Vec<ApiDocument>, StoreError>;

    async fn count_by_owner_user(&self, username: &str, public_only: bool)
        -> Result<u64, StoreError>;

    async fn count_by_owner_team(&self, team: &str, public_only: bool)
        -> Result<u64, StoreError>;
}

/// The `subscriptions` collection.
#[async_trait]
pub trait SubscriptionCollection: DocumentStore<SubscriptionDocument> {
    async fn find_by_plan(&self, plan: &str) -> Result<Vec<SubscriptionDocument>, StoreError>;

    async fn find_by_application(
        &self,
        application: &str,
    ) -> Result<Vec<SubscriptionDocument>, StoreError>;

    async fn find_by_api(&self, api: &str) -> Result<Vec<SubscriptionDocument>, StoreError>;
}

/// The `notifications` collection.
#[async_trait]
pub trait NotificationCollection: DocumentStore<NotificationDocument> {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Vec<NotificationDocument>, StoreError>;
}

/// The `ratings` collection.
#[async_trait]
pub trait RatingCollection: DocumentStore<RatingDocument> {
    async fn find_by_api(&self, api: &str) -> Result<Vec<RatingDocument>, StoreError>;

    /// At most one rating exists per (api, user) pair.
    async fn find_by_api_and_user(
        &self,
        api: &str,
        user: &str,
    ) -> Result<Option<RatingDocument>, StoreError>;

    /// Paged variant of [`find_by_api`](Self::find_by_api).
    async fn find_by_api_paged(
        &self,
        api: &str,
        query: &PageQuery,
    ) -> Result<DocumentPage<RatingDocument>, StoreError>;
}

/// The `users` collection. Lookup collaborator for reference resolution;
/// the base CRUD surface is all the mapper needs.
pub trait UserCollection: DocumentStore<UserDocument> {}

/// The `teams` collection. Lookup collaborator for reference resolution.
pub trait TeamCollection: DocumentStore<TeamDocument> {}
