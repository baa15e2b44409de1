//! In-Memory Storage Engine
//!
//! Keeps every collection in a `HashMap` behind a `tokio` lock.
//! Useful for testing and development; also the reference semantics for the
//! collection contract (key assignment, duplicate detection, paging).

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use async_trait::async_trait;

use super::collections::{
    ApiCollection, ApplicationCollection, NotificationCollection, RatingCollection,
    SubscriptionCollection, TeamCollection, UserCollection,
};
use super::documents::{
    ApiDocument, ApplicationDocument, NotificationDocument, OwnerDocument, RatingDocument,
    SubscriptionDocument, TeamDocument, UserDocument,
};
use super::engine::{
    Document, DocumentPage, DocumentStore, PageQuery, SortKey, SortOrder, StoreError,
};

/// One in-memory collection, keyed by document identity.
#[derive(Debug, Clone)]
pub struct MemoryCollection<D> {
    docs: Arc<RwLock<HashMap<String, D>>>,
}

impl<D> MemoryCollection<D> {
    pub fn new() -> Self {
        Self {
            docs: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Clear all stored documents (useful for tests).
    pub async fn clear(&self) {
        self.docs.write().await.clear();
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.docs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.docs.read().await.is_empty()
    }
}

impl<D> Default for MemoryCollection<D> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<D> DocumentStore<D> for MemoryCollection<D>
where
    D: Document,
{
    async fn find_all(&self) -> Result<Vec<D>, StoreError> {
        Ok(self.docs.read().await.values().cloned().collect())
    }

    async fn find_one(&self, key: &str) -> Result<Option<D>, StoreError> {
        Ok(self.docs.read().await.get(key).cloned())
    }

    async fn insert(&self, mut doc: D) -> Result<D, StoreError> {
        if doc.key().is_empty() {
            doc.assign_key(Uuid::new_v4().to_string());
        }
        let mut docs = self.docs.write().await;
        if docs.contains_key(doc.key()) {
            return Err(StoreError::DuplicateKey {
                collection: D::COLLECTION,
                key: doc.key().to_string(),
            });
        }
        docs.insert(doc.key().to_string(), doc.clone());
        Ok(doc)
    }

    async fn save(&self, doc: D) -> Result<D, StoreError> {
        let mut docs = self.docs.write().await;
        docs.insert(doc.key().to_string(), doc.clone());
        Ok(doc)
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.docs.write().await.remove(key);
        Ok(())
    }
}

impl<D> MemoryCollection<D>
where
    D: Document,
{
    async fn filtered(&self, predicate: impl Fn(&D) -> bool) -> Vec<D> {
        self.docs
            .read()
            .await
            .values()
            .filter(|d| predicate(d))
            .cloned()
            .collect()
    }
}

fn owned_by_user(owner: &Option<OwnerDocument>, username: &str) -> bool {
    matches!(owner, Some(OwnerDocument::User(user)) if user.name == username)
}

fn owned_by_team(owner: &Option<OwnerDocument>, team: &str) -> bool {
    matches!(owner, Some(OwnerDocument::Team(t)) if t.name == team)
}

#[async_trait]
impl ApplicationCollection for MemoryCollection<ApplicationDocument> {
    async fn find_by_owner_user(
        &self,
        username: &str,
    ) -> Result<Vec<ApplicationDocument>, StoreError> {
        Ok(self.filtered(|d| owned_by_user(&d.owner, username)).await)
    }

    async fn find_by_owner_team(
        &self,
        team: &str,
    ) -> Result<Vec<ApplicationDocument>, StoreError> {
        Ok(self.filtered(|d| owned_by_team(&d.owner, team)).await)
    }

    async fn count_by_owner_user(&self, username: &str) -> Result<u64, StoreError> {
        Ok(self.find_by_owner_user(username).await?.len() as u64)
    }

    async fn count_by_owner_team(&self, team: &str) -> Result<u64, StoreError> {
        Ok(self.find_by_owner_team(team).await?.len() as u64)
    }
}

#[async_trait]
impl ApiCollection for MemoryCollection<ApiDocument> {
    async fn find_by_owner_user(
        &self,
        username: &str,
        public_only: bool,
    ) -> Result<Vec<ApiDocument>, StoreError> {
        Ok(self
            .filtered(|d| owned_by_user(&d.owner, username) && (!public_only || !d.private_api))
            .await)
    }

    async fn find_by_owner_team(
        &self,
        team: &str,
        public_only: bool,
    ) -> Result<Vec<ApiDocument>, StoreError> {
        Ok(self
            .filtered(|d| owned_by_team(&d.owner, team) && (!public_only || !d.private_api))
            .await)
    }

    async fn find_by_creator(&self, username: &str) -> Result<Vec<ApiDocument>, StoreError> {
        Ok(self
            .filtered(|d| d.creator.as_ref().is_some_and(|c| c.name == username))
            .await)
    }

    async fn count_by_owner_user(
        &self,
        username: &str,
        public_only: bool,
    ) -> Result<u64, StoreError> {
        Ok(self.find_by_owner_user(username, public_only).await?.len() as u64)
    }

    async fn count_by_owner_team(&self, team: &str, public_only: bool) -> Result<u64, StoreError> {
        Ok(self.find_by_owner_team(team, public_only).await?.len() as u64)
    }
}

#[async_trait]
impl SubscriptionCollection for MemoryCollection<SubscriptionDocument> {
    async fn find_by_plan(&self, plan: &str) -> Result<Vec<SubscriptionDocument>, StoreError> {
        Ok(self.filtered(|d| d.plan == plan).await)
    }

    async fn find_by_application(
        &self,
        application: &str,
    ) -> Result<Vec<SubscriptionDocument>, StoreError> {
        Ok(self.filtered(|d| d.application == application).await)
    }

    async fn find_by_api(&self, api: &str) -> Result<Vec<SubscriptionDocument>, StoreError> {
        Ok(self.filtered(|d| d.api == api).await)
    }
}

#[async_trait]
impl NotificationCollection for MemoryCollection<NotificationDocument> {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Vec<NotificationDocument>, StoreError> {
        Ok(self.filtered(|d| d.username == username).await)
    }
}

#[async_trait]
impl RatingCollection for MemoryCollection<RatingDocument> {
    async fn find_by_api(&self, api: &str) -> Result<Vec<RatingDocument>, StoreError> {
        Ok(self.filtered(|d| d.api == api).await)
    }

    async fn find_by_api_and_user(
        &self,
        api: &str,
        user: &str,
    ) -> Result<Option<RatingDocument>, StoreError> {
        Ok(self
            .filtered(|d| d.api == api && d.user == user)
            .await
            .into_iter()
            .next())
    }

    async fn find_by_api_paged(
        &self,
        api: &str,
        query: &PageQuery,
    ) -> Result<DocumentPage<RatingDocument>, StoreError> {
        let mut matches = self.filtered(|d| d.api == api).await;
        matches.sort_by_key(|d| match query.sort.key {
            SortKey::CreatedAt => d.created_at,
            SortKey::UpdatedAt => d.updated_at,
        });
        if query.sort.order == SortOrder::Descending {
            matches.reverse();
        }
        let total = matches.len() as u64;
        let start = query.page as usize * query.size as usize;
        let content: Vec<RatingDocument> = matches
            .into_iter()
            .skip(start)
            .take(query.size as usize)
            .collect();
        Ok(DocumentPage {
            content,
            page: query.page,
            total,
        })
    }
}

impl UserCollection for MemoryCollection<UserDocument> {}

impl TeamCollection for MemoryCollection<TeamDocument> {}

/// In-memory engine: one [`MemoryCollection`] per collection.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    applications: Arc<MemoryCollection<ApplicationDocument>>,
    apis: Arc<MemoryCollection<ApiDocument>>,
    subscriptions: Arc<MemoryCollection<SubscriptionDocument>>,
    notifications: Arc<MemoryCollection<NotificationDocument>>,
    ratings: Arc<MemoryCollection<RatingDocument>>,
    users: Arc<MemoryCollection<UserDocument>>,
    teams: Arc<MemoryCollection<TeamDocument>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn applications(&self) -> Arc<MemoryCollection<ApplicationDocument>> {
        Arc::clone(&self.applications)
    }

    pub fn apis(&self) -> Arc<MemoryCollection<ApiDocument>> {
        Arc::clone(&self.apis)
    }

    pub fn subscriptions(&self) -> Arc<MemoryCollection<SubscriptionDocument>> {
        Arc::clone(&self.subscriptions)
    }

    pub fn notifications(&self) -> Arc<MemoryCollection<NotificationDocument>> {
        Arc::clone(&self.notifications)
    }

    pub fn ratings(&self) -> Arc<MemoryCollection<RatingDocument>> {
        Arc::clone(&self.ratings)
    }

    pub fn users(&self) -> Arc<MemoryCollection<UserDocument>> {
        Arc::clone(&self.users)
    }

    pub fn teams(&self) -> Arc<MemoryCollection<TeamDocument>> {
        Arc::clone(&self.teams)
    }
}

#[cfg(test)]
mod tests {
    use super::super::engine::Sort;
    use super::*;
    use chrono::{TimeZone, Utc};

    fn rating(id: &str, api: &str, day: u32) -> RatingDocument {
        let at = Utc.with_ymd_and_hms(2016, 3, day, 10, 0, 0).unwrap();
        RatingDocument {
            id: id.into(),
            api: api.into(),
            user: "alice".into(),
            rate: 4,
            title: "solid".into(),
            comment: None,
            created_at: at,
            updated_at: at,
        }
    }

    #[tokio::test]
    async fn insert_assigns_key_when_empty() {
        let ratings = MemoryCollection::<RatingDocument>::new();
        let created = ratings.insert(rating("", "echo", 1)).await.unwrap();
        assert!(!created.id.is_empty());
        assert!(ratings.find_one(&created.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_key() {
        let ratings = MemoryCollection::<RatingDocument>::new();
        ratings.insert(rating("r-1", "echo", 1)).await.unwrap();
        let err = ratings.insert(rating("r-1", "echo", 2)).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey { collection, .. } if collection == "ratings"));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let ratings = MemoryCollection::<RatingDocument>::new();
        ratings.insert(rating("r-1", "echo", 1)).await.unwrap();
        ratings.delete("r-1").await.unwrap();
        ratings.delete("r-1").await.unwrap();
        assert!(ratings.is_empty().await);
    }

    #[tokio::test]
    async fn paged_find_sorts_descending_by_creation() {
        let ratings = MemoryCollection::<RatingDocument>::new();
        for day in 1..=5 {
            ratings
                .insert(rating(&format!("r-{day}"), "echo", day))
                .await
                .unwrap();
        }
        ratings.insert(rating("other", "ping", 9)).await.unwrap();

        let query = PageQuery {
            page: 0,
            size: 2,
            sort: Sort::descending(SortKey::CreatedAt),
        };
        let page = ratings.find_by_api_paged("echo", &query).await.unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.page, 0);
        let ids: Vec<&str> = page.content.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["r-5", "r-4"]);

        let last = ratings
            .find_by_api_paged("echo", &PageQuery { page: 2, ..query })
            .await
            .unwrap();
        assert_eq!(last.content.len(), 1);
        assert_eq!(last.content[0].id, "r-1");
    }
}
