//! PostgreSQL Storage Engine
//!
//! Each collection lives in its own `(key TEXT PRIMARY KEY, doc JSONB)`
//! table; derived queries filter on JSONB path expressions. The expression
//! indexes backing those filters are created by the bundled migrations.

use std::marker::PhantomData;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::postgres::{PgPool, PgPoolOptions};
use uuid::Uuid;

use crate::config::DatabaseConfig;

use super::collections::{
    ApiCollection, ApplicationCollection, NotificationCollection, RatingCollection,
    SubscriptionCollection, TeamCollection, UserCollection,
};
use super::documents::{
    ApiDocument, ApplicationDocument, NotificationDocument, RatingDocument, SubscriptionDocument,
    TeamDocument, UserDocument,
};
use super::engine::{
    Document, DocumentPage, DocumentStore, PageQuery, Sort, SortKey, SortOrder, StoreError,
};

const UNIQUE_VIOLATION: &str = "23505";

/// One PostgreSQL-backed collection. The table name is the collection name.
pub struct PgCollection<D> {
    pool: PgPool,
    _marker: PhantomData<fn() -> D>,
}

impl<D> Clone for PgCollection<D> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _marker: PhantomData,
        }
    }
}

impl<D> PgCollection<D>
where
    D: Document + Serialize + DeserializeOwned,
{
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _marker: PhantomData,
        }
    }

    fn decode_all(values: Vec<serde_json::Value>) -> Result<Vec<D>, StoreError> {
        values
            .into_iter()
            .map(|v| Ok(serde_json::from_value(v)?))
            .collect()
    }

    /// Documents matching a single-bind WHERE body.
    async fn find_where(&self, condition: &str, value: &str) -> Result<Vec<D>, StoreError> {
        let sql = format!("SELECT doc FROM {} WHERE {}", D::COLLECTION, condition);
        let rows: Vec<serde_json::Value> = sqlx::query_scalar(&sql)
            .bind(value)
            .fetch_all(&self.pool)
            .await?;
        Self::decode_all(rows)
    }

    async fn count_where(&self, condition: &str, value: &str) -> Result<u64, StoreError> {
        let sql = format!("SELECT COUNT(*) FROM {} WHERE {}", D::COLLECTION, condition);
        let count: i64 = sqlx::query_scalar(&sql)
            .bind(value)
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }
}

#[async_trait]
impl<D> DocumentStore<D> for PgCollection<D>
where
    D: Document + Serialize + DeserializeOwned,
{
    async fn find_all(&self) -> Result<Vec<D>, StoreError> {
        let sql = format!("SELECT doc FROM {}", D::COLLECTION);
        let rows: Vec<serde_json::Value> = sqlx::query_scalar(&sql).fetch_all(&self.pool).await?;
        Self::decode_all(rows)
    }

    async fn find_one(&self, key: &str) -> Result<Option<D>, StoreError> {
        let sql = format!("SELECT doc FROM {} WHERE key = $1", D::COLLECTION);
        let row: Option<serde_json::Value> = sqlx::query_scalar(&sql)
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|v| Ok(serde_json::from_value(v)?)).transpose()
    }

    async fn insert(&self, mut doc: D) -> Result<D, StoreError> {
        if doc.key().is_empty() {
            doc.assign_key(Uuid::new_v4().to_string());
        }
        let body = serde_json::to_value(&doc)?;
        let sql = format!("INSERT INTO {} (key, doc) VALUES ($1, $2)", D::COLLECTION);
        let result = sqlx::query(&sql)
            .bind(doc.key())
            .bind(&body)
            .execute(&self.pool)
            .await;
        match result {
            Ok(_) => Ok(doc),
            Err(sqlx::Error::Database(db)) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                Err(StoreError::DuplicateKey {
                    collection: D::COLLECTION,
                    key: doc.key().to_string(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, doc: D) -> Result<D, StoreError> {
        let body = serde_json::to_value(&doc)?;
        let sql = format!(
            "INSERT INTO {} (key, doc) VALUES ($1, $2) \
             ON CONFLICT (key) DO UPDATE SET doc = EXCLUDED.doc",
            D::COLLECTION
        );
        sqlx::query(&sql)
            .bind(doc.key())
            .bind(&body)
            .execute(&self.pool)
            .await?;
        Ok(doc)
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let sql = format!("DELETE FROM {} WHERE key = $1", D::COLLECTION);
        sqlx::query(&sql).bind(key).execute(&self.pool).await?;
        Ok(())
    }
}

const OWNER_USER: &str = "doc->'owner'->>'kind' = 'USER' AND doc->'owner'->>'name' = $1";
const OWNER_TEAM: &str = "doc->'owner'->>'kind' = 'TEAM' AND doc->'owner'->>'name' = $1";
const PUBLIC_ONLY: &str = " AND (doc->>'privateApi')::boolean = false";

fn order_clause(sort: &Sort) -> String {
    let field = match sort.key {
        SortKey::CreatedAt => "createdAt",
        SortKey::UpdatedAt => "updatedAt",
    };
    let direction = match sort.order {
        SortOrder::Ascending => "ASC",
        SortOrder::Descending => "DESC",
    };
    format!("ORDER BY (doc->>'{}')::timestamptz {}", field, direction)
}

#[async_trait]
impl ApplicationCollection for PgCollection<ApplicationDocument> {
    async fn find_by_owner_user(
        &self,
        username: &str,
    ) -> Result<Vec<ApplicationDocument>, StoreError> {
        self.find_where(OWNER_USER, username).await
    }

    async fn find_by_owner_team(
        &self,
        team: &str,
    ) -> Result<Vec<ApplicationDocument>, StoreError> {
        self.find_where(OWNER_TEAM, team).await
    }

    async fn count_by_owner_user(&self, username: &str) -> Result<u64, StoreError> {
        self.count_where(OWNER_USER, username).await
    }

    async fn count_by_owner_team(&self, team: &str) -> Result<u64, StoreError> {
        self.count_where(OWNER_TEAM, team).await
    }
}

fn owner_condition(base: &str, public_only: bool) -> String {
    if public_only {
        format!("{}{}", base, PUBLIC_ONLY)
    } else {
        base.to_string()
    }
}

#[async_trait]
impl ApiCollection for PgCollection<ApiDocument> {
    async fn find_by_owner_user(
        &self,
        username: &str,
        public_only: bool,
    ) -> Result<Vec<ApiDocument>, StoreError> {
        self.find_where(&owner_condition(OWNER_USER, public_only), username)
            .await
    }

    async fn find_by_owner_team(
        &self,
        team: &str,
        public_only: bool,
    ) -> Result<Vec<ApiDocument>, StoreError> {
        self.find_where(&owner_condition(OWNER_TEAM, public_only), team)
            .await
    }

    async fn find_by_creator(&self, username: &str) -> Result<Vec<ApiDocument>, StoreError> {
        self.find_where("doc->'creator'->>'name' = $1", username)
            .await
    }

    async fn count_by_owner_user(
        &self,
        username: &str,
        public_only: bool,
    ) -> Result<u64, StoreError> {
        self.count_where(&owner_condition(OWNER_USER, public_only), username)
            .await
    }

    async fn count_by_owner_team(&self, team: &str, public_only: bool) -> Result<u64, StoreError> {
        self.count_where(&owner_condition(OWNER_TEAM, public_only), team)
            .await
    }
}

#[async_trait]
impl SubscriptionCollection for PgCollection<SubscriptionDocument> {
    async fn find_by_plan(&self, plan: &str) -> Result<Vec<SubscriptionDocument>, StoreError> {
        self.find_where("doc->>'plan' = $1", plan).await
    }

    async fn find_by_application(
        &self,
        application: &str,
    ) -> Result<Vec<SubscriptionDocument>, StoreError> {
        self.find_where("doc->>'application' = $1", application)
            .await
    }

    async fn find_by_api(&self, api: &str) -> Result<Vec<SubscriptionDocument>, StoreError> {
        self.find_where("doc->>'api' = $1", api).await
    }
}

#[async_trait]
impl NotificationCollection for PgCollection<NotificationDocument> {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Vec<NotificationDocument>, StoreError> {
        self.find_where("doc->>'username' = $1", username).await
    }
}

#[async_trait]
impl RatingCollection for PgCollection<RatingDocument> {
    async fn find_by_api(&self, api: &str) -> Result<Vec<RatingDocument>, StoreError> {
        self.find_where("doc->>'api' = $1", api).await
    }

    async fn find_by_api_and_user(
        &self,
        api: &str,
        user: &str,
    ) -> Result<Option<RatingDocument>, StoreError> {
        let row: Option<serde_json::Value> = sqlx::query_scalar(
            "SELECT doc FROM ratings WHERE doc->>'api' = $1 AND doc->>'user' = $2",
        )
        .bind(api)
        .bind(user)
        .fetch_optional(&self.pool)
        .await?;
        row.map(|v| Ok(serde_json::from_value(v)?)).transpose()
    }

    async fn find_by_api_paged(
        &self,
        api: &str,
        query: &PageQuery,
    ) -> Result<DocumentPage<RatingDocument>, StoreError> {
        let sql = format!(
            "SELECT doc FROM ratings WHERE doc->>'api' = $1 {} LIMIT $2 OFFSET $3",
            order_clause(&query.sort)
        );
        let rows: Vec<serde_json::Value> = sqlx::query_scalar(&sql)
            .bind(api)
            .bind(query.size as i64)
            .bind(query.page as i64 * query.size as i64)
            .fetch_all(&self.pool)
            .await?;
        let content = Self::decode_all(rows)?;
        let total = self.count_where("doc->>'api' = $1", api).await?;
        Ok(DocumentPage {
            content,
            page: query.page,
            total,
        })
    }
}

impl UserCollection for PgCollection<UserDocument> {}

impl TeamCollection for PgCollection<TeamDocument> {}

/// PostgreSQL-backed engine: a pool plus typed collection handles.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connects using the pool settings from configuration, optionally
    /// running the bundled migrations.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .idle_timeout(config.idle_timeout())
            .max_lifetime(config.max_lifetime())
            .connect(&config.url)
            .await?;

        if config.run_migrations {
            sqlx::migrate!("./migrations").run(&pool).await?;
        }

        Ok(Self { pool })
    }

    /// Wraps an existing pool (tests, shared pools).
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn applications(&self) -> PgCollection<ApplicationDocument> {
        PgCollection::new(self.pool.clone())
    }

    pub fn apis(&self) -> PgCollection<ApiDocument> {
        PgCollection::new(self.pool.clone())
    }

    pub fn subscriptions(&self) -> PgCollection<SubscriptionDocument> {
        PgCollection::new(self.pool.clone())
    }

    pub fn notifications(&self) -> PgCollection<NotificationDocument> {
        PgCollection::new(self.pool.clone())
    }

    pub fn ratings(&self) -> PgCollection<RatingDocument> {
        PgCollection::new(self.pool.clone())
    }

    pub fn users(&self) -> PgCollection<UserDocument> {
        PgCollection::new(self.pool.clone())
    }

    pub fn teams(&self) -> PgCollection<TeamDocument> {
        PgCollection::new(self.pool.clone())
    }
}
