//! Smoke tests for the PostgreSQL engine.
//!
//! Ignored by default; run them against a throwaway database:
//!
//! ```sh
//! DATABASE_URL=postgres://localhost/aperture_test cargo test -- --ignored
//! ```

use aperture_repository::config::DatabaseConfig;
use aperture_repository::store::{DocumentStore, PgStore, StoreError, UserDocument};

fn database_config() -> DatabaseConfig {
    DatabaseConfig {
        url: std::env::var("DATABASE_URL").expect("DATABASE_URL must point at a test database"),
        min_connections: 1,
        max_connections: 2,
        acquire_timeout_secs: 5,
        idle_timeout_secs: 60,
        max_lifetime_secs: 600,
        run_migrations: true,
    }
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance via DATABASE_URL"]
async fn save_find_delete_round_trip() {
    let store = PgStore::connect(&database_config()).await.unwrap();
    let users = store.users();

    let user = UserDocument {
        name: "pg-smoke".into(),
        email: Some("pg-smoke@itest.test".into()),
    };
    users.save(user.clone()).await.unwrap();

    let found = users.find_one("pg-smoke").await.unwrap();
    assert_eq!(found, Some(user));

    users.delete("pg-smoke").await.unwrap();
    assert!(users.find_one("pg-smoke").await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance via DATABASE_URL"]
async fn insert_rejects_duplicate_keys() {
    let store = PgStore::connect(&database_config()).await.unwrap();
    let users = store.users();

    let user = UserDocument {
        name: "pg-duplicate".into(),
        email: None,
    };
    users.delete("pg-duplicate").await.unwrap();
    users.insert(user.clone()).await.unwrap();
    let err = users.insert(user).await.unwrap_err();
    assert!(matches!(err, StoreError::DuplicateKey { .. }));

    users.delete("pg-duplicate").await.unwrap();
}
