//! Integration tests for the application repository over the in-memory
//! engine, including the ownership-change scenario.

mod common;

use chrono::{Duration, TimeZone, Utc};

use aperture_repository::domain::{Application, OwnerType};
use aperture_repository::ports::ApplicationRepository;

use common::Harness;

fn application(name: &str, owner: &str, owner_type: OwnerType) -> Application {
    let at = Utc.with_ymd_and_hms(2016, 3, 1, 10, 0, 0).unwrap();
    Application {
        name: name.into(),
        description: Some("a test application".into()),
        app_type: Some("web".into()),
        owner: Some(owner.into()),
        owner_type: Some(owner_type),
        creator: Some("creator".into()),
        created_at: at,
        updated_at: at,
    }
}

#[tokio::test]
async fn create_then_find_by_name_returns_the_stored_application() {
    let harness = Harness::new();
    harness.seed_user("alice").await;
    harness.seed_user("creator").await;

    let app = application("app-1", "alice", OwnerType::User);
    harness.applications.create(&app).await.unwrap();

    let found = harness
        .applications
        .find_by_name("app-1")
        .await
        .unwrap()
        .expect("application saved not found");
    assert_eq!(found.name, "app-1");
    assert_eq!(found.description, app.description);
    assert_eq!(found.app_type, app.app_type);
    assert_eq!(found.owner.as_deref(), Some("alice"));
    assert_eq!(found.owner_type, Some(OwnerType::User));
    assert_eq!(found.creator.as_deref(), Some("creator"));
    assert_eq!(found.created_at, app.created_at);
    assert_eq!(found.updated_at, app.updated_at);
}

#[tokio::test]
async fn find_by_name_on_missing_application_returns_none() {
    let harness = Harness::new();
    let found = harness.applications.find_by_name("missing").await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn ownership_can_move_from_user_to_team() {
    let harness = Harness::new();
    harness.seed_user("alice").await;
    harness.seed_team("team-x").await;

    let app = application("app-1", "alice", OwnerType::User);
    harness.applications.create(&app).await.unwrap();

    let mut update = application("app-1", "team-x", OwnerType::Team);
    update.updated_at = app.updated_at + Duration::hours(1);
    harness.applications.update(&update).await.unwrap();

    let found = harness
        .applications
        .find_by_name("app-1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.owner.as_deref(), Some("team-x"));
    assert_eq!(found.owner_type, Some(OwnerType::Team));
}

#[tokio::test]
async fn update_preserves_identity_and_creation_fields() {
    let harness = Harness::new();
    harness.seed_user("alice").await;
    harness.seed_user("creator").await;

    let app = application("app-1", "alice", OwnerType::User);
    harness.applications.create(&app).await.unwrap();

    // The payload claims a different creation timestamp and creator; both
    // must stay as stored.
    let mut update = application("app-1", "alice", OwnerType::User);
    update.description = Some("updated".into());
    update.app_type = Some("mobile".into());
    update.creator = Some("mallory".into());
    update.created_at = app.created_at + Duration::days(30);
    update.updated_at = app.updated_at + Duration::hours(1);
    harness.applications.update(&update).await.unwrap();

    let found = harness
        .applications
        .find_by_name("app-1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.description.as_deref(), Some("updated"));
    assert_eq!(found.app_type.as_deref(), Some("mobile"));
    assert_eq!(found.updated_at, update.updated_at);
    assert_eq!(found.created_at, app.created_at);
    assert_eq!(found.creator.as_deref(), Some("creator"));
}

#[tokio::test]
async fn update_on_missing_application_fails_with_not_found() {
    let harness = Harness::new();
    let err = harness
        .applications
        .update(&application("ghost", "alice", OwnerType::User))
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    // Nothing was created as a side effect.
    assert!(harness
        .applications
        .find_by_name("ghost")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn duplicate_create_fails_with_a_technical_error() {
    let harness = Harness::new();
    harness.seed_user("alice").await;

    let app = application("app-1", "alice", OwnerType::User);
    harness.applications.create(&app).await.unwrap();
    let err = harness.applications.create(&app).await.unwrap_err();
    assert!(!err.is_not_found());
    assert_eq!(
        err.code,
        aperture_repository::domain::ErrorCode::StorageError
    );
}

#[tokio::test]
async fn find_by_user_and_team_filter_on_the_owner_reference() {
    let harness = Harness::new();
    harness.seed_user("alice").await;
    harness.seed_user("bob").await;
    harness.seed_team("platform").await;

    for name in ["a-1", "a-2"] {
        harness
            .applications
            .create(&application(name, "alice", OwnerType::User))
            .await
            .unwrap();
    }
    harness
        .applications
        .create(&application("b-1", "bob", OwnerType::User))
        .await
        .unwrap();
    harness
        .applications
        .create(&application("t-1", "platform", OwnerType::Team))
        .await
        .unwrap();

    let by_alice = harness.applications.find_by_user("alice").await.unwrap();
    assert_eq!(by_alice.len(), 2);
    let by_team = harness.applications.find_by_team("platform").await.unwrap();
    assert_eq!(by_team.len(), 1);

    // An owner name only matches its own kind.
    assert!(harness
        .applications
        .find_by_team("alice")
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn counts_agree_with_the_filtered_queries() {
    let harness = Harness::new();
    harness.seed_user("alice").await;
    harness.seed_team("platform").await;

    for name in ["a-1", "a-2", "a-3"] {
        harness
            .applications
            .create(&application(name, "alice", OwnerType::User))
            .await
            .unwrap();
    }
    harness
        .applications
        .create(&application("t-1", "platform", OwnerType::Team))
        .await
        .unwrap();

    let by_user = harness.applications.find_by_user("alice").await.unwrap();
    assert_eq!(
        harness.applications.count_by_user("alice").await.unwrap(),
        by_user.len() as u64
    );
    let by_team = harness.applications.find_by_team("platform").await.unwrap();
    assert_eq!(
        harness.applications.count_by_team("platform").await.unwrap(),
        by_team.len() as u64
    );
}

#[tokio::test]
async fn delete_removes_the_application_and_is_idempotent() {
    let harness = Harness::new();
    harness.seed_user("alice").await;

    harness
        .applications
        .create(&application("app-1", "alice", OwnerType::User))
        .await
        .unwrap();
    let before = harness.applications.find_all().await.unwrap().len();
    harness.applications.delete("app-1").await.unwrap();
    let after = harness.applications.find_all().await.unwrap().len();
    assert_eq!(before - 1, after);

    // Deleting an absent name is not an error.
    harness.applications.delete("app-1").await.unwrap();
}

#[tokio::test]
async fn create_with_unknown_owner_degrades_silently() {
    let harness = Harness::new();

    let app = application("orphan", "nobody", OwnerType::User);
    let created = harness.applications.create(&app).await.unwrap();
    assert!(created.owner.is_none());
    assert!(created.owner_type.is_none());
    assert!(created.creator.is_none());
}
