//! Integration tests for the subscription repository over the in-memory
//! engine.

mod common;

use chrono::{Duration, TimeZone, Utc};

use aperture_repository::domain::{ErrorCode, Subscription, SubscriptionStatus};
use aperture_repository::ports::SubscriptionRepository;

use common::Harness;

fn subscription(api: &str, plan: &str, application: &str) -> Subscription {
    let at = Utc.with_ymd_and_hms(2016, 3, 1, 10, 0, 0).unwrap();
    Subscription {
        api: api.into(),
        plan: plan.into(),
        application: application.into(),
        status: SubscriptionStatus::Pending,
        subscribed_by: Some("alice".into()),
        created_at: at,
        updated_at: at,
        ..Default::default()
    }
}

#[tokio::test]
async fn create_assigns_an_id_and_find_by_id_returns_it() {
    let harness = Harness::new();

    let created = harness
        .subscriptions
        .create(&subscription("orders", "gold", "shop"))
        .await
        .unwrap();
    assert!(!created.id.is_empty());

    let found = harness
        .subscriptions
        .find_by_id(&created.id)
        .await
        .unwrap()
        .expect("subscription saved not found");
    assert_eq!(found.api, "orders");
    assert_eq!(found.plan, "gold");
    assert_eq!(found.application, "shop");
    assert_eq!(found.status, SubscriptionStatus::Pending);
    assert_eq!(found.subscribed_by.as_deref(), Some("alice"));
}

#[tokio::test]
async fn filtered_queries_match_plan_application_and_api() {
    let harness = Harness::new();

    harness
        .subscriptions
        .create(&subscription("orders", "gold", "shop"))
        .await
        .unwrap();
    harness
        .subscriptions
        .create(&subscription("orders", "silver", "shop"))
        .await
        .unwrap();
    harness
        .subscriptions
        .create(&subscription("billing", "gold", "backoffice"))
        .await
        .unwrap();

    assert_eq!(harness.subscriptions.find_by_plan("gold").await.unwrap().len(), 2);
    assert_eq!(
        harness
            .subscriptions
            .find_by_application("shop")
            .await
            .unwrap()
            .len(),
        2
    );
    assert_eq!(harness.subscriptions.find_by_api("orders").await.unwrap().len(), 2);
    assert!(harness
        .subscriptions
        .find_by_plan("platinum")
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn update_mutates_the_processing_lifecycle_only() {
    let harness = Harness::new();

    let created = harness
        .subscriptions
        .create(&subscription("orders", "gold", "shop"))
        .await
        .unwrap();

    let mut update = created.clone();
    update.status = SubscriptionStatus::Rejected;
    update.processed_at = Some(created.created_at + Duration::hours(2));
    update.processed_by = Some("admin".into());
    update.reason = Some("quota exhausted".into());
    update.updated_at = created.updated_at + Duration::hours(2);
    // The payload also claims a different linkage; it must stay as stored.
    update.api = "billing".into();
    update.plan = "silver".into();
    update.application = "backoffice".into();
    update.subscribed_by = Some("mallory".into());
    update.created_at = created.created_at + Duration::days(1);

    harness.subscriptions.update(&update).await.unwrap();

    let found = harness
        .subscriptions
        .find_by_id(&created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.status, SubscriptionStatus::Rejected);
    assert_eq!(found.processed_by.as_deref(), Some("admin"));
    assert_eq!(found.reason.as_deref(), Some("quota exhausted"));
    assert_eq!(found.updated_at, update.updated_at);
    assert_eq!(found.api, "orders");
    assert_eq!(found.plan, "gold");
    assert_eq!(found.application, "shop");
    assert_eq!(found.subscribed_by.as_deref(), Some("alice"));
    assert_eq!(found.created_at, created.created_at);
}

#[tokio::test]
async fn update_without_an_id_fails_fast() {
    let harness = Harness::new();
    let err = harness
        .subscriptions
        .update(&subscription("orders", "gold", "shop"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidArgument);
}

#[tokio::test]
async fn update_on_missing_subscription_fails_with_not_found() {
    let harness = Harness::new();
    let mut ghost = subscription("orders", "gold", "shop");
    ghost.id = "ghost".into();
    let err = harness.subscriptions.update(&ghost).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn delete_removes_the_subscription() {
    let harness = Harness::new();
    let created = harness
        .subscriptions
        .create(&subscription("orders", "gold", "shop"))
        .await
        .unwrap();
    harness.subscriptions.delete(&created.id).await.unwrap();
    assert!(harness
        .subscriptions
        .find_by_id(&created.id)
        .await
        .unwrap()
        .is_none());
}
