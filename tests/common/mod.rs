//! Shared test harness: repositories wired against the in-memory engine.

#![allow(dead_code)]

use aperture_repository::adapters::{
    DocstoreApiRepository, DocstoreApplicationRepository, DocstoreNotificationRepository,
    DocstoreRatingRepository, DocstoreSubscriptionRepository,
};
use aperture_repository::store::{DocumentStore, MemoryStore, TeamDocument, UserDocument};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .try_init();
}

/// All five repositories over one shared in-memory store.
pub struct Harness {
    pub store: MemoryStore,
    pub applications: DocstoreApplicationRepository,
    pub apis: DocstoreApiRepository,
    pub subscriptions: DocstoreSubscriptionRepository,
    pub notifications: DocstoreNotificationRepository,
    pub ratings: DocstoreRatingRepository,
}

impl Harness {
    pub fn new() -> Self {
        init_tracing();
        let store = MemoryStore::new();
        let applications = DocstoreApplicationRepository::new(
            store.applications(),
            store.users(),
            store.teams(),
        );
        let apis = DocstoreApiRepository::new(
            store.apis(),
            store.subscriptions(),
            store.users(),
            store.teams(),
        );
        let subscriptions = DocstoreSubscriptionRepository::new(store.subscriptions());
        let notifications = DocstoreNotificationRepository::new(store.notifications());
        let ratings = DocstoreRatingRepository::new(store.ratings());
        Self {
            store,
            applications,
            apis,
            subscriptions,
            notifications,
            ratings,
        }
    }

    pub async fn seed_user(&self, name: &str) {
        self.store
            .users()
            .save(UserDocument {
                name: name.into(),
                email: Some(format!("{}@itest.test", name)),
            })
            .await
            .expect("seed user");
    }

    pub async fn seed_team(&self, name: &str) {
        self.store
            .teams()
            .save(TeamDocument {
                name: name.into(),
                description: None,
            })
            .await
            .expect("seed team");
    }
}
