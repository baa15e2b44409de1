//! Entity/document mapping.
//!
//! Explicit per-entity field mapping in both directions. The document to
//! domain direction is total on absent input: mapping `None` yields `None`,
//! never an error. The domain to document direction resolves reference
//! fields through [`RefResolver`]; a reference that cannot be resolved maps
//! to an absent field rather than failing the operation.

use std::sync::Arc;

use crate::domain::{
    Api, Application, Notification, OwnerType, Rating, Subscription,
};
use crate::store::{
    ApiDocument, ApplicationDocument, DocumentStore, NotificationDocument, OwnerDocument,
    RatingDocument, StoreError, SubscriptionDocument, TeamCollection, UserCollection,
    UserDocument,
};

/// Resolves owner and creator references against the user and team
/// collections when writing documents.
#[derive(Clone)]
pub struct RefResolver {
    users: Arc<dyn UserCollection>,
    teams: Arc<dyn TeamCollection>,
}

impl RefResolver {
    pub fn new(users: Arc<dyn UserCollection>, teams: Arc<dyn TeamCollection>) -> Self {
        Self { users, teams }
    }

    /// Resolves the polymorphic owner reference, branching on the owner
    /// type. An unknown name resolves to `None`.
    pub async fn resolve_owner(
        &self,
        owner_type: Option<OwnerType>,
        owner: Option<&str>,
    ) -> Result<Option<OwnerDocument>, StoreError> {
        match (owner_type, owner) {
            (Some(OwnerType::User), Some(name)) => {
                Ok(self.users.find_one(name).await?.map(OwnerDocument::User))
            }
            (Some(OwnerType::Team), Some(name)) => {
                Ok(self.teams.find_one(name).await?.map(OwnerDocument::Team))
            }
            _ => Ok(None),
        }
    }

    /// Resolves a user reference. An unknown name resolves to `None`.
    pub async fn resolve_user(
        &self,
        username: Option<&str>,
    ) -> Result<Option<UserDocument>, StoreError> {
        match username {
            Some(name) => self.users.find_one(name).await,
            None => Ok(None),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Application
// ════════════════════════════════════════════════════════════════════════════

pub fn application_from_document(doc: ApplicationDocument) -> Application {
    Application {
        name: doc.name,
        description: doc.description,
        app_type: doc.app_type,
        owner: doc.owner.as_ref().map(|o| o.name().to_string()),
        owner_type: doc.owner.as_ref().map(OwnerDocument::owner_type),
        creator: doc.creator.map(|c| c.name),
        created_at: doc.created_at,
        updated_at: doc.updated_at,
    }
}

pub fn map_application(doc: Option<ApplicationDocument>) -> Option<Application> {
    doc.map(application_from_document)
}

pub async fn application_to_document(
    application: &Application,
    resolver: &RefResolver,
) -> Result<ApplicationDocument, StoreError> {
    let owner = resolver
        .resolve_owner(application.owner_type, application.owner.as_deref())
        .await?;
    let creator = resolver.resolve_user(application.creator.as_deref()).await?;
    Ok(ApplicationDocument {
        name: application.name.clone(),
        description: application.description.clone(),
        app_type: application.app_type.clone(),
        owner,
        creator,
        created_at: application.created_at,
        updated_at: application.updated_at,
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Api
// ════════════════════════════════════════════════════════════════════════════

pub fn api_from_document(doc: ApiDocument) -> Api {
    Api {
        name: doc.name,
        version: doc.version,
        lifecycle_state: doc.lifecycle_state,
        private_api: doc.private_api,
        definition: doc.definition,
        owner: doc.owner.as_ref().map(|o| o.name().to_string()),
        owner_type: doc.owner.as_ref().map(OwnerDocument::owner_type),
        creator: doc.creator.map(|c| c.name),
        created_at: doc.created_at,
        updated_at: doc.updated_at,
    }
}

pub fn map_api(doc: Option<ApiDocument>) -> Option<Api> {
    doc.map(api_from_document)
}

pub async fn api_to_document(api: &Api, resolver: &RefResolver) -> Result<ApiDocument, StoreError> {
    let owner = resolver
        .resolve_owner(api.owner_type, api.owner.as_deref())
        .await?;
    let creator = resolver.resolve_user(api.creator.as_deref()).await?;
    Ok(ApiDocument {
        name: api.name.clone(),
        version: api.version.clone(),
        lifecycle_state: api.lifecycle_state,
        private_api: api.private_api,
        definition: api.definition.clone(),
        owner,
        creator,
        created_at: api.created_at,
        updated_at: api.updated_at,
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Subscription
// ════════════════════════════════════════════════════════════════════════════

pub fn subscription_from_document(doc: SubscriptionDocument) -> Subscription {
    Subscription {
        id: doc.id,
        api: doc.api,
        plan: doc.plan,
        application: doc.application,
        status: doc.status,
        processed_at: doc.processed_at,
        reason: doc.reason,
        processed_by: doc.processed_by,
        subscribed_by: doc.subscribed_by,
        starting_at: doc.starting_at,
        ending_at: doc.ending_at,
        closed_at: doc.closed_at,
        created_at: doc.created_at,
        updated_at: doc.updated_at,
    }
}

pub fn map_subscription(doc: Option<SubscriptionDocument>) -> Option<Subscription> {
    doc.map(subscription_from_document)
}

pub fn subscription_to_document(subscription: &Subscription) -> SubscriptionDocument {
    SubscriptionDocument {
        id: subscription.id.clone(),
        api: subscription.api.clone(),
        plan: subscription.plan.clone(),
        application: subscription.application.clone(),
        status: subscription.status,
        processed_at: subscription.processed_at,
        reason: subscription.reason.clone(),
        processed_by: subscription.processed_by.clone(),
        subscribed_by: subscription.subscribed_by.clone(),
        starting_at: subscription.starting_at,
        ending_at: subscription.ending_at,
        closed_at: subscription.closed_at,
        created_at: subscription.created_at,
        updated_at: subscription.updated_at,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Notification
// ════════════════════════════════════════════════════════════════════════════

pub fn notification_from_document(doc: NotificationDocument) -> Notification {
    Notification {
        id: doc.id,
        title: doc.title,
        message: doc.message,
        username: doc.username,
        created_at: doc.created_at,
    }
}

pub fn map_notification(doc: Option<NotificationDocument>) -> Option<Notification> {
    doc.map(notification_from_document)
}

pub fn notification_to_document(notification: &Notification) -> NotificationDocument {
    NotificationDocument {
        id: notification.id.clone(),
        title: notification.title.clone(),
        message: notification.message.clone(),
        username: notification.username.clone(),
        created_at: notification.created_at,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Rating
// ════════════════════════════════════════════════════════════════════════════

pub fn rating_from_document(doc: RatingDocument) -> Rating {
    Rating {
        id: doc.id,
        api: doc.api,
        user: doc.user,
        rate: doc.rate,
        title: doc.title,
        comment: doc.comment,
        created_at: doc.created_at,
        updated_at: doc.updated_at,
    }
}

pub fn map_rating(doc: Option<RatingDocument>) -> Option<Rating> {
    doc.map(rating_from_document)
}

pub fn rating_to_document(rating: &Rating) -> RatingDocument {
    RatingDocument {
        id: rating.id.clone(),
        api: rating.api.clone(),
        user: rating.user.clone(),
        rate: rating.rate,
        title: rating.title.clone(),
        comment: rating.comment.clone(),
        created_at: rating.created_at,
        updated_at: rating.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, TeamDocument};
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    fn resolver_with(store: &MemoryStore) -> RefResolver {
        RefResolver::new(store.users(), store.teams())
    }

    async fn seed(store: &MemoryStore) {
        store
            .users()
            .save(UserDocument {
                name: "alice".into(),
                email: Some("alice@aperture.test".into()),
            })
            .await
            .unwrap();
        store
            .teams()
            .save(TeamDocument {
                name: "platform".into(),
                description: None,
            })
            .await
            .unwrap();
    }

    fn sample_application() -> Application {
        let at = Utc.with_ymd_and_hms(2016, 3, 1, 10, 0, 0).unwrap();
        Application {
            name: "shop".into(),
            description: Some("storefront".into()),
            app_type: Some("web".into()),
            owner: Some("alice".into()),
            owner_type: Some(OwnerType::User),
            creator: Some("alice".into()),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn mapping_absent_documents_yields_absent_entities() {
        assert!(map_application(None).is_none());
        assert!(map_api(None).is_none());
        assert!(map_subscription(None).is_none());
        assert!(map_notification(None).is_none());
        assert!(map_rating(None).is_none());
    }

    #[tokio::test]
    async fn application_round_trip_preserves_fields_and_owner_type() {
        let store = MemoryStore::new();
        seed(&store).await;
        let resolver = resolver_with(&store);

        let application = sample_application();
        let doc = application_to_document(&application, &resolver)
            .await
            .unwrap();
        assert_eq!(
            doc.owner.as_ref().map(OwnerDocument::owner_type),
            Some(OwnerType::User)
        );

        let mapped = application_from_document(doc);
        assert_eq!(mapped.name, application.name);
        assert_eq!(mapped.description, application.description);
        assert_eq!(mapped.app_type, application.app_type);
        assert_eq!(mapped.owner, application.owner);
        assert_eq!(mapped.owner_type, application.owner_type);
        assert_eq!(mapped.creator, application.creator);
        assert_eq!(mapped.created_at, application.created_at);
        assert_eq!(mapped.updated_at, application.updated_at);
    }

    #[tokio::test]
    async fn team_owner_resolves_against_the_team_collection() {
        let store = MemoryStore::new();
        seed(&store).await;
        let resolver = resolver_with(&store);

        let mut application = sample_application();
        application.owner = Some("platform".into());
        application.owner_type = Some(OwnerType::Team);

        let doc = application_to_document(&application, &resolver)
            .await
            .unwrap();
        let mapped = application_from_document(doc);
        assert_eq!(mapped.owner_type, Some(OwnerType::Team));
        assert_eq!(mapped.owner.as_deref(), Some("platform"));
    }

    #[tokio::test]
    async fn unresolvable_references_degrade_to_absent_fields() {
        let store = MemoryStore::new();
        let resolver = resolver_with(&store);

        let application = sample_application();
        let doc = application_to_document(&application, &resolver)
            .await
            .unwrap();
        assert!(doc.owner.is_none());
        assert!(doc.creator.is_none());

        let mapped = application_from_document(doc);
        assert!(mapped.owner.is_none());
        assert!(mapped.owner_type.is_none());
    }

    #[tokio::test]
    async fn missing_owner_type_resolves_to_no_owner() {
        let store = MemoryStore::new();
        seed(&store).await;
        let resolver = resolver_with(&store);

        let mut application = sample_application();
        application.owner_type = None;

        let doc = application_to_document(&application, &resolver)
            .await
            .unwrap();
        assert!(doc.owner.is_none());
    }

    proptest! {
        #[test]
        fn rating_round_trip_reproduces_every_field(
            id in "[a-z0-9-]{1,16}",
            api in "[a-z-]{1,12}",
            user in "[a-z]{1,12}",
            rate in 1u8..=5,
            title in ".{0,32}",
            comment in proptest::option::of(".{0,64}"),
        ) {
            let at = Utc.with_ymd_and_hms(2016, 3, 1, 10, 0, 0).unwrap();
            let rating = Rating {
                id,
                api,
                user,
                rate,
                title,
                comment,
                created_at: at,
                updated_at: at,
            };
            let mapped = rating_from_document(rating_to_document(&rating));
            prop_assert_eq!(mapped.id, rating.id.clone());
            prop_assert_eq!(mapped.api, rating.api.clone());
            prop_assert_eq!(mapped.user, rating.user.clone());
            prop_assert_eq!(mapped.rate, rating.rate);
            prop_assert_eq!(mapped.title, rating.title.clone());
            prop_assert_eq!(mapped.comment, rating.comment.clone());
            prop_assert_eq!(mapped.created_at, rating.created_at);
            prop_assert_eq!(mapped.updated_at, rating.updated_at);
        }
    }
}
