//! Adapter implementations of the repository ports.

pub mod docstore;

pub use docstore::{
    DocstoreApiRepository, DocstoreApplicationRepository, DocstoreNotificationRepository,
    DocstoreRatingRepository, DocstoreSubscriptionRepository,
};
