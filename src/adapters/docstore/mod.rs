//! Document-store repository adapters.
//!
//! One adapter per entity, each delegating to the collection traits in
//! [`crate::store`] and converting through the mapper. Adapters hold no
//! mutable state and are safe to share across tasks; the read-modify-write
//! sequence in `update` is not atomic across the two store round-trips.

mod api_repository;
mod application_repository;
pub mod mapper;
mod notification_repository;
pub mod paging;
mod rating_repository;
mod subscription_repository;

pub use api_repository::DocstoreApiRepository;
pub use application_repository::DocstoreApplicationRepository;
pub use notification_repository::DocstoreNotificationRepository;
pub use rating_repository::DocstoreRatingRepository;
pub use subscription_repository::DocstoreSubscriptionRepository;
