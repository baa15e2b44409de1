//! Repository ports consumed by the management service.
//!
//! Each trait defines the persistence contract for one entity. Reads encode
//! absence in the result; errors are reserved for missing update targets,
//! invalid arguments, and storage faults.

mod api_repository;
mod application_repository;
mod notification_repository;
mod rating_repository;
mod subscription_repository;

pub use api_repository::ApiRepository;
pub use application_repository::ApplicationRepository;
pub use notification_repository::NotificationRepository;
pub use rating_repository::RatingRepository;
pub use subscription_repository::SubscriptionRepository;
