//! Aperture Repository - Document-store persistence layer
//!
//! This crate maps the management-plane domain model (APIs, applications,
//! subscriptions, notifications, ratings) onto a document database and
//! exposes it through repository traits consumed by the management service.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod store;
