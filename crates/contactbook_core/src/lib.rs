//! Core domain logic for the contact book.
//! In-memory customer and meeting repositories consumed by a presentation
//! layer that lives outside this crate.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::customer::Customer;
pub use model::entity::{Entity, EntityId};
pub use model::meeting::Meeting;
pub use repo::customer_repo::CustomerRepository;
pub use repo::entity_store::{EntityStore, Filter, RepoError, RepoResult};
pub use repo::meeting_repo::MeetingRepository;
pub use service::contact_book::{ContactBook, ScheduleMeetingRequest};
pub use service::sample_data::{sample_customer_count, seed_customers, SeedOptions};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
