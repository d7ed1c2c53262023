//! Repository layer over in-memory entity stores.
//!
//! # Responsibility
//! - Provide one generic keyed store (`EntityStore`) and thin typed
//!   repositories for customers and meetings.
//! - Keep locking and copy semantics out of callers.
//!
//! # Invariants
//! - Callers only ever receive owned copies of stored entities.
//! - Repository APIs return semantic errors (`InvalidArgument`, `Range`);
//!   deleting an unknown entity is not an error.

pub mod customer_repo;
pub mod entity_store;
pub mod meeting_repo;
