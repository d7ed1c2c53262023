//! Meeting repository scoped by customer.
//!
//! # Responsibility
//! - Expose meeting CRUD and per-customer listing.
//!
//! # Invariants
//! - Listing always filters by `customer_id`; there is no query across all
//!   customers.
//! - `customer_id` is not checked against the customer store.

use crate::model::entity::EntityId;
use crate::model::meeting::Meeting;
use crate::repo::entity_store::{EntityStore, RepoResult};

const MEETING_KIND: &str = "meeting";

/// In-memory meeting repository.
pub struct MeetingRepository {
    store: EntityStore<Meeting>,
}

impl Default for MeetingRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MeetingRepository {
    pub fn new() -> Self {
        Self {
            store: EntityStore::new(MEETING_KIND),
        }
    }

    /// Lists meetings of one customer, newest first.
    pub fn find_all(&self, customer_id: EntityId) -> Vec<Meeting> {
        let accept = |meeting: &Meeting| meeting.customer_id == Some(customer_id);
        self.store.find_all(Some(&accept))
    }

    /// Paged variant of [`MeetingRepository::find_all`].
    ///
    /// # Errors
    /// - `RepoError::Range` when `start` is negative.
    pub fn find_page(
        &self,
        customer_id: EntityId,
        start: i64,
        count: usize,
    ) -> RepoResult<Vec<Meeting>> {
        let accept = |meeting: &Meeting| meeting.customer_id == Some(customer_id);
        self.store.find_page(Some(&accept), start, count)
    }

    pub fn get(&self, id: EntityId) -> Option<Meeting> {
        self.store.get(id)
    }

    /// Number of stored meetings across all customers.
    pub fn count(&self) -> usize {
        self.store.count()
    }

    pub fn save(&self, meeting: &Meeting) -> RepoResult<Meeting> {
        self.store.save(Some(meeting))
    }

    pub fn delete(&self, meeting: &Meeting) {
        self.store.delete(meeting);
    }
}
