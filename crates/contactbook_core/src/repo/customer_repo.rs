//! Customer repository over the generic entity store.
//!
//! # Responsibility
//! - Expose customer CRUD plus text-filtered listing for list views.
//!
//! # Invariants
//! - Text filtering is a case-insensitive substring match against
//!   `Customer::display_name()`.
//! - Empty or absent filter text matches every customer.

use crate::model::customer::Customer;
use crate::model::entity::EntityId;
use crate::repo::entity_store::{EntityStore, RepoResult};

const CUSTOMER_KIND: &str = "customer";

/// In-memory customer repository.
pub struct CustomerRepository {
    store: EntityStore<Customer>,
}

impl Default for CustomerRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomerRepository {
    pub fn new() -> Self {
        Self {
            store: EntityStore::new(CUSTOMER_KIND),
        }
    }

    /// Lists customers whose display name contains `filter_text`, newest
    /// first.
    pub fn find_all(&self, filter_text: Option<&str>) -> Vec<Customer> {
        match normalize_filter(filter_text) {
            Some(needle) => {
                let accept = |customer: &Customer| matches_filter(customer, &needle);
                self.store.find_all(Some(&accept))
            }
            None => self.store.find_all(None),
        }
    }

    /// Paged variant of [`CustomerRepository::find_all`].
    ///
    /// # Errors
    /// - `RepoError::Range` when `start` is negative.
    pub fn find_page(
        &self,
        filter_text: Option<&str>,
        start: i64,
        count: usize,
    ) -> RepoResult<Vec<Customer>> {
        match normalize_filter(filter_text) {
            Some(needle) => {
                let accept = |customer: &Customer| matches_filter(customer, &needle);
                self.store.find_page(Some(&accept), start, count)
            }
            None => self.store.find_page(None, start, count),
        }
    }

    pub fn get(&self, id: EntityId) -> Option<Customer> {
        self.store.get(id)
    }

    /// Number of stored customers.
    pub fn count(&self) -> usize {
        self.store.count()
    }

    /// Persists or updates `customer` and returns the stored copy.
    pub fn save(&self, customer: &Customer) -> RepoResult<Customer> {
        self.store.save(Some(customer))
    }

    /// Saves `customers` only when the repository is empty, in one step.
    ///
    /// Returns the number saved; `0` when customers already existed.
    pub fn save_all_if_empty(&self, customers: &[Customer]) -> RepoResult<usize> {
        self.store.save_all_if_empty(customers)
    }

    /// Removes `customer`. Meetings that reference it are left in place.
    pub fn delete(&self, customer: &Customer) {
        self.store.delete(customer);
    }
}

fn normalize_filter(filter_text: Option<&str>) -> Option<String> {
    filter_text
        .filter(|text| !text.is_empty())
        .map(str::to_lowercase)
}

fn matches_filter(customer: &Customer, needle: &str) -> bool {
    customer.display_name().to_lowercase().contains(needle)
}
