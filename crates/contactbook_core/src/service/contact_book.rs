//! Composition root for customer and meeting repositories.
//!
//! # Responsibility
//! - Own exactly one repository per entity type.
//! - Offer the use-case helpers the presentation layer calls most.
//!
//! # Invariants
//! - Repositories are shared through `Arc` handles, never globals.
//! - Deleting a customer does not touch its meetings.

use crate::model::customer::Customer;
use crate::model::meeting::Meeting;
use crate::repo::customer_repo::CustomerRepository;
use crate::repo::entity_store::{RepoError, RepoResult};
use crate::repo::meeting_repo::MeetingRepository;
use crate::service::sample_data::{seed_customers, SeedOptions};
use chrono::NaiveDateTime;
use std::sync::Arc;

/// Request model for scheduling a meeting with an existing customer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleMeetingRequest {
    pub location: String,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
}

/// Explicitly constructed holder of the application's repositories.
#[derive(Clone, Default)]
pub struct ContactBook {
    customers: Arc<CustomerRepository>,
    meetings: Arc<MeetingRepository>,
}

impl ContactBook {
    /// Creates a contact book with empty stores.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a contact book whose customer store holds the sample data.
    pub fn with_sample_data(options: &SeedOptions) -> RepoResult<Self> {
        let book = Self::new();
        seed_customers(&book.customers, options)?;
        Ok(book)
    }

    pub fn customers(&self) -> &Arc<CustomerRepository> {
        &self.customers
    }

    pub fn meetings(&self) -> &Arc<MeetingRepository> {
        &self.meetings
    }

    /// Saves a new meeting bound to `customer`.
    ///
    /// # Errors
    /// - `RepoError::InvalidArgument` when `customer` has not been saved.
    pub fn schedule_meeting(
        &self,
        customer: &Customer,
        request: &ScheduleMeetingRequest,
    ) -> RepoResult<Meeting> {
        let customer_id = customer.id().ok_or_else(|| {
            RepoError::InvalidArgument(format!(
                "customer `{customer}` must be saved before scheduling meetings"
            ))
        })?;

        let mut meeting = Meeting::for_customer(customer_id);
        meeting.location = request.location.clone();
        meeting.start_time = request.start_time;
        meeting.end_time = request.end_time;
        self.meetings.save(&meeting)
    }

    /// Lists the meetings of `customer`, newest first.
    ///
    /// Unsaved customers have no meetings.
    pub fn meetings_for(&self, customer: &Customer) -> Vec<Meeting> {
        customer
            .id()
            .map(|customer_id| self.meetings.find_all(customer_id))
            .unwrap_or_default()
    }
}
