//! Customer domain model.
//!
//! # Responsibility
//! - Define the contact record listed and edited by the presentation layer.
//! - Provide the canonical display string used by text filtering.
//!
//! # Invariants
//! - `id` is `None` until the first save and never changes afterwards.
//! - Equality compares ids only; unsaved customers equal nothing but
//!   themselves (same reference).

use crate::model::entity::{same_identity, Entity, EntityId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Contact record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Customer {
    /// Assigned by the store on first save.
    id: Option<EntityId>,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    pub email: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
}

impl Customer {
    /// Creates an unsaved customer with the given name and empty details.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Self::default()
        }
    }

    /// Store-assigned id, `None` while unsaved.
    pub fn id(&self) -> Option<EntityId> {
        self.id
    }

    /// Returns whether this customer has been saved at least once.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Canonical display string: first name, one space, last name.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Entity for Customer {
    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }
}

impl PartialEq for Customer {
    fn eq(&self, other: &Self) -> bool {
        same_identity(self, other)
    }
}

impl Display for Customer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}
