//! Meeting domain model.
//!
//! # Invariants
//! - `customer_id` is a plain foreign key; nothing checks that the customer
//!   exists.
//! - Equality follows the same id-only rule as `Customer`.

use crate::model::entity::{same_identity, Entity, EntityId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Scheduled meeting with one customer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Meeting {
    /// Assigned by the store on first save.
    id: Option<EntityId>,
    pub customer_id: Option<EntityId>,
    pub location: String,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
}

impl Meeting {
    /// Creates an unsaved meeting already bound to `customer_id`.
    pub fn for_customer(customer_id: EntityId) -> Self {
        Self {
            customer_id: Some(customer_id),
            ..Self::default()
        }
    }

    pub fn id(&self) -> Option<EntityId> {
        self.id
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

impl Entity for Meeting {
    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }
}

impl PartialEq for Meeting {
    fn eq(&self, other: &Self) -> bool {
        same_identity(self, other)
    }
}
