//! Entity identity contract.
//!
//! # Responsibility
//! - Describe what `EntityStore` needs from a stored record.
//!
//! # Invariants
//! - An entity is persisted iff its id is set.
//! - `assign_id` is only ever called by the store, once, on first save.

/// Store-assigned identifier shared by every entity kind.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type EntityId = u64;

/// Record that can live inside an `EntityStore`.
pub trait Entity: Clone + Send + Sync {
    /// Returns the store-assigned id, or `None` while unsaved.
    fn id(&self) -> Option<EntityId>;

    /// Sets the id of a not-yet-persisted entity.
    ///
    /// Called by `EntityStore::save`; callers outside the store should not
    /// need it.
    fn assign_id(&mut self, id: EntityId);

    /// Returns whether this entity has been saved at least once.
    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }
}

/// Identity comparison used by every entity `PartialEq` impl.
///
/// Same reference is always equal; otherwise both ids must be set and match.
pub(crate) fn same_identity<T: Entity>(left: &T, right: &T) -> bool {
    if std::ptr::eq(left, right) {
        return true;
    }
    match (left.id(), right.id()) {
        (Some(left_id), Some(right_id)) => left_id == right_id,
        _ => false,
    }
}
