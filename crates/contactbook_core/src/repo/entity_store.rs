//! Generic in-memory entity store.
//!
//! # Responsibility
//! - Keep one keyed collection of entities per entity kind.
//! - Assign sequential ids on first save.
//! - Hand out owned copies only, never references into the map.
//!
//! # Invariants
//! - Ids start at 0, grow monotonically and are never reused, even after
//!   delete.
//! - Listing order is id descending (newest first) with no secondary key.
//! - Every operation holds the store lock for its whole duration and never
//!   takes a second lock.

use crate::model::entity::{Entity, EntityId};
use log::{debug, error, warn};
use std::cmp::Reverse;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub type RepoResult<T> = Result<T, RepoError>;

/// Borrowed filter predicate applied while listing.
pub type Filter<'a, T> = &'a dyn Fn(&T) -> bool;

/// Repository error for store mutations and queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// Caller passed an absent or unusable entity.
    InvalidArgument(String),
    /// Page start offset is negative.
    Range { start: i64 },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(message) => write!(f, "invalid argument: {message}"),
            Self::Range { start } => {
                write!(f, "page start must not be negative, got {start}")
            }
        }
    }
}

impl Error for RepoError {}

struct StoreState<T> {
    entries: HashMap<EntityId, T>,
    /// `None` once `EntityId::MAX` has been handed out or imported.
    next_id: Option<EntityId>,
}

impl<T: Entity> StoreState<T> {
    fn empty(next_id: Option<EntityId>) -> Self {
        Self {
            entries: HashMap::new(),
            next_id,
        }
    }

    /// Stores a copy of `entity`; returns it with its id and whether an
    /// entry was replaced. Fails before mutating when no fresh id is left.
    fn insert(&mut self, kind: &str, entity: &T) -> RepoResult<(T, bool)> {
        let mut stored = entity.clone();
        let id = match stored.id() {
            Some(id) => {
                // Keep fresh ids clear of caller-supplied ones.
                if self.next_id.map_or(false, |next| id >= next) {
                    self.next_id = id.checked_add(1);
                }
                id
            }
            None => {
                let Some(id) = self.next_id else {
                    return Err(RepoError::InvalidArgument(format!(
                        "no {kind} ids left to assign"
                    )));
                };
                self.next_id = id.checked_add(1);
                stored.assign_id(id);
                id
            }
        };
        let replaced = self.entries.insert(id, stored.clone()).is_some();
        Ok((stored, replaced))
    }
}

/// Thread-safe in-memory store for one entity kind.
pub struct EntityStore<T: Entity> {
    kind: &'static str,
    state: RwLock<StoreState<T>>,
}

impl<T: Entity> EntityStore<T> {
    /// Creates an empty store. `kind` only labels log events.
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            state: RwLock::new(StoreState::empty(Some(0))),
        }
    }

    /// Returns copies of all entities accepted by `filter`, newest first.
    ///
    /// `None` accepts everything. An empty store yields an empty vector.
    pub fn find_all(&self, filter: Option<Filter<'_, T>>) -> Vec<T> {
        let state = self.read_state();
        sorted_matches(&state.entries, filter)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Returns the `[start, start + count)` window of `find_all(filter)`.
    ///
    /// The window is clipped to the available range, so a `start` past the
    /// end yields an empty vector.
    ///
    /// # Errors
    /// - `RepoError::Range` when `start` is negative.
    pub fn find_page(
        &self,
        filter: Option<Filter<'_, T>>,
        start: i64,
        count: usize,
    ) -> RepoResult<Vec<T>> {
        if start < 0 {
            warn!(
                "event=entity_find_page module=repo status=error kind={} start={} error_code=negative_start",
                self.kind, start
            );
            return Err(RepoError::Range { start });
        }
        let start = usize::try_from(start).unwrap_or(usize::MAX);

        let state = self.read_state();
        Ok(sorted_matches(&state.entries, filter)
            .into_iter()
            .skip(start)
            .take(count)
            .cloned()
            .collect())
    }

    /// Returns a copy of the entity stored under `id`.
    pub fn get(&self, id: EntityId) -> Option<T> {
        self.read_state().entries.get(&id).cloned()
    }

    /// Number of stored entities.
    pub fn count(&self) -> usize {
        self.read_state().entries.len()
    }

    /// Stores a copy of `entity`, assigning the next id when it has none.
    ///
    /// Overwrites any entry with the same id. Returns the stored copy with
    /// its id populated; the caller's value is left untouched.
    ///
    /// # Errors
    /// - `RepoError::InvalidArgument` when `entity` is `None`, or when it has
    ///   no id and every id has already been used. Nothing is stored in
    ///   either case.
    pub fn save(&self, entity: Option<&T>) -> RepoResult<T> {
        let Some(entity) = entity else {
            error!(
                "event=entity_save module=repo status=error kind={} error_code=missing_entity",
                self.kind
            );
            return Err(RepoError::InvalidArgument(format!(
                "{} to save is missing; is the form bound to an entity?",
                self.kind
            )));
        };

        let (stored, replaced) = match self.write_state().insert(self.kind, entity) {
            Ok(inserted) => inserted,
            Err(err) => {
                error!(
                    "event=entity_save module=repo status=error kind={} error_code=ids_exhausted",
                    self.kind
                );
                return Err(err);
            }
        };

        debug!(
            "event=entity_save module=repo status=ok kind={} id={:?} replaced={}",
            self.kind,
            stored.id(),
            replaced
        );
        Ok(stored)
    }

    /// Saves every entity in `entities` when the store holds nothing yet.
    ///
    /// The emptiness check and all inserts happen under one write lock, so
    /// concurrent callers seed at most once. Returns the number of entities
    /// saved; `0` when the store already held data.
    ///
    /// # Errors
    /// - `RepoError::InvalidArgument` when the id space runs out. Nothing is
    ///   stored in that case.
    pub fn save_all_if_empty(&self, entities: &[T]) -> RepoResult<usize> {
        let mut state = self.write_state();
        if !state.entries.is_empty() {
            return Ok(0);
        }

        let mut staged = StoreState::empty(state.next_id);
        for entity in entities {
            staged.insert(self.kind, entity)?;
        }
        let saved = staged.entries.len();
        *state = staged;

        debug!(
            "event=entity_save_all module=repo status=ok kind={} saved={}",
            self.kind, saved
        );
        Ok(saved)
    }

    /// Removes the entry with `entity`'s id.
    ///
    /// Unsaved entities and unknown ids are a silent no-op. Nothing cascades
    /// to entities that reference this one.
    pub fn delete(&self, entity: &T) {
        let Some(id) = entity.id() else {
            return;
        };
        let removed = self.write_state().entries.remove(&id).is_some();
        debug!(
            "event=entity_delete module=repo status=ok kind={} id={} removed={}",
            self.kind, id, removed
        );
    }

    // Every mutation is a single map insert/remove, so a poisoned lock still
    // guards consistent state.
    fn read_state(&self) -> RwLockReadGuard<'_, StoreState<T>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, StoreState<T>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn sorted_matches<'s, T>(
    entries: &'s HashMap<EntityId, T>,
    filter: Option<Filter<'_, T>>,
) -> Vec<&'s T> {
    let mut matches: Vec<(EntityId, &T)> = entries
        .iter()
        .filter(|(_, entity)| filter.map_or(true, |accept| accept(entity)))
        .map(|(id, entity)| (*id, entity))
        .collect();
    matches.sort_unstable_by_key(|(id, _)| Reverse(*id));
    matches.into_iter().map(|(_, entity)| entity).collect()
}

#[cfg(test)]
mod tests {
    use super::{EntityStore, RepoError};
    use crate::model::customer::Customer;
    use crate::model::entity::Entity;

    fn store_with(names: &[&str]) -> EntityStore<Customer> {
        let store = EntityStore::new("customer");
        for name in names {
            store
                .save(Some(&Customer::new(*name, "Test")))
                .expect("save should succeed");
        }
        store
    }

    fn ids(customers: &[Customer]) -> Vec<u64> {
        customers
            .iter()
            .map(|customer| customer.id().expect("stored customers have ids"))
            .collect()
    }

    #[test]
    fn save_assigns_sequential_ids_from_zero() {
        let store = store_with(&["Ann", "Bea", "Cid"]);
        assert_eq!(ids(&store.find_all(None)), vec![2, 1, 0]);
    }

    #[test]
    fn save_rejects_missing_entity_without_side_effects() {
        let store = store_with(&["Ann"]);
        let err = store.save(None).expect_err("missing entity must be rejected");
        assert!(matches!(err, RepoError::InvalidArgument(_)));
        assert_eq!(store.count(), 1);

        let next = store
            .save(Some(&Customer::new("Bea", "Test")))
            .expect("save should succeed");
        assert_eq!(next.id(), Some(1));
    }

    #[test]
    fn save_leaves_caller_value_unsaved() {
        let store: EntityStore<Customer> = EntityStore::new("customer");
        let draft = Customer::new("Ann", "Test");
        let stored = store.save(Some(&draft)).expect("save should succeed");
        assert_eq!(draft.id(), None);
        assert_eq!(stored.id(), Some(0));
    }

    #[test]
    fn caller_supplied_id_pushes_counter_forward() {
        let store: EntityStore<Customer> = EntityStore::new("customer");
        let mut imported = Customer::new("Ann", "Test");
        imported.assign_id(10);
        store.save(Some(&imported)).expect("save should succeed");

        let fresh = store
            .save(Some(&Customer::new("Bea", "Test")))
            .expect("save should succeed");
        assert_eq!(fresh.id(), Some(11));
        assert_eq!(store.count(), 2);
    }

    #[test]
    fn max_caller_id_exhausts_fresh_ids_without_overwriting() {
        let store: EntityStore<Customer> = EntityStore::new("customer");
        let mut imported = Customer::new("Imported", "Last");
        imported.assign_id(u64::MAX);
        store.save(Some(&imported)).expect("save should succeed");

        let err = store
            .save(Some(&Customer::new("Fresh", "One")))
            .expect_err("no fresh id is left");
        assert!(matches!(err, RepoError::InvalidArgument(_)));
        assert_eq!(store.count(), 1);
        let kept = store.get(u64::MAX).expect("imported customer is kept");
        assert_eq!(kept.first_name, "Imported");
    }

    #[test]
    fn last_fresh_id_is_assigned_once() {
        let store: EntityStore<Customer> = EntityStore::new("customer");
        let mut imported = Customer::new("Imported", "Last");
        imported.assign_id(u64::MAX - 1);
        store.save(Some(&imported)).expect("save should succeed");

        let last = store
            .save(Some(&Customer::new("Fresh", "One")))
            .expect("u64::MAX is still free");
        assert_eq!(last.id(), Some(u64::MAX));
        assert!(store.save(Some(&Customer::new("Fresh", "Two"))).is_err());
        assert_eq!(store.count(), 2);
    }

    #[test]
    fn save_all_if_empty_only_fills_empty_store() {
        let store: EntityStore<Customer> = EntityStore::new("customer");
        let batch = vec![Customer::new("Ann", "Test"), Customer::new("Bea", "Test")];

        assert_eq!(store.save_all_if_empty(&batch).expect("seed"), 2);
        assert_eq!(ids(&store.find_all(None)), vec![1, 0]);
        assert_eq!(store.save_all_if_empty(&batch).expect("reseed"), 0);
        assert_eq!(store.count(), 2);
    }

    #[test]
    fn save_all_if_empty_is_all_or_nothing() {
        let store: EntityStore<Customer> = EntityStore::new("customer");
        let mut last = Customer::new("Last", "Id");
        last.assign_id(u64::MAX);
        store.save(Some(&last)).expect("save should succeed");
        store.delete(&last);

        let batch = vec![Customer::new("Ann", "Test")];
        let err = store
            .save_all_if_empty(&batch)
            .expect_err("no fresh id is left");
        assert!(matches!(err, RepoError::InvalidArgument(_)));
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn find_page_clips_window_and_rejects_negative_start() {
        let store = store_with(&["Ann", "Bea", "Cid", "Dan"]);

        let page = store.find_page(None, 1, 2).expect("page should load");
        assert_eq!(ids(&page), vec![2, 1]);

        let tail = store.find_page(None, 3, 10).expect("page should load");
        assert_eq!(ids(&tail), vec![0]);

        let past_end = store.find_page(None, 9, 3).expect("page should load");
        assert!(past_end.is_empty());

        let err = store
            .find_page(None, -1, 3)
            .expect_err("negative start must fail");
        assert_eq!(err, RepoError::Range { start: -1 });
    }

    #[test]
    fn get_returns_detached_copy() {
        let store = store_with(&["Ann"]);
        let mut copy = store.get(0).expect("customer 0 should exist");
        copy.first_name = "Changed".to_string();

        let reloaded = store.get(0).expect("customer 0 should exist");
        assert_eq!(reloaded.first_name, "Ann");
        assert!(store.get(42).is_none());
    }
}
