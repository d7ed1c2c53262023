use contactbook_core::{Customer, Entity, EntityStore, RepoError};
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

fn customer(name: &str) -> Customer {
    Customer::new(name, "Test")
}

#[test]
fn count_tracks_assigned_ids_minus_deletes() {
    let store: EntityStore<Customer> = EntityStore::new("customer");
    let mut assigned = HashSet::new();
    let mut deleted = 0;

    for round in 0..20 {
        let saved = store.save(Some(&customer(&format!("c{round}")))).unwrap();
        assigned.insert(saved.id().unwrap());

        if round % 3 == 0 {
            store.delete(&saved);
            deleted += 1;
        }
        if round % 5 == 0 {
            // Re-saving an existing entity neither assigns nor deletes.
            let mut again = saved.clone();
            again.city = "Calgary".to_string();
            store.save(Some(&again)).unwrap();
            if round % 3 == 0 {
                deleted -= 1;
            }
        }
        assert_eq!(store.count(), assigned.len() - deleted);
    }
}

#[test]
fn new_ids_are_strictly_increasing() {
    let store: EntityStore<Customer> = EntityStore::new("customer");
    let mut last = None;
    for round in 0..10 {
        let saved = store.save(Some(&customer("x"))).unwrap();
        let id = saved.id().unwrap();
        if let Some(previous) = last {
            assert!(id > previous);
        }
        if round % 2 == 0 {
            store.delete(&saved);
        }
        last = Some(id);
    }
}

#[test]
fn find_all_is_sorted_by_id_descending() {
    let store: EntityStore<Customer> = EntityStore::new("customer");
    for round in 0..12 {
        store.save(Some(&customer(&format!("c{round}")))).unwrap();
    }
    let middle = store.get(5).unwrap();
    store.delete(&middle);

    let ids: Vec<_> = store
        .find_all(None)
        .iter()
        .map(|c| Entity::id(c).unwrap())
        .collect();
    assert!(ids.windows(2).all(|pair| pair[0] > pair[1]));
    assert!(!ids.contains(&5));
}

#[test]
fn custom_filter_predicate_is_applied() {
    let store: EntityStore<Customer> = EntityStore::new("customer");
    for name in ["Ann", "Bea", "Anton", "Cid"] {
        store.save(Some(&customer(name))).unwrap();
    }

    let starts_with_a = |c: &Customer| c.first_name.starts_with('A');
    let found = store.find_all(Some(&starts_with_a));
    let names: Vec<_> = found.iter().map(|c| c.first_name.as_str()).collect();
    assert_eq!(names, vec!["Anton", "Ann"]);

    let page = store.find_page(Some(&starts_with_a), 1, 1).unwrap();
    assert_eq!(page[0].first_name, "Ann");
}

#[test]
fn missing_entity_is_rejected_before_any_mutation() {
    let store: EntityStore<Customer> = EntityStore::new("customer");
    let err = store.save(None).unwrap_err();
    assert!(matches!(err, RepoError::InvalidArgument(_)));
    assert_eq!(store.count(), 0);

    let first = store.save(Some(&customer("Ann"))).unwrap();
    assert_eq!(first.id(), Some(0));
}

#[test]
fn concurrent_saves_get_unique_sequential_ids() {
    let store: Arc<EntityStore<Customer>> = Arc::new(EntityStore::new("customer"));
    let threads = 8;
    let per_thread = 50;

    let handles: Vec<_> = (0..threads)
        .map(|worker| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                (0..per_thread)
                    .map(|index| {
                        let saved = store
                            .save(Some(&customer(&format!("w{worker}-{index}"))))
                            .unwrap();
                        // Interleave reads with writes.
                        let _ = store.find_page(None, 0, 5).unwrap();
                        saved.id().unwrap()
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut ids: Vec<u64> = handles
        .into_iter()
        .flat_map(|handle| handle.join().unwrap())
        .collect();
    ids.sort_unstable();

    let expected: Vec<u64> = (0..(threads * per_thread) as u64).collect();
    assert_eq!(ids, expected);
    assert_eq!(store.count(), threads * per_thread);
}

#[test]
fn store_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<EntityStore<Customer>>();
}
