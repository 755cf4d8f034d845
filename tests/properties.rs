//! Property tests for collection and queue invariants.

use farm_store::{ErrorRecord, Mutation, Passthrough, Record, Store, StoreConfig, SystemClock};
use proptest::prelude::*;
use serde_json::json;

fn test_store() -> Store {
    Store::new(StoreConfig::default(), Passthrough, SystemClock)
}

fn tagged(batch: usize, item: usize) -> Record {
    Record::new().with("batch", batch).with("item", item)
}

proptest! {
    #[test]
    fn add_logs_preserves_count_and_order(sizes in prop::collection::vec(0usize..8, 0..10)) {
        let mut store = test_store();

        for (b, &size) in sizes.iter().enumerate() {
            let batch = (0..size).map(|i| tagged(b, i)).collect();
            store.commit(Mutation::AddLogs(batch)).unwrap();
        }

        let logs = store.farm().logs();
        prop_assert_eq!(logs.len(), sizes.iter().sum::<usize>());

        let expected: Vec<Record> = sizes
            .iter()
            .enumerate()
            .flat_map(|(b, &size)| (0..size).map(move |i| tagged(b, i)))
            .collect();
        prop_assert_eq!(logs, expected.as_slice());
    }

    #[test]
    fn add_log_and_make_current_points_at_it(existing in 0usize..20, n in any::<i64>()) {
        let mut store = test_store();
        store.commit(Mutation::AddLogs((0..existing).map(|i| tagged(0, i)).collect())).unwrap();

        let log = Record::new().with("n", n);
        store.commit(Mutation::AddLogAndMakeCurrent(log.clone())).unwrap();

        prop_assert_eq!(store.farm().current_log_index(), existing);
        prop_assert_eq!(store.farm().current_log(), Some(&log));
    }

    #[test]
    fn dismiss_error_only_clears_show(count in 1usize..12, pick in any::<prop::sample::Index>()) {
        let mut store = test_store();
        for i in 0..count {
            let error = ErrorRecord::new(format!("error {}", i)).with_detail(json!({"i": i}));
            store.commit(Mutation::LogError(error)).unwrap();
        }
        let before = store.notifications().errors().to_vec();
        let index = pick.index(count);

        store.commit(Mutation::DismissError(index)).unwrap();

        let after = store.notifications().errors();
        prop_assert_eq!(after.len(), before.len());
        for (i, (old, new)) in before.iter().zip(after).enumerate() {
            if i == index {
                prop_assert!(!new.show);
                prop_assert_eq!(&new.message, &old.message);
                prop_assert_eq!(&new.detail, &old.detail);
                prop_assert_eq!(&new.extra, &old.extra);
            } else {
                prop_assert_eq!(new, old);
            }
        }
    }

    #[test]
    fn pointer_stays_valid_after_deletes(
        len in 1usize..15,
        current in any::<prop::sample::Index>(),
        deletes in prop::collection::vec(any::<prop::sample::Index>(), 0..15),
    ) {
        let mut store = test_store();
        store.commit(Mutation::AddLogs((0..len).map(|i| tagged(0, i)).collect())).unwrap();
        store.commit(Mutation::SetCurrentLogIndex(current.index(len))).unwrap();

        for delete in deletes {
            let remaining = store.farm().logs().len();
            if remaining == 0 {
                break;
            }

            let current_before = store.farm().current_log().cloned();
            let index = delete.index(remaining);
            let old_current_index = store.farm().current_log_index();

            store.commit(Mutation::DeleteLog { index }).unwrap();

            let logs = store.farm().logs();
            if logs.is_empty() {
                prop_assert_eq!(store.farm().current_log_index(), 0);
            } else {
                prop_assert!(store.farm().current_log_index() < logs.len());
                if index != old_current_index {
                    // An untouched current log stays current
                    prop_assert_eq!(store.farm().current_log().cloned(), current_before);
                }
            }
        }
    }

    #[test]
    fn update_asset_replaces_in_place(
        count in 1usize..10,
        pick in any::<prop::sample::Index>(),
        v in any::<u32>(),
    ) {
        let mut store = test_store();
        let assets = (0..count).map(|i| Record::new().with("id", i).with("v", 0)).collect();
        store.commit(Mutation::AddAssets(assets)).unwrap();

        let id = pick.index(count);
        store.commit(Mutation::UpdateAsset(Record::new().with("id", id).with("v", v))).unwrap();

        let assets = store.farm().assets();
        prop_assert_eq!(assets.len(), count);
        let matching: Vec<&Record> = assets.iter().filter(|a| a.id() == Some(&json!(id))).collect();
        prop_assert_eq!(matching.len(), 1);
        prop_assert_eq!(matching[0].get("v"), Some(&json!(v)));
        prop_assert_eq!(assets[id].get("v"), Some(&json!(v)));
    }
}
