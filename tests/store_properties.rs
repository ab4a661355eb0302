use pathmark::error::PathmarkError;
use pathmark::model::{ItemRecord, ItemUpdate, ROOT_ID};
use pathmark::store::HierarchicalStore;

/// Small deterministic generator so failures reproduce.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next() % n as u64) as usize
    }

    fn index(&mut self) -> isize {
        self.below(9) as isize - 4
    }
}

fn node_ids(store: &HierarchicalStore) -> Vec<String> {
    let mut ids: Vec<String> = store.nodes().map(|(id, _)| id.to_string()).collect();
    ids.sort();
    ids
}

fn item_ids(store: &HierarchicalStore) -> Vec<String> {
    let mut ids: Vec<String> = store.items().map(|(id, _)| id.to_string()).collect();
    ids.sort();
    ids
}

#[test]
fn random_operation_sequences_keep_integrity() {
    for seed in 0..20u64 {
        let mut rng = Lcg(seed);
        let mut store = HierarchicalStore::new_empty();

        for step in 0..200 {
            let nodes = node_ids(&store);
            let items = item_ids(&store);
            let node = nodes[rng.below(nodes.len())].clone();
            let other = nodes[rng.below(nodes.len())].clone();

            // Failures are fine; broken invariants are not.
            let _ = match rng.below(10) {
                0 | 1 => store.add_node(format!("n{}", step), &node).map(|_| ()),
                2 => store.remove_node(&node),
                3 => store.rename_node(&node, format!("r{}", step)),
                4 => store.move_node_same_parent(&node, rng.index()),
                5 => store.move_node_new_parent(&node, &other, rng.index()),
                6 | 7 => store
                    .add_item(ItemRecord::new(format!("i{}", step)).with_path("/tmp/x"), &node)
                    .map(|_| ()),
                _ if items.is_empty() => Ok(()),
                8 => {
                    let item = &items[rng.below(items.len())];
                    match rng.below(3) {
                        0 => store.remove_item(item),
                        1 => store.move_item_within_node(item, rng.index()),
                        _ => store.update_item(item, ItemUpdate::new().comment("c")),
                    }
                }
                _ => {
                    let item = &items[rng.below(items.len())];
                    let index = if rng.below(2) == 0 { None } else { Some(rng.index()) };
                    store.move_item_to_node(item, &other, index)
                }
            };

            assert!(
                store.check_integrity(),
                "seed {} step {}: {:?}",
                seed,
                step,
                store.find_violation()
            );
        }
    }
}

#[test]
fn failed_operations_leave_store_unchanged() {
    let mut store = HierarchicalStore::new_empty();
    let a = store.add_node("A", ROOT_ID).unwrap();
    let b = store.add_node("B", &a).unwrap();
    let item = store.add_item(ItemRecord::new("x"), &b).unwrap();
    let before = store.clone();

    assert!(store.add_node("C", "ghost").is_err());
    assert!(store.remove_node(ROOT_ID).is_err());
    assert!(store.move_node_new_parent(&a, &b, 0).is_err());
    assert!(store.move_item_to_node(&item, "ghost", None).is_err());
    assert!(store
        .update_item_fields(&item, [("name", Some("y".to_string())), ("bogus", None)])
        .is_err());
    assert!(store.add_item(ItemRecord::new("z"), "ghost").is_err());

    assert_eq!(store, before);
}

#[test]
fn save_then_load_round_trips() {
    let mut store = HierarchicalStore::new_empty();
    let a = store.add_node("A", ROOT_ID).unwrap();
    let b = store.add_node("B", &a).unwrap();
    store
        .add_item(
            ItemRecord::new("Site")
                .with_path("https://example.org")
                .with_comment("docs"),
            &b,
        )
        .unwrap();
    store.add_item(ItemRecord::new("Bare"), &a).unwrap();

    for indent in [0, 2, 4] {
        let bytes = store.save_with_indent(indent).unwrap();
        assert_eq!(HierarchicalStore::load(&bytes).unwrap(), store);
    }
}

#[test]
fn removing_a_subtree_leaves_no_dangling_ids() {
    let mut store = HierarchicalStore::new_empty();
    let keep = store.add_node("Keep", ROOT_ID).unwrap();
    let gone = store.add_node("Gone", ROOT_ID).unwrap();
    let mut doomed_nodes = vec![gone.clone()];
    let mut doomed_items = Vec::new();
    let mut parent = gone.clone();
    for depth in 0..4 {
        let child = store.add_node(format!("d{}", depth), &parent).unwrap();
        doomed_items.push(store.add_item(ItemRecord::new("x"), &child).unwrap());
        doomed_nodes.push(child.clone());
        parent = child;
    }
    store.add_item(ItemRecord::new("kept"), &keep).unwrap();

    store.remove_node(&gone).unwrap();

    for id in &doomed_nodes {
        assert!(!store.contains_node(id));
    }
    for id in &doomed_items {
        assert!(!store.contains_item(id));
    }
    for (_, node) in store.nodes() {
        assert!(node.child_node_ids().iter().all(|c| !doomed_nodes.contains(c)));
        assert!(node.item_ids().iter().all(|i| !doomed_items.contains(i)));
    }
    assert_eq!(store.item_count(), 1);
}

#[test]
fn moving_into_own_subtree_is_cyclic() {
    let mut store = HierarchicalStore::new_empty();
    let a = store.add_node("A", ROOT_ID).unwrap();
    let b = store.add_node("B", &a).unwrap();
    let c = store.add_node("C", &b).unwrap();
    let before = store.clone();

    let err = store.move_node_new_parent(&a, &c, 0).unwrap_err();
    assert!(matches!(err, PathmarkError::CyclicMove { .. }));
    assert_eq!(store, before);
}

#[test]
fn item_ordering_follows_insert_after_removal() {
    let mut store = HierarchicalStore::new_empty();
    let node = store.add_node("N", ROOT_ID).unwrap();
    let ids: Vec<String> = ["a", "b", "c", "d"]
        .iter()
        .map(|n| store.add_item(ItemRecord::new(*n), &node).unwrap())
        .collect();
    let order = |store: &HierarchicalStore| -> Vec<String> {
        store
            .node(&node)
            .unwrap()
            .item_ids()
            .iter()
            .map(|id| store.item(id).unwrap().name().unwrap().to_string())
            .collect()
    };

    store.move_item_within_node(&ids[3], -1).unwrap();
    assert_eq!(order(&store), vec!["a", "b", "d", "c"]);

    store.remove_item(&ids[3]).unwrap();
    store.move_item_within_node(&ids[2], 0).unwrap();
    assert_eq!(order(&store), vec!["c", "a", "b"]);
}

#[test]
fn work_report_survives_save_and_fresh_load() {
    let mut store = HierarchicalStore::new_empty();
    let work = store.add_node("Work", ROOT_ID).unwrap();
    store
        .add_item(ItemRecord::new("Report").with_path("/tmp/r.pdf"), &work)
        .unwrap();
    let bytes = store.save().unwrap();

    let loaded = HierarchicalStore::load(&bytes).unwrap();
    let root = loaded.root().unwrap();
    assert_eq!(root.child_node_ids().len(), 1);
    let work = loaded.node(&root.child_node_ids()[0]).unwrap();
    assert_eq!(work.name(), Some("Work"));
    assert_eq!(work.item_ids().len(), 1);
    let report = loaded.item(&work.item_ids()[0]).unwrap();
    assert_eq!(report.name(), Some("Report"));
    assert_eq!(report.path(), Some("/tmp/r.pdf"));
}

#[test]
fn repair_drops_child_whose_parent_points_elsewhere() {
    let doc = r#"{
        "nodes": {
            "root": {"name": null, "parent_id": null, "items": [], "sub_nodes": ["x", "z"]},
            "x": {"name": "X", "parent_id": "root", "items": [], "sub_nodes": ["y"]},
            "z": {"name": "Z", "parent_id": "root", "items": [], "sub_nodes": ["y"]},
            "y": {"name": "Y", "parent_id": "z", "items": [], "sub_nodes": []}
        },
        "items": {}
    }"#;
    let mut store = HierarchicalStore::load(doc.as_bytes()).unwrap();
    assert!(!store.check_integrity());

    let report = store.repair();
    assert!(!report.is_clean());
    assert!(store.node("x").unwrap().child_node_ids().is_empty());
    assert_eq!(store.node("z").unwrap().child_node_ids(), ["y".to_string()]);
    assert!(store.check_integrity());
}

#[test]
fn repair_is_idempotent_on_badly_damaged_documents() {
    let doc = r#"{
        "nodes": {
            "root": {"name": null, "parent_id": "x", "items": ["ghost"], "sub_nodes": ["a", "a", "m"]},
            "a": {"name": "A", "parent_id": "root", "items": ["i1", "i2"], "sub_nodes": ["b"]},
            "b": {"name": "B", "parent_id": "nowhere", "items": ["i3"], "sub_nodes": ["c"]},
            "c": {"name": "C", "parent_id": "b", "items": [], "sub_nodes": []},
            "m": {"name": "M", "parent_id": "root", "items": [], "sub_nodes": []},
            "p": {"name": "P", "parent_id": "q", "items": [], "sub_nodes": ["q"]},
            "q": {"name": "Q", "parent_id": "p", "items": [], "sub_nodes": ["p"]},
            "u": {"name": "U", "parent_id": "m", "items": [], "sub_nodes": []}
        },
        "items": {
            "i1": {"name": "one", "path": null, "comment": null, "parent_id": "a"},
            "i2": {"name": "two", "path": null, "comment": null, "parent_id": "m"},
            "i3": {"name": "three", "path": null, "comment": null, "parent_id": "b"},
            "i4": {"name": "four", "path": null, "comment": null, "parent_id": "gone"}
        }
    }"#;
    let mut store = HierarchicalStore::load(doc.as_bytes()).unwrap();

    let first = store.repair();
    assert!(!first.is_clean());
    assert!(store.check_integrity(), "{:?}", store.find_violation());

    let second = store.repair();
    assert!(second.is_clean(), "second pass: {}", second);

    for gone in ["b", "c", "p", "q"] {
        assert!(!store.contains_node(gone), "{} should be gone", gone);
    }
    assert!(!store.contains_item("i3"));
    assert!(!store.contains_item("i4"));
    assert_eq!(store.node("m").unwrap().item_ids(), ["i2".to_string()]);
    assert_eq!(store.node("m").unwrap().child_node_ids(), ["u".to_string()]);
}
