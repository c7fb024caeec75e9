use annolink_core::{EntityError, MemoryStore, Source};

fn setup_root() -> (MemoryStore, Source) {
    let store = MemoryStore::new();
    let root = store.create_source("session", "recording").unwrap();
    (store, root)
}

fn ids(sources: &[Source]) -> Vec<String> {
    sources.iter().map(|s| s.id().unwrap()).collect()
}

fn type_is(expected: &'static str) -> impl Fn(&Source) -> bool {
    move |source| source.type_name().map(|t| t == expected).unwrap_or(false)
}

#[test]
fn create_then_get_returns_identity_equal_handle() {
    let (_store, root) = setup_root();
    let before = root.source_count().unwrap();

    let created = root.create_source("probe", "device").unwrap();
    let fetched = root.get_source(&created.id().unwrap()).unwrap();

    assert_eq!(created, fetched);
    assert_eq!(root.source_count().unwrap(), before + 1);
    assert!(root.has_source(&created.id().unwrap()).unwrap());
    assert!(root.has_source_entity(&created).unwrap());
}

#[test]
fn lookup_misses_fail_with_not_found() {
    let (_store, root) = setup_root();
    root.create_source("probe", "device").unwrap();

    assert!(matches!(
        root.get_source("no-such-id").unwrap_err(),
        EntityError::NotFound(_)
    ));
    assert!(matches!(
        root.get_source_at(1).unwrap_err(),
        EntityError::NotFound(_)
    ));
}

#[test]
fn sources_preserve_insertion_order_and_apply_filter() {
    let (_store, root) = setup_root();
    let a = root.create_source("a", "probe").unwrap();
    let b = root.create_source("b", "amplifier").unwrap();
    let c = root.create_source("c", "probe").unwrap();

    assert_eq!(ids(&root.sources().unwrap()), ids(&[a.clone(), b, c.clone()]));
    assert_eq!(
        ids(&root.sources_where(type_is("probe")).unwrap()),
        ids(&[a, c])
    );
}

#[test]
fn find_sources_visits_every_node_once_in_pre_order() {
    let (_store, root) = setup_root();
    let a = root.create_source("a", "probe").unwrap();
    let a1 = a.create_source("a1", "electrode").unwrap();
    let a2 = a.create_source("a2", "electrode").unwrap();
    let b = root.create_source("b", "probe").unwrap();
    let b1 = b.create_source("b1", "electrode").unwrap();

    let all = root.find_sources(|_| true, None).unwrap();
    assert_eq!(
        ids(&all),
        ids(&[root.clone(), a, a1, a2, b, b1])
    );
}

#[test]
fn find_sources_bounds_depth_without_skipping_the_boundary_level() {
    let (_store, root) = setup_root();
    let a = root.create_source("a", "probe").unwrap();
    let a1 = a.create_source("a1", "electrode").unwrap();
    a1.create_source("a1x", "contact").unwrap();

    let only_root = root.find_sources(|_| true, Some(0)).unwrap();
    assert_eq!(ids(&only_root), ids(&[root.clone()]));

    let to_depth_one = root.find_sources(|_| true, Some(1)).unwrap();
    assert_eq!(ids(&to_depth_one), ids(&[root.clone(), a.clone()]));

    let to_depth_two = root.find_sources(|_| true, Some(2)).unwrap();
    assert_eq!(ids(&to_depth_two), ids(&[root, a, a1]));
}

#[test]
fn rejecting_predicate_yields_empty_result() {
    let (_store, root) = setup_root();
    let a = root.create_source("a", "probe").unwrap();
    a.create_source("a1", "electrode").unwrap();

    assert!(root.find_sources(|_| false, None).unwrap().is_empty());
    assert!(root.find_sources(|_| false, Some(1)).unwrap().is_empty());
}

#[test]
fn probe_scenario_distinguishes_depth_and_predicate_exclusion() {
    let (_store, root) = setup_root();
    let a = root.create_source("A", "probe").unwrap();
    let b = root.create_source("B", "probe").unwrap();
    a.create_source("A1", "electrode").unwrap();

    // A1 excluded by depth.
    let depth_bounded = root.find_sources(type_is("probe"), Some(1)).unwrap();
    assert_eq!(ids(&depth_bounded), ids(&[a.clone(), b.clone()]));

    // A1 excluded by predicate, not depth.
    let unbounded = root.find_sources(type_is("probe"), None).unwrap();
    assert_eq!(ids(&unbounded), ids(&[a, b]));
}

#[test]
fn delete_removes_the_whole_subtree() {
    let (_store, root) = setup_root();
    let a = root.create_source("a", "probe").unwrap();
    let a1 = a.create_source("a1", "electrode").unwrap();
    let a1_id = a1.id().unwrap();
    let b = root.create_source("b", "probe").unwrap();

    let before = root.source_count().unwrap();
    assert!(root.delete_source(&a.id().unwrap()).unwrap());

    assert!(!root.has_source(&a.id().unwrap()).unwrap());
    assert_eq!(root.source_count().unwrap(), before - 1);

    let remaining = root.find_sources(|_| true, None).unwrap();
    let remaining_ids = ids(&remaining);
    assert!(!remaining_ids.contains(&a.id().unwrap()));
    assert!(!remaining_ids.contains(&a1_id));
    assert!(remaining_ids.contains(&b.id().unwrap()));
}

#[test]
fn delete_by_entity_matches_delete_by_id() {
    let (_store, root) = setup_root();
    let a = root.create_source("a", "probe").unwrap();

    assert!(root.delete_source_entity(&a).unwrap());
    assert!(!root.has_source_entity(&a).unwrap());
}

#[test]
fn delete_of_missing_id_is_a_soft_false_and_leaves_the_tree_unchanged() {
    let (_store, root) = setup_root();
    root.create_source("a", "probe").unwrap();
    let snapshot = ids(&root.find_sources(|_| true, None).unwrap());

    assert!(!root.delete_source("no-such-id").unwrap());
    assert_eq!(ids(&root.find_sources(|_| true, None).unwrap()), snapshot);
}

#[test]
fn find_sources_is_restartable_with_identical_results() {
    let (_store, root) = setup_root();
    let a = root.create_source("a", "probe").unwrap();
    a.create_source("a1", "electrode").unwrap();

    let first = ids(&root.find_sources(|_| true, None).unwrap());
    let second = ids(&root.find_sources(|_| true, None).unwrap());
    assert_eq!(first, second);
}

#[test]
fn source_rendering_names_the_node_or_its_empty_state() {
    let (_store, root) = setup_root();
    assert_eq!(
        root.to_string(),
        "Source {name = session, type = recording}"
    );
    assert_eq!(Source::none().to_string(), "Source {none}");
}
