mod common;
use crate::common::init_tracing;

use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

use proptest::prelude::*;
use treewatch::scan::{diff, same_content, ChangeSet, Snapshot};
use treewatch_test_utils::builders::SnapshotFixture;

/// A file state: `Some(byte)` is readable content, `None` is a read failure.
type FileState = Option<u8>;

// Strategy for snapshots over a small shared path universe, so that two
// generated snapshots overlap often.
fn snapshot_strategy() -> impl Strategy<Value = BTreeMap<String, FileState>> {
    proptest::collection::btree_map(
        (0..12usize).prop_map(|i| format!("dir/file-{i}")),
        proptest::option::weighted(0.8, 0..4u8),
        0..12,
    )
}

fn to_snapshot(spec: &BTreeMap<String, FileState>) -> Snapshot {
    let mut fixture = SnapshotFixture::new();
    for (path, state) in spec {
        fixture = match state {
            Some(byte) => fixture.file(path, &[*byte]),
            None => fixture.failed(path, &format!("cannot read {path}")),
        };
    }
    fixture.build()
}

fn set(paths: &[PathBuf]) -> HashSet<PathBuf> {
    paths.iter().cloned().collect()
}

fn all_changed(changes: &ChangeSet) -> Vec<PathBuf> {
    changes
        .added
        .iter()
        .chain(&changes.edited)
        .chain(&changes.deleted)
        .cloned()
        .collect()
}

proptest! {
    #[test]
    fn diff_against_itself_is_empty(a in snapshot_strategy()) {
        let snap = to_snapshot(&a);
        prop_assert!(diff(&snap, &snap).is_empty());
    }

    #[test]
    fn categories_partition_the_changed_paths(
        a in snapshot_strategy(),
        b in snapshot_strategy(),
    ) {
        let (sa, sb) = (to_snapshot(&a), to_snapshot(&b));
        let changes = diff(&sa, &sb);

        let changed = all_changed(&changes);
        let unique = set(&changed);
        // Disjoint: no path is listed twice.
        prop_assert_eq!(changed.len(), unique.len());

        // Covering: everything in either snapshot is either changed or
        // present in both with the same content.
        let mut universe: HashSet<PathBuf> = sa.paths().map(PathBuf::from).collect();
        universe.extend(sb.paths().map(PathBuf::from));
        for path in &universe {
            let unchanged = sa.contains(path)
                && sb.contains(path)
                && same_content(sa.get(path), sb.get(path));
            prop_assert_eq!(unique.contains(path), !unchanged, "path {:?}", path);
        }
        prop_assert!(unique.is_subset(&universe));
    }

    #[test]
    fn diff_is_symmetric(a in snapshot_strategy(), b in snapshot_strategy()) {
        let (sa, sb) = (to_snapshot(&a), to_snapshot(&b));
        let forward = diff(&sa, &sb);
        let backward = diff(&sb, &sa);

        prop_assert_eq!(set(&forward.deleted), set(&backward.added));
        prop_assert_eq!(set(&forward.added), set(&backward.deleted));
        prop_assert_eq!(set(&forward.edited), set(&backward.edited));
    }
}

#[test]
fn adding_a_file() {
    init_tracing();

    let a = SnapshotFixture::new().file("f1", b"X").build();
    let b = SnapshotFixture::new().file("f1", b"X").file("f2", b"Y").build();

    let changes = diff(&a, &b);
    assert_eq!(changes.added, vec![PathBuf::from("f2")]);
    assert!(changes.edited.is_empty());
    assert!(changes.deleted.is_empty());
}

#[test]
fn editing_a_file() {
    init_tracing();

    let a = SnapshotFixture::new().file("f1", b"X").build();
    let b = SnapshotFixture::new().file("f1", b"X'").build();

    let changes = diff(&a, &b);
    assert_eq!(changes.edited, vec![PathBuf::from("f1")]);
    assert!(changes.added.is_empty());
    assert!(changes.deleted.is_empty());
}

#[test]
fn unreadable_twice_is_not_an_edit() {
    init_tracing();

    let a = SnapshotFixture::new().failed("f1", "permission denied").build();
    let b = SnapshotFixture::new().failed("f1", "is a directory").build();

    assert!(diff(&a, &b).is_empty());
}
