mod common;
use crate::common::{init_tracing, write_tree, TestResult};

use std::collections::HashSet;
use std::path::PathBuf;

use tempfile::tempdir;

use treewatch::fs::mock::MockFileSystem;
use treewatch::fs::RealFileSystem;
use treewatch::scan::enumerate;

fn as_set(paths: &[PathBuf]) -> HashSet<PathBuf> {
    paths.iter().cloned().collect()
}

#[test]
fn regular_files_only_with_one_diagnostic_per_unreadable_entry() {
    init_tracing();

    let fs = MockFileSystem::new();
    fs.add_file("root/a.txt", b"a");
    fs.add_file("root/b.txt", b"b");
    fs.add_file("root/c.txt", b"c");
    fs.add_file("root/sub/d.txt", b"d");
    fs.add_unreadable("root/secret");

    let list = enumerate(&fs, &[PathBuf::from("root")]);

    let expected: HashSet<PathBuf> = ["root/a.txt", "root/b.txt", "root/c.txt", "root/sub/d.txt"]
        .iter()
        .map(PathBuf::from)
        .collect();
    assert_eq!(list.files.len(), 4);
    assert_eq!(as_set(&list.files), expected);

    assert_eq!(list.inaccessible.len(), 1);
    assert_eq!(list.inaccessible[0].path, PathBuf::from("root/secret"));
    assert!(list.inaccessible[0].reason.contains("Permission denied"));
}

#[test]
fn symlinks_and_devices_are_skipped_silently() {
    init_tracing();

    let fs = MockFileSystem::new();
    fs.add_file("root/real.txt", b"x");
    fs.add_symlink("root/alias.txt", "root/real.txt");
    fs.add_symlink("root/dir-link", "root");
    fs.add_device("root/tty0");

    let list = enumerate(&fs, &[PathBuf::from("root")]);

    assert_eq!(list.files, vec![PathBuf::from("root/real.txt")]);
    assert!(list.inaccessible.is_empty());
}

#[test]
fn bad_root_does_not_stop_other_roots() {
    init_tracing();

    let fs = MockFileSystem::new();
    fs.add_file("good/a.txt", b"a");

    let list = enumerate(&fs, &[PathBuf::from("missing"), PathBuf::from("good")]);

    assert_eq!(list.files, vec![PathBuf::from("good/a.txt")]);
    assert_eq!(list.inaccessible.len(), 1);
}

#[test]
fn walks_a_real_directory_tree() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    write_tree(
        dir.path(),
        &[
            ("a.txt", b"a"),
            ("nested/b.txt", b"b"),
            ("nested/deeper/c.txt", b"c"),
        ],
    )?;
    std::fs::create_dir(dir.path().join("empty"))?;

    let list = enumerate(&RealFileSystem, &[dir.path().to_path_buf()]);

    let expected: HashSet<PathBuf> = ["a.txt", "nested/b.txt", "nested/deeper/c.txt"]
        .iter()
        .map(|rel| dir.path().join(rel))
        .collect();
    assert_eq!(as_set(&list.files), expected);
    assert!(list.inaccessible.is_empty());
    Ok(())
}

#[cfg(unix)]
#[test]
fn real_symlinks_are_not_followed() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    write_tree(dir.path(), &[("data/file.txt", b"x")])?;
    std::os::unix::fs::symlink(dir.path().join("data"), dir.path().join("data-link"))?;
    std::os::unix::fs::symlink(
        dir.path().join("data/file.txt"),
        dir.path().join("file-link.txt"),
    )?;

    let list = enumerate(&RealFileSystem, &[dir.path().to_path_buf()]);

    assert_eq!(list.files, vec![dir.path().join("data/file.txt")]);
    Ok(())
}
