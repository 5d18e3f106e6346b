//! Recursive removal of database directories.

mod common;

use std::fs;
use std::os::unix::fs::symlink;

use common::{build_tree, walk};
use syncput_benchmarks::remove_tree;

#[test]
fn removes_nested_tree() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("db");
    let created = build_tree(&root, 4, 2);

    let removed = remove_tree(&root).unwrap();

    assert_eq!(removed, created);
    assert!(!root.exists());
    assert!(dir.path().exists(), "parent must survive");
}

#[test]
fn removes_empty_directories() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("db");
    fs::create_dir_all(root.join("a").join("b").join("c")).unwrap();

    assert_eq!(remove_tree(&root).unwrap(), 4);
    assert!(!root.exists());
}

#[test]
fn single_file_root() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("LOCK");
    fs::write(&file, b"").unwrap();

    assert_eq!(remove_tree(&file).unwrap(), 1);
    assert!(!file.exists());
}

#[test]
fn symlink_to_outside_directory_is_not_followed() {
    let dir = tempfile::tempdir().unwrap();
    let outside = dir.path().join("outside");
    build_tree(&outside, 2, 2);
    let before = walk(&outside).len();

    let root = dir.path().join("db");
    build_tree(&root, 3, 1);
    symlink(&outside, root.join("escape")).unwrap();
    symlink(&outside, root.join("level3-0").join("escape2")).unwrap();

    remove_tree(&root).unwrap();

    assert!(!root.exists());
    assert!(outside.exists());
    assert_eq!(walk(&outside).len(), before);
}

#[test]
fn symlink_root_removes_only_the_link() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("real");
    build_tree(&target, 1, 1);
    let link = dir.path().join("link");
    symlink(&target, &link).unwrap();

    assert_eq!(remove_tree(&link).unwrap(), 1);
    assert!(fs::symlink_metadata(&link).is_err());
    assert!(target.join("000000.sst").exists());
}

#[test]
fn dangling_symlink_is_removed() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("db");
    fs::create_dir(&root).unwrap();
    symlink(dir.path().join("gone"), root.join("dangling")).unwrap();

    assert_eq!(remove_tree(&root).unwrap(), 2);
    assert!(!root.exists());
}

#[test]
fn missing_root_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("never-created");

    let err = remove_tree(&root).unwrap_err();

    assert_eq!(err.errors, 1);
    assert_eq!(err.removed, 0);
    assert_eq!(err.root, root);
}

#[test]
fn working_directory_is_unchanged() {
    let before = std::env::current_dir().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("db");
    build_tree(&root, 3, 2);

    remove_tree(&root).unwrap();

    assert_eq!(std::env::current_dir().unwrap(), before);
}
