#![cfg(unix)]

use std::fs;
use std::path::Path;

use arbor_core::environment::Strategy;
use arbor_core::link::{is_symlink, link_cache_dir, unlink_cache_dir, MissingCache};
use tempfile::TempDir;

fn source_with_cache(cache_dir: &str) -> TempDir {
    let source = TempDir::new().unwrap();
    fs::create_dir_all(source.path().join(cache_dir).join("left-pad")).unwrap();
    fs::write(
        source.path().join(cache_dir).join("left-pad/index.js"),
        "module.exports = {};",
    )
    .unwrap();
    source
}

#[test]
fn test_link_creates_symlink_to_source_cache() {
    let source = source_with_cache("node_modules");
    let worktree = TempDir::new().unwrap();

    let result = link_cache_dir(
        "nodejs",
        worktree.path(),
        source.path(),
        "node_modules",
        MissingCache::Fail,
        None,
    )
    .unwrap();

    let destination = worktree.path().join("node_modules");
    assert!(result.success);
    assert_eq!(result.strategy, Strategy::Symlink);
    assert_eq!(result.path, Some(destination.clone()));
    assert!(is_symlink(&destination));
    assert_eq!(
        fs::read_link(&destination).unwrap(),
        source.path().join("node_modules")
    );
    assert!(destination.join("left-pad/index.js").is_file());
}

#[test]
fn test_link_twice_is_idempotent() {
    let source = source_with_cache("node_modules");
    let worktree = TempDir::new().unwrap();

    for _ in 0..2 {
        let result = link_cache_dir(
            "nodejs",
            worktree.path(),
            source.path(),
            "node_modules",
            MissingCache::Fail,
            None,
        )
        .unwrap();
        assert!(result.success, "{}", result.message);
    }

    assert_eq!(
        fs::read_link(worktree.path().join("node_modules")).unwrap(),
        source.path().join("node_modules")
    );
}

#[test]
fn test_link_replaces_existing_directory() {
    let source = source_with_cache("node_modules");
    let worktree = TempDir::new().unwrap();
    fs::create_dir_all(worktree.path().join("node_modules/stale")).unwrap();

    link_cache_dir(
        "nodejs",
        worktree.path(),
        source.path(),
        "node_modules",
        MissingCache::Fail,
        None,
    )
    .unwrap();

    assert!(is_symlink(&worktree.path().join("node_modules")));
}

#[test]
fn test_missing_required_cache_fails_without_mutation() {
    let source = TempDir::new().unwrap();
    let worktree = TempDir::new().unwrap();

    let result = link_cache_dir(
        "nodejs",
        worktree.path(),
        source.path(),
        "node_modules",
        MissingCache::Fail,
        None,
    )
    .unwrap();

    assert!(!result.success);
    assert!(result.message.contains("node_modules"));
    assert!(result.path.is_none());
    assert_eq!(fs::read_dir(worktree.path()).unwrap().count(), 0);
}

#[test]
fn test_missing_optional_cache_succeeds_without_mutation() {
    let source = TempDir::new().unwrap();
    let worktree = TempDir::new().unwrap();

    let result = link_cache_dir(
        "python",
        worktree.path(),
        source.path(),
        ".venv",
        MissingCache::Skip,
        None,
    )
    .unwrap();

    assert!(result.success);
    assert!(result.path.is_none());
    assert_eq!(fs::read_dir(worktree.path()).unwrap().count(), 0);
}

#[test]
fn test_unlink_removes_only_the_symlink() {
    let source = source_with_cache("node_modules");
    let worktree = TempDir::new().unwrap();
    link_cache_dir(
        "nodejs",
        worktree.path(),
        source.path(),
        "node_modules",
        MissingCache::Fail,
        None,
    )
    .unwrap();

    unlink_cache_dir(worktree.path(), "node_modules");

    assert!(!worktree.path().join("node_modules").exists());
    assert!(source.path().join("node_modules/left-pad/index.js").is_file());
}

#[test]
fn test_unlink_leaves_real_directory_untouched() {
    let worktree = TempDir::new().unwrap();
    let real = worktree.path().join("node_modules");
    fs::create_dir_all(real.join("pkg")).unwrap();
    fs::write(real.join("pkg/index.js"), "real data").unwrap();

    unlink_cache_dir(worktree.path(), "node_modules");

    assert!(real.is_dir());
    assert_eq!(
        fs::read_to_string(real.join("pkg/index.js")).unwrap(),
        "real data"
    );
}

#[test]
fn test_unlink_missing_path_is_noop() {
    let worktree = TempDir::new().unwrap();
    unlink_cache_dir(worktree.path(), "node_modules");
    assert_eq!(fs::read_dir(worktree.path()).unwrap().count(), 0);
}

#[test]
fn test_relative_source_links_to_absolute_target() {
    let temp_dir = TempDir::new().unwrap();
    let main = temp_dir.path().join("main");
    let worktree = temp_dir.path().join("wt");
    fs::create_dir_all(main.join("node_modules/dep")).unwrap();
    fs::create_dir_all(&worktree).unwrap();
    std::env::set_current_dir(&main).unwrap();

    let result = link_cache_dir(
        "nodejs",
        Path::new("../wt"),
        Path::new("."),
        "node_modules",
        MissingCache::Fail,
        None,
    )
    .unwrap();

    assert!(result.success, "{}", result.message);
    let target = fs::read_link(worktree.join("node_modules")).unwrap();
    assert!(target.is_absolute());
    assert!(worktree.join("node_modules/dep").is_dir());
}

#[test]
fn test_same_checkout_keeps_real_cache() {
    let source = source_with_cache("node_modules");

    let result = link_cache_dir(
        "nodejs",
        source.path(),
        source.path(),
        "node_modules",
        MissingCache::Fail,
        None,
    )
    .unwrap();

    let cache = source.path().join("node_modules");
    assert!(!result.success);
    assert!(result.path.is_none());
    assert!(!is_symlink(&cache));
    assert!(cache.join("left-pad/index.js").is_file());
}
