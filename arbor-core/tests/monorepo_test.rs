use std::fs;
use std::path::{Path, PathBuf};

use arbor_core::monorepo::{detect_monorepo, MonorepoKind};
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn create_package(root: &Path, dir: &str, name: &str) {
    write(
        root,
        &format!("{}/package.json", dir),
        &format!(r#"{{"name": "{}", "version": "1.0.0"}}"#, name),
    );
}

#[test]
fn test_npm_workspaces_with_entry_point() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "package.json", r#"{"workspaces": ["packages/*"]}"#);
    create_package(root, "packages/core", "@x/core");
    write(root, "packages/core/src/index.ts", "export {};");

    let info = detect_monorepo(root);

    assert!(info.is_monorepo);
    assert_eq!(info.kind, Some(MonorepoKind::NpmWorkspaces));
    assert_eq!(info.root_package_json, Some(root.join("package.json")));
    assert_eq!(info.packages.len(), 1);

    let core = &info.packages[0];
    assert_eq!(core.name, "@x/core");
    assert_eq!(core.path, PathBuf::from("packages/core"));
    assert_eq!(core.absolute_path, root.join("packages/core"));
    assert_eq!(core.entry_point.as_deref(), Some("src/index.ts"));
}

#[test]
fn test_workspaces_object_form() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(
        root,
        "package.json",
        r#"{"workspaces": {"packages": ["apps/*"], "nohoist": ["**/react"]}}"#,
    );
    create_package(root, "apps/web", "web");

    let info = detect_monorepo(root);

    assert_eq!(info.kind, Some(MonorepoKind::NpmWorkspaces));
    assert_eq!(info.packages.len(), 1);
    assert_eq!(info.packages[0].name, "web");
}

#[test]
fn test_only_directories_with_manifests_are_packages() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(
        root,
        "package.json",
        r#"{"workspaces": ["packages/*", "apps/*"]}"#,
    );
    create_package(root, "packages/a", "a");
    create_package(root, "packages/b", "b");
    create_package(root, "apps/web", "web");
    fs::create_dir_all(root.join("packages/no-manifest")).unwrap();
    fs::create_dir_all(root.join("apps/docs/src")).unwrap();
    write(root, "packages/README.md", "not a package");
    write(root, "packages/nameless/package.json", r#"{"version": "1.0.0"}"#);
    write(root, "packages/broken/package.json", "{ not json");

    let info = detect_monorepo(root);

    let names: Vec<&str> = info.packages.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "web"]);
}

#[test]
fn test_literal_and_unsupported_patterns() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(
        root,
        "package.json",
        r#"{"workspaces": ["./tools/cli", "libs/**", "!packages/legacy", "packages/*/sub"]}"#,
    );
    create_package(root, "tools/cli", "cli");
    create_package(root, "libs/deep/inner", "deep");
    create_package(root, "packages/legacy", "legacy");

    let info = detect_monorepo(root);

    assert!(info.is_monorepo);
    assert_eq!(info.packages.len(), 1);
    assert_eq!(info.packages[0].name, "cli");
    assert_eq!(info.packages[0].path, PathBuf::from("tools/cli"));
}

#[test]
fn test_pnpm_workspace_yaml() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "package.json", r#"{"name": "root", "private": true}"#);
    write(
        root,
        "pnpm-workspace.yaml",
        "packages:\n  - 'packages/*'\n  # apps come later\n  - \"apps/*\"\n",
    );
    create_package(root, "packages/utils", "@acme/utils");
    create_package(root, "apps/site", "@acme/site");

    let info = detect_monorepo(root);

    assert_eq!(info.kind, Some(MonorepoKind::PnpmWorkspaces));
    let names: Vec<&str> = info.packages.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["@acme/utils", "@acme/site"]);
}

#[test]
fn test_package_json_workspaces_take_precedence_over_pnpm() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "package.json", r#"{"workspaces": ["apps/*"]}"#);
    write(root, "pnpm-workspace.yaml", "packages:\n  - packages/*\n");
    write(root, "lerna.json", r#"{"packages": ["modules/*"]}"#);

    let info = detect_monorepo(root);

    assert_eq!(info.kind, Some(MonorepoKind::NpmWorkspaces));
}

#[test]
fn test_lerna_default_packages() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "lerna.json", r#"{"version": "independent"}"#);
    create_package(root, "packages/one", "one");

    let info = detect_monorepo(root);

    assert_eq!(info.kind, Some(MonorepoKind::Lerna));
    assert!(info.root_package_json.is_none());
    assert_eq!(info.packages.len(), 1);
    assert_eq!(info.packages[0].name, "one");
}

#[test]
fn test_lerna_explicit_packages() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "package.json", r#"{"name": "root"}"#);
    write(root, "lerna.json", r#"{"packages": ["modules/*"]}"#);
    create_package(root, "modules/m", "m");
    create_package(root, "packages/ignored", "ignored");

    let info = detect_monorepo(root);

    assert_eq!(info.kind, Some(MonorepoKind::Lerna));
    let names: Vec<&str> = info.packages.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["m"]);
}

#[test]
fn test_duplicate_names_keep_first() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(
        root,
        "package.json",
        r#"{"workspaces": ["packages/*", "legacy/*"]}"#,
    );
    create_package(root, "packages/core", "core");
    create_package(root, "legacy/core", "core");

    let info = detect_monorepo(root);

    assert_eq!(info.packages.len(), 1);
    assert_eq!(info.packages[0].path, PathBuf::from("packages/core"));
}

#[test]
fn test_entry_point_probe_order_and_absence() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "package.json", r#"{"workspaces": ["packages/*"]}"#);
    create_package(root, "packages/lib-only", "lib-only");
    write(root, "packages/lib-only/lib/index.ts", "");
    write(root, "packages/lib-only/index.ts", "");
    create_package(root, "packages/empty", "empty");

    let info = detect_monorepo(root);

    let lib_only = info.package("lib-only").unwrap();
    assert_eq!(lib_only.entry_point.as_deref(), Some("lib/index.ts"));

    let empty = info.package("empty").unwrap();
    assert!(empty.entry_point.is_none());
    assert_eq!(empty.entry_point_or_default(), "src/index.ts");
}

#[test]
fn test_not_a_monorepo() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "package.json", r#"{"name": "single", "version": "1.0.0"}"#);

    let info = detect_monorepo(root);

    assert!(!info.is_monorepo);
    assert!(info.kind.is_none());
    assert!(info.packages.is_empty());
}

#[test]
fn test_malformed_root_manifest_falls_through() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "package.json", "{ \"workspaces\": [");
    write(root, "pnpm-workspace.yaml", "packages:\n  - packages/*\n");
    create_package(root, "packages/p", "p");

    let info = detect_monorepo(root);

    assert_eq!(info.kind, Some(MonorepoKind::PnpmWorkspaces));
    assert_eq!(info.packages.len(), 1);
}
