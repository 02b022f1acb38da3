//! Monorepo detection and workspace package resolution.
//!
//! Resolution is a first-match cascade over three conventions:
//!
//! 1. a `workspaces` field in the root `package.json` (npm, yarn, bun),
//! 2. a `pnpm-workspace.yaml` file,
//! 3. a `lerna.json` file.
//!
//! Workspace patterns support a single trailing `/*` segment or a literal
//! directory. Any other glob form resolves to no packages.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

pub const PACKAGE_JSON: &str = "package.json";
pub const PNPM_WORKSPACE_YAML: &str = "pnpm-workspace.yaml";
pub const LERNA_JSON: &str = "lerna.json";

/// Entry used for path mappings when a package has no recognizable entry file.
pub const DEFAULT_ENTRY_POINT: &str = "src/index.ts";

const ENTRY_POINT_CANDIDATES: &[&str] = &[
    "src/index.ts",
    "src/index.tsx",
    "src/index.mts",
    "src/index.js",
    "lib/index.ts",
    "index.ts",
    "index.tsx",
    "index.js",
];

const LERNA_DEFAULT_PATTERN: &str = "packages/*";

/// Workspace convention a monorepo follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MonorepoKind {
    NpmWorkspaces,
    PnpmWorkspaces,
    Lerna,
}

impl MonorepoKind {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            MonorepoKind::NpmWorkspaces => "npm-workspaces",
            MonorepoKind::PnpmWorkspaces => "pnpm-workspaces",
            MonorepoKind::Lerna => "lerna",
        }
    }
}

/// A member project of a monorepo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkspacePackage {
    /// Import specifier taken from the package manifest.
    pub name: String,
    /// Directory relative to the project root.
    pub path: PathBuf,
    pub absolute_path: PathBuf,
    /// Entry file relative to the package directory.
    pub entry_point: Option<String>,
}

impl WorkspacePackage {
    /// Entry file to map imports to, falling back to [`DEFAULT_ENTRY_POINT`].
    pub fn entry_point_or_default(&self) -> &str {
        self.entry_point.as_deref().unwrap_or(DEFAULT_ENTRY_POINT)
    }
}

/// Result of monorepo detection for a project root.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MonorepoInfo {
    pub is_monorepo: bool,
    #[serde(rename = "type")]
    pub kind: Option<MonorepoKind>,
    pub root_package_json: Option<PathBuf>,
    pub packages: Vec<WorkspacePackage>,
}

impl MonorepoInfo {
    /// Looks up a resolved package by import name.
    pub fn package(&self, name: &str) -> Option<&WorkspacePackage> {
        self.packages.iter().find(|p| p.name == name)
    }
}

/// Determines whether `root` is a multi-package workspace and resolves its members.
///
/// Never fails: unreadable or malformed manifests count as absent.
pub fn detect_monorepo(root: &Path) -> MonorepoInfo {
    let Some((kind, patterns)) = workspace_patterns(root) else {
        debug!("{} is not a monorepo", root.display());
        return MonorepoInfo::default();
    };

    debug!(
        "{} is a {} monorepo with patterns {:?}",
        root.display(),
        kind.as_str(),
        patterns
    );

    let root_package_json = root.join(PACKAGE_JSON);
    MonorepoInfo {
        is_monorepo: true,
        kind: Some(kind),
        root_package_json: root_package_json.is_file().then_some(root_package_json),
        packages: resolve_workspace_packages(root, &patterns),
    }
}

fn workspace_patterns(root: &Path) -> Option<(MonorepoKind, Vec<String>)> {
    if let Some(manifest) = read_json(&root.join(PACKAGE_JSON)) {
        let workspaces = manifest.get("workspaces");
        let patterns = workspaces
            .and_then(|w| w.as_array())
            .or_else(|| {
                workspaces
                    .and_then(|w| w.get("packages"))
                    .and_then(|p| p.as_array())
            })
            .map(|items| string_array(items));
        if let Some(patterns) = patterns {
            return Some((MonorepoKind::NpmWorkspaces, patterns));
        }
    }

    if let Ok(content) = fs::read_to_string(root.join(PNPM_WORKSPACE_YAML)) {
        return Some((MonorepoKind::PnpmWorkspaces, parse_workspace_yaml(&content)));
    }

    let lerna_path = root.join(LERNA_JSON);
    if lerna_path.is_file() {
        let patterns = read_json(&lerna_path)
            .and_then(|lerna| lerna.get("packages").and_then(|p| p.as_array()).cloned())
            .map(|items| string_array(&items))
            .unwrap_or_else(|| vec![LERNA_DEFAULT_PATTERN.to_string()]);
        return Some((MonorepoKind::Lerna, patterns));
    }

    None
}

fn string_array(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(|v| v.as_str())
        .map(|s| s.to_string())
        .collect()
}

fn read_json(path: &Path) -> Option<Value> {
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Reads the `packages:` list from a `pnpm-workspace.yaml` document.
///
/// Only a top-level `packages:` key followed by `- item` lines is
/// understood. Items may be bare, single-quoted, or double-quoted. Blank
/// lines and `#` comments inside the list are skipped; the first other line
/// ends the list.
pub fn parse_workspace_yaml(content: &str) -> Vec<String> {
    let mut patterns = Vec::new();
    let mut in_packages = false;

    for line in content.lines() {
        if !in_packages {
            let key = line.split('#').next().unwrap_or("").trim_end();
            in_packages = key == "packages:";
            continue;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match trimmed.strip_prefix('-') {
            Some(item) => {
                let item = unquote(item.trim());
                if !item.is_empty() {
                    patterns.push(item.to_string());
                }
            }
            None => break,
        }
    }

    patterns
}

fn unquote(item: &str) -> &str {
    for quote in ['\'', '"'] {
        if let Some(rest) = item.strip_prefix(quote) {
            return rest.split(quote).next().unwrap_or("");
        }
    }
    item.split(" #").next().unwrap_or("").trim_end()
}

/// Expands workspace patterns into packages, dropping later duplicates by name.
pub fn resolve_workspace_packages(root: &Path, patterns: &[String]) -> Vec<WorkspacePackage> {
    let mut packages: Vec<WorkspacePackage> = Vec::new();
    let mut seen: HashMap<String, PathBuf> = HashMap::new();

    for pattern in patterns {
        for package in resolve_pattern(root, pattern) {
            if let Some(first) = seen.get(&package.name) {
                warn!(
                    "Duplicate workspace package '{}' in {} (already found in {}), ignoring",
                    package.name,
                    package.path.display(),
                    first.display()
                );
                continue;
            }
            seen.insert(package.name.clone(), package.path.clone());
            packages.push(package);
        }
    }

    packages
}

fn resolve_pattern(root: &Path, pattern: &str) -> Vec<WorkspacePackage> {
    let pattern = pattern.trim();
    let pattern = pattern.strip_prefix("./").unwrap_or(pattern);
    let pattern = pattern.trim_end_matches('/');

    if pattern.starts_with('!') {
        debug!("Exclusion pattern '{}' is not supported, skipping", pattern);
        return Vec::new();
    }

    if let Some(base) = pattern.strip_suffix("/*") {
        if has_glob(base) {
            debug!("Unsupported workspace pattern '{}', skipping", pattern);
            return Vec::new();
        }

        let Ok(entries) = fs::read_dir(root.join(base)) else {
            debug!("Workspace directory '{}' does not exist", base);
            return Vec::new();
        };

        let mut dirs: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        dirs.sort();

        return dirs
            .iter()
            .filter_map(|dir| read_workspace_package(root, dir))
            .collect();
    }

    if has_glob(pattern) {
        debug!("Unsupported workspace pattern '{}', skipping", pattern);
        return Vec::new();
    }

    read_workspace_package(root, &root.join(pattern))
        .into_iter()
        .collect()
}

fn has_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '[', '{'])
}

fn read_workspace_package(root: &Path, dir: &Path) -> Option<WorkspacePackage> {
    let manifest = read_json(&dir.join(PACKAGE_JSON))?;
    let name = manifest
        .get("name")
        .and_then(|n| n.as_str())
        .filter(|n| !n.is_empty())?;

    let path = dir
        .strip_prefix(root)
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|_| dir.to_path_buf());

    Some(WorkspacePackage {
        name: name.to_string(),
        path,
        absolute_path: dir.to_path_buf(),
        entry_point: find_entry_point(dir),
    })
}

/// Returns the first conventional entry file that exists in `package_dir`.
pub fn find_entry_point(package_dir: &Path) -> Option<String> {
    ENTRY_POINT_CANDIDATES
        .iter()
        .find(|candidate| package_dir.join(candidate).is_file())
        .map(|candidate| candidate.to_string())
}
