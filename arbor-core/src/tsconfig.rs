//! Injects workspace path mappings into `tsconfig.json` files.
//!
//! In a worktree, cross-package imports would otherwise resolve through the
//! linked `node_modules` back into the source checkout. Each mapping points
//! an import name at the worktree's own copy of the package sources.

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::{Error, Result};
use crate::jsonc::parse_jsonc;
use crate::monorepo::WorkspacePackage;

pub const TSCONFIG_JSON: &str = "tsconfig.json";

/// Directory levels below the scan root that are searched.
pub const MAX_SCAN_DEPTH: usize = 5;

const SKIPPED_DIRS: &[&str] = &["node_modules", "venv", "target"];

/// Files seen and touched by one patch pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PatchSummary {
    pub scanned: Vec<PathBuf>,
    pub patched: Vec<PathBuf>,
    /// Files left untouched because they could not be read, parsed, or written.
    pub skipped: Vec<PathBuf>,
}

impl PatchSummary {
    pub fn any_patched(&self) -> bool {
        !self.patched.is_empty()
    }
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || SKIPPED_DIRS.iter().any(|dir| *dir == name)
}

/// Finds every `tsconfig.json` under `root`, at most [`MAX_SCAN_DEPTH`] levels deep.
///
/// Hidden directories and dependency caches are not entered, and symlinks
/// are never followed.
pub fn find_tsconfig_files(root: &Path) -> Vec<PathBuf> {
    let walker = WalkDir::new(root)
        .max_depth(MAX_SCAN_DEPTH + 1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_skipped_dir(entry));

    let mut files = Vec::new();
    for entry in walker.filter_map(|e| e.ok()) {
        if entry.file_type().is_dir() {
            if entry.depth() > MAX_SCAN_DEPTH {
                debug!(
                    "Scan depth limit reached, not searching {}",
                    entry.path().display()
                );
            }
            continue;
        }

        if entry.file_type().is_file() && entry.file_name() == TSCONFIG_JSON {
            files.push(entry.into_path());
        }
    }

    files
}

/// Patches every `tsconfig.json` in `worktree_root` with mappings for `packages`.
///
/// Each file is handled in isolation: one malformed file never stops the
/// others from being patched.
pub fn patch_tsconfig_files(worktree_root: &Path, packages: &[WorkspacePackage]) -> PatchSummary {
    let mut summary = PatchSummary::default();

    for path in find_tsconfig_files(worktree_root) {
        match patch_tsconfig(&path, worktree_root, packages) {
            Ok(0) => debug!("{} already has all mappings", path.display()),
            Ok(added) => {
                info!("Added {} path mapping(s) to {}", added, path.display());
                summary.patched.push(path.clone());
            }
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                summary.skipped.push(path.clone());
            }
        }
        summary.scanned.push(path);
    }

    summary
}

/// Adds missing path mappings to one config file and returns how many were added.
///
/// The file is rewritten only when at least one mapping was added; existing
/// mappings and an explicit `baseUrl` are never changed.
pub fn patch_tsconfig(
    path: &Path,
    worktree_root: &Path,
    packages: &[WorkspacePackage],
) -> Result<usize> {
    let content = fs::read_to_string(path)?;
    let mut config = parse_jsonc(&content).map_err(|error| Error::Json {
        path: path.to_path_buf(),
        error,
    })?;

    let depth = path
        .parent()
        .map(|dir| depth_below(dir, worktree_root))
        .unwrap_or(0);

    let added = add_path_mappings(&mut config, depth, packages).map_err(|message| {
        Error::InvalidConfig {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    })?;

    if added > 0 {
        let mut output = serde_json::to_string_pretty(&config).map_err(|error| Error::Json {
            path: path.to_path_buf(),
            error,
        })?;
        output.push('\n');
        fs::write(path, output)?;
    }

    Ok(added)
}

fn add_path_mappings(
    config: &mut Value,
    depth: usize,
    packages: &[WorkspacePackage],
) -> std::result::Result<usize, &'static str> {
    let root = config.as_object_mut().ok_or("root is not an object")?;
    let compiler_options = root
        .entry("compilerOptions")
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or("compilerOptions is not an object")?;

    compiler_options
        .entry("baseUrl")
        .or_insert_with(|| Value::String(".".to_string()));

    let paths = compiler_options
        .entry("paths")
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or("compilerOptions.paths is not an object")?;

    let mut added = 0;
    for package in packages {
        if paths.contains_key(&package.name) {
            continue;
        }
        let target = mapping_target(depth, package);
        paths.insert(
            package.name.clone(),
            Value::Array(vec![Value::String(target)]),
        );
        added += 1;
    }

    Ok(added)
}

/// Number of directory levels `dir` sits below `root`.
fn depth_below(dir: &Path, root: &Path) -> usize {
    dir.strip_prefix(root)
        .map(|relative| {
            relative
                .components()
                .filter(|c| matches!(c, Component::Normal(_)))
                .count()
        })
        .unwrap_or(0)
}

/// Forward-slash path from a config `depth` levels below the worktree root
/// to the package's entry file.
fn mapping_target(depth: usize, package: &WorkspacePackage) -> String {
    let mut segments: Vec<String> = std::iter::repeat("..".to_string()).take(depth).collect();
    segments.extend(package.path.components().filter_map(|c| match c {
        Component::Normal(name) => Some(name.to_string_lossy().to_string()),
        Component::ParentDir => Some("..".to_string()),
        _ => None,
    }));
    segments.push(package.entry_point_or_default().to_string());
    segments.join("/")
}
