//! Go package discovery
//!
//! A package is any directory holding at least one `.go` file. Hidden,
//! `vendor` and `testdata` directories are never descended into.

use std::collections::HashSet;
use std::path::{Component, Path};

use walkdir::{DirEntry, WalkDir};

use crate::error::GotestResult;

const SKIPPED_DIRS: [&str; 2] = ["vendor", "testdata"];

/// Find every package below `root` as a `./`-prefixed, root-relative path.
///
/// Order follows a lexical depth-first walk, so the result is stable.
pub fn find_packages(root: &Path, ignore: &[String]) -> GotestResult<Vec<String>> {
    let mut packages = Vec::new();
    let mut seen = HashSet::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !should_prune(root, entry, ignore));

    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_dir() || !is_go_source(entry.path()) {
            continue;
        }

        let Some(dir) = entry.path().parent() else {
            continue;
        };
        let relative = relative_path(root, dir);
        if seen.contains(&relative) || is_ignored(&relative, ignore) {
            continue;
        }

        tracing::debug!(package = %relative, "found go package");
        packages.push(package_arg(&relative));
        seen.insert(relative);
    }

    Ok(packages)
}

fn should_prune(root: &Path, entry: &DirEntry, ignore: &[String]) -> bool {
    if !entry.file_type().is_dir() || entry.depth() == 0 {
        return false;
    }

    let name = entry.file_name().to_string_lossy();
    if name.starts_with('.') || SKIPPED_DIRS.iter().any(|skip| name == *skip) {
        return true;
    }

    let relative = relative_path(root, entry.path());
    if is_ignored(&relative, ignore) {
        tracing::debug!(dir = %relative, "ignoring directory");
        return true;
    }
    false
}

fn is_go_source(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "go")
}

/// Substring match of any pattern against a root-relative path.
pub fn is_ignored(relative: &str, ignore: &[String]) -> bool {
    ignore.iter().any(|pattern| relative.contains(pattern.as_str()))
}

/// `dir` relative to `root`, `/`-separated, `.` for the root itself.
fn relative_path(root: &Path, dir: &Path) -> String {
    let relative = dir.strip_prefix(root).unwrap_or(dir);
    let parts: Vec<_> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

fn package_arg(relative: &str) -> String {
    format!("./{}", relative)
}
