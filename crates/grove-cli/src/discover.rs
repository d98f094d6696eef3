//! Workspace file discovery.
//!
//! This is the upstream collaborator feeding the hierarchy indexer: it
//! walks a workspace root and yields the paths of indexable source files.
//! The indexer itself never touches the filesystem.

use std::path::{Component, Path};

use grove_core::config::IndexConfig;
use ignore::WalkBuilder;
use tracing::warn;

/// Walk a workspace root and collect indexable file paths.
///
/// Hidden files and gitignored paths are skipped; the configured extension
/// and exclude-directory filters are applied on top. Paths come back sorted
/// and anchored at `root`.
pub fn discover_files(root: &Path, config: &IndexConfig) -> Vec<String> {
    let walker = WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(true)
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        let path = entry.path();

        if !path.is_file() || !should_index(path, config) {
            continue;
        }
        if in_excluded_dir(path, root, &config.exclude_dirs) {
            continue;
        }

        files.push(path.to_string_lossy().to_string());
    }

    files.sort();
    files
}

/// Check if the file extension is in the allowed list.
fn should_index(path: &Path, config: &IndexConfig) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| config.include_extensions.iter().any(|e| e == ext))
        .unwrap_or(false)
}

/// Check if any path segment below the root is an excluded directory.
fn in_excluded_dir(path: &Path, root: &Path, exclude_dirs: &[String]) -> bool {
    let Ok(relative) = path.strip_prefix(root) else {
        return false;
    };

    relative.components().any(|component| match component {
        Component::Normal(name) => name
            .to_str()
            .map(|n| exclude_dirs.iter().any(|e| e == n))
            .unwrap_or(false),
        _ => false,
    })
}
