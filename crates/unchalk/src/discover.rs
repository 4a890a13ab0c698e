//! File discovery: walk a directory for JavaScript sources worth migrating.

use anyhow::Result;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Collect candidate files under `path` with one of the wanted extensions.
///
/// An explicitly named file is taken as-is, whatever its extension; the
/// filter only applies to directory walks. Dependency trees and hidden
/// directories are never walked.
pub fn collect_source_files(path: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if path.is_file() {
        files.push(path.to_path_buf());
        return Ok(files);
    }

    let walker = WalkDir::new(path).follow_links(true).into_iter();
    for entry in walker.filter_entry(|entry| !is_ignored(entry)) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(_) => continue,
        };

        let candidate = entry.path();
        if candidate.is_file() && has_wanted_extension(candidate, extensions) {
            files.push(candidate.to_path_buf());
        }
    }

    // Deterministic processing order regardless of filesystem iteration
    files.sort();

    Ok(files)
}

/// Dependency and hidden entries get pruned wholesale. The walk root itself
/// is exempt so invocations like `unchalk .` work.
fn is_ignored(entry: &DirEntry) -> bool {
    if entry.depth() == 0 {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name == "node_modules" || name.starts_with('.')
}

fn has_wanted_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map_or(false, |ext| extensions.iter().any(|wanted| ext == wanted.as_str()))
}
