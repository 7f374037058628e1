//! Static manifest module
//!
//! Enumerates the servable file tree once at startup. The manifest is immutable
//! after construction; files added to the store afterwards stay invisible until
//! the process restarts.

use log::{debug, info};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// The set of servable root-relative paths
///
/// Entries are forward-slash rooted (`/index.html`, `/css/site.css`) so they
/// compare directly against request paths.
#[derive(Debug)]
pub struct Manifest {
    entries: HashSet<String>,
}

impl Manifest {
    /// A manifest with no entries, used when no static root is configured
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: HashSet::new(),
        }
    }

    /// Recursively enumerate all regular files under `root`
    ///
    /// A single entry whose metadata lookup fails is logged and skipped; the
    /// build itself never fails, a partial manifest is acceptable.
    #[must_use]
    pub fn build(root: &Path) -> Self {
        let mut entries = HashSet::new();
        walk(root, root, &mut entries);
        info!("manifest built: {} file(s) under {}", entries.len(), root.display());
        Self { entries }
    }

    /// Whether `path` (rooted, e.g. `/index.html`) is servable
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains(path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn walk(dir: &Path, root: &Path, entries: &mut HashSet<String>) {
    let listing = match fs::read_dir(dir) {
        Ok(listing) => listing,
        Err(err) => {
            debug!("skipping unreadable directory {}: {err}", dir.display());
            return;
        }
    };

    for entry in listing {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!("skipping unreadable entry under {}: {err}", dir.display());
                continue;
            }
        };
        let path = entry.path();
        let meta = match entry.metadata() {
            Ok(meta) => meta,
            Err(err) => {
                debug!("skipping {}: {err}", path.display());
                continue;
            }
        };

        if meta.is_dir() {
            walk(&path, root, entries);
        } else if meta.is_file() {
            if let Some(key) = relative_key(&path, root) {
                entries.insert(key);
            }
        } else {
            debug!("skipping non-regular entry {}", path.display());
        }
    }
}

/// Root-relative, forward-slash rooted form of `path`
fn relative_key(path: &Path, root: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let mut key = String::new();
    for part in rel.components() {
        key.push('/');
        key.push_str(&part.as_os_str().to_string_lossy());
    }
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn fixture_tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        File::create(dir.path().join("index.html"))
            .unwrap()
            .write_all(b"<html></html>")
            .unwrap();
        fs::create_dir(dir.path().join("css")).unwrap();
        File::create(dir.path().join("css").join("site.css"))
            .unwrap()
            .write_all(b"body{}")
            .unwrap();
        dir
    }

    #[test]
    fn test_build_records_rooted_paths() {
        let dir = fixture_tree();
        let manifest = Manifest::build(dir.path());
        assert_eq!(manifest.len(), 2);
        assert!(manifest.contains("/index.html"));
        assert!(manifest.contains("/css/site.css"));
    }

    #[test]
    fn test_unrooted_paths_do_not_match() {
        let dir = fixture_tree();
        let manifest = Manifest::build(dir.path());
        assert!(!manifest.contains("index.html"));
        assert!(!manifest.contains("/css"));
    }

    #[test]
    fn test_missing_root_yields_empty_manifest() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nonexistent");
        let manifest = Manifest::build(&missing);
        assert!(manifest.is_empty());
    }

    #[test]
    fn test_files_added_after_build_are_invisible() {
        let dir = fixture_tree();
        let manifest = Manifest::build(dir.path());
        File::create(dir.path().join("late.html")).unwrap();
        assert!(!manifest.contains("/late.html"));
    }
}
