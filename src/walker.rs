//! Directory Walker
//!
//! Enumerates everything reachable under a root path and hands it out as
//! [`FileEntry`] records. The root is validated eagerly so that a missing or
//! locked directory fails before any entry is produced; the traversal itself
//! is lazy and driven by `walkdir`.
//!
//! Failures on individual entries (a subdirectory that cannot be listed, a
//! file removed mid-walk) are yielded as `Err` items and the walk continues.

use std::fs;
use std::path::{Path, PathBuf};

use fast_glob::glob_match;
use tracing::{debug, warn};
use walkdir::{DirEntry, FilterEntry, IntoIter, WalkDir};

use crate::error::WalkError;
use crate::types::{EntryKind, FileEntry};

type EntryFilter = Box<dyn FnMut(&DirEntry) -> bool>;

/// Builder and entry point for a directory traversal.
#[derive(Debug, Clone)]
pub struct Walker {
    root: PathBuf,
    max_depth: Option<usize>,
    follow_links: bool,
    sorted: bool,
    exclude: Vec<String>,
}

impl Walker {
    /// Creates a walker rooted at `root` with unlimited depth and no exclusions.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), max_depth: None, follow_links: false, sorted: false, exclude: Vec::new() }
    }

    /// Limits recursion; `1` yields only the direct children of the root.
    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    #[must_use]
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.follow_links = yes;
        self
    }

    /// Yields entries sorted by file name within each directory.
    #[must_use]
    pub fn sorted(mut self, yes: bool) -> Self {
        self.sorted = yes;
        self
    }

    /// Skips entries whose relative path, or any component of it, matches one
    /// of the glob patterns. Excluded directories are not descended into.
    #[must_use]
    pub fn exclude<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(patterns.into_iter().map(Into::into));
        self
    }

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Checks that the root exists, is a directory, and can be listed and written.
    pub fn validate(&self) -> Result<(), WalkError> {
        let meta = fs::metadata(&self.root).map_err(|e| WalkError::from_io(&self.root, e))?;

        if !meta.is_dir() {
            return Err(WalkError::NotADirectory { path: self.root.clone() });
        }

        fs::read_dir(&self.root).map_err(|e| WalkError::from_io(&self.root, e))?;

        if is_read_only(&meta) {
            return Err(WalkError::PermissionDenied { path: self.root.clone() });
        }

        Ok(())
    }

    /// Validates the root and returns a lazy iterator over everything under it.
    pub fn walk(&self) -> Result<Entries, WalkError> {
        self.validate()?;

        debug!(root = %self.root.display(), max_depth = ?self.max_depth, excludes = self.exclude.len(), "starting walk");

        let mut walk = WalkDir::new(&self.root).min_depth(1).follow_links(self.follow_links);
        if let Some(depth) = self.max_depth {
            walk = walk.max_depth(depth);
        }
        if self.sorted {
            walk = walk.sort_by_file_name();
        }

        let root = self.root.clone();
        let patterns = self.exclude.clone();
        let filter: EntryFilter = Box::new(move |entry: &DirEntry| {
            if entry.depth() == 0 || patterns.is_empty() {
                return true;
            }
            let relative = entry.path().strip_prefix(&root).unwrap_or_else(|_| entry.path());
            !is_excluded(relative, &patterns)
        });

        Ok(Entries { inner: walk.into_iter().filter_entry(filter), root: self.root.clone() })
    }

    /// Like [`Walker::walk`], but yields only regular files.
    ///
    /// Symlinks whose target is a regular file count as files; symlinked
    /// directories are still not descended unless links are followed.
    pub fn files(&self) -> Result<impl Iterator<Item = Result<FileEntry, WalkError>>, WalkError> {
        Ok(self.walk()?.filter(|item| match item {
            Ok(entry) => entry.is_file() || (entry.kind() == EntryKind::Symlink && targets_file(entry.path())),
            Err(_) => true,
        }))
    }
}

fn targets_file(link: &Path) -> bool {
    fs::metadata(link).is_ok_and(|meta| meta.is_file())
}

// The Windows read-only attribute on a directory does not block creating
// files in it, and Explorer sets it on customised shell folders.
#[cfg(unix)]
fn is_read_only(meta: &fs::Metadata) -> bool {
    meta.permissions().readonly()
}

#[cfg(not(unix))]
fn is_read_only(_meta: &fs::Metadata) -> bool {
    false
}

/// Lazy sequence of entries under a validated root.
pub struct Entries {
    inner: FilterEntry<IntoIter, EntryFilter>,
    root: PathBuf,
}

impl Iterator for Entries {
    type Item = Result<FileEntry, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = match self.inner.next()? {
            Ok(entry) => entry,
            Err(err) => {
                let err = WalkError::from(err);
                warn!(path = %err.path().display(), "{err}");
                return Some(Err(err));
            }
        };

        let relative = entry.path().strip_prefix(&self.root).map_or_else(|_| entry.path().to_path_buf(), Path::to_path_buf);
        let kind = EntryKind::from_file_type(entry.file_type());
        let depth = entry.depth();

        Some(Ok(FileEntry::new(entry.into_path(), relative, kind, depth)))
    }
}

/// Returns true when `relative` or any of its components matches a pattern.
pub fn is_excluded(relative: &Path, patterns: &[String]) -> bool {
    let path_str = relative.to_string_lossy().replace('\\', "/");

    patterns.iter().any(|pattern| glob_match(pattern.as_str(), path_str.as_str()) || relative.components().any(|comp| glob_match(pattern.as_str(), &*comp.as_os_str().to_string_lossy())))
}
