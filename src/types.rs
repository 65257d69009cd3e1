//! Common type definitions for tidydir.
//!
//! # Overview
//!
//! - [`EntryKind`]: What a discovered path is on disk
//! - [`FileEntry`]: A path discovered under the root by the walker
//! - [`MatchRule`]: Which classification rule placed a file
//! - [`Placement`]: A file and the folder it belongs in

use std::path::{Path, PathBuf};

use strum::Display;

/// What a discovered path is on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum EntryKind {
    /// A regular file.
    File,

    /// A directory.
    Directory,

    /// A symbolic link that was not followed.
    Symlink,
}

impl EntryKind {
    /// Maps a `std::fs::FileType` to an entry kind.
    #[inline]
    pub fn from_file_type(file_type: std::fs::FileType) -> Self {
        if file_type.is_dir() {
            Self::Directory
        } else if file_type.is_symlink() {
            Self::Symlink
        } else {
            Self::File
        }
    }
}

/// A path discovered under the root.
///
/// Entries are produced by [`crate::walker::Walker`] and never mutated
/// afterwards. The root itself is never an entry, so `depth` starts at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    path: PathBuf,
    relative: PathBuf,
    kind: EntryKind,
    depth: usize,
}

impl FileEntry {
    pub fn new(path: impl Into<PathBuf>, relative: impl Into<PathBuf>, kind: EntryKind, depth: usize) -> Self {
        Self { path: path.into(), relative: relative.into(), kind, depth }
    }

    /// Full path, prefixed by the walker's root.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path relative to the walker's root.
    #[inline]
    pub fn relative(&self) -> &Path {
        &self.relative
    }

    #[inline]
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Number of components below the root (direct children are at depth 1).
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Final path component, lossily converted for display and matching.
    pub fn file_name(&self) -> String {
        self.path.file_name().map_or_else(|| self.path.to_string_lossy().into_owned(), |n| n.to_string_lossy().into_owned())
    }
}

/// Which classification rule produced a [`Placement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MatchRule {
    /// A name pattern matched the file name.
    #[strum(serialize = "name")]
    NamePattern,

    /// The extension is listed in the extension table.
    #[strum(serialize = "extension")]
    Extension,

    /// Nothing matched; the file goes under `Other/`.
    #[strum(serialize = "fallback")]
    Fallback,
}

/// Where a file would be placed if the directory were organized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub entry: FileEntry,

    /// Destination folder relative to the root, `/`-separated.
    pub folder: String,

    pub rule: MatchRule,
}
