//! File classification.
//!
//! Decides which folder a file belongs in, first by name pattern and then by
//! extension. Classification only computes a suggestion; nothing on disk is
//! touched.

use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::config::{EXTENSION_MAP, NAME_PATTERNS, NO_EXTENSION_FOLDER, OTHER_FOLDER};
use crate::types::{MatchRule, Placement};
use crate::walker::Walker;

static NAME_MATCHERS: LazyLock<Vec<(Regex, &'static str)>> =
    LazyLock::new(|| NAME_PATTERNS.iter().filter_map(|(pattern, folder)| RegexBuilder::new(pattern).case_insensitive(true).build().ok().map(|re| (re, *folder))).collect());

/// Maps file names to destination folders.
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    by_name: bool,
}

impl Classifier {
    /// `by_name` enables name patterns ahead of the extension table.
    pub fn new(by_name: bool) -> Self {
        Self { by_name }
    }

    /// Returns the destination folder for `file_name` and the rule that chose it.
    pub fn classify(&self, file_name: &str) -> (String, MatchRule) {
        if self.by_name
            && let Some(folder) = match_name(file_name)
        {
            return (folder.to_owned(), MatchRule::NamePattern);
        }

        let extension = extension_of(file_name);
        match EXTENSION_MAP.iter().find(|(ext, _)| *ext == extension) {
            Some((_, folder)) => ((*folder).to_owned(), MatchRule::Extension),
            None if extension.is_empty() => (format!("{OTHER_FOLDER}/{NO_EXTENSION_FOLDER}"), MatchRule::Fallback),
            None => (format!("{OTHER_FOLDER}/{}", &extension[1..]), MatchRule::Fallback),
        }
    }

    /// Classifies every regular file directly under `root`.
    ///
    /// Subdirectories are left alone and their contents are not planned.
    pub fn plan(&self, root: &Path) -> Result<Vec<Placement>> {
        let walker = Walker::new(root).max_depth(1).sorted(true);
        let mut placements = Vec::new();

        for item in walker.files().with_context(|| format!("cannot plan {}", root.display()))? {
            let entry = item.with_context(|| format!("failed while scanning {}", root.display()))?;
            let (folder, rule) = self.classify(&entry.file_name());
            debug!(file = %entry.relative().display(), %folder, %rule, "classified");
            placements.push(Placement { entry, folder, rule });
        }

        Ok(placements)
    }
}

fn match_name(file_name: &str) -> Option<&'static str> {
    NAME_MATCHERS.iter().find(|(re, _)| re.is_match(file_name)).map(|(_, folder)| *folder)
}

/// Lower-cased extension including the leading dot, or `""`.
///
/// Leading dots do not start an extension, so `.bashrc` has none.
pub fn extension_of(file_name: &str) -> String {
    let stem_start = file_name.len() - file_name.trim_start_matches('.').len();
    match file_name[stem_start..].rfind('.') {
        Some(idx) => file_name[stem_start + idx..].to_lowercase(),
        None => String::new(),
    }
}
