//! Directory report.
//!
//! Walks a whole tree and produces a plain-text report listing every
//! directory's files by size, the totals, and the files that look like they
//! could be deleted (temporary, backup or download folders, or anything older
//! than [`STALE_AGE_DAYS`]).

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use hashbrown::HashMap;
use tracing::{debug, info, warn};

use crate::config::{DELETION_CATEGORIES, ROOT_LABEL, STALE_AGE_DAYS};
use crate::types::FileEntry;
use crate::ui::display::format_size;
use crate::walker::Walker;

const SECONDS_PER_DAY: f64 = 60.0 * 60.0 * 24.0;
const RULE_WIDTH: usize = 50;

/// A single file in a report section.
#[derive(Debug, Clone, PartialEq)]
pub struct FileRecord {
    pub name: String,
    pub size: u64,

    /// `None` when the file's metadata could not be read.
    pub modified: Option<SystemTime>,

    /// Age in fractional days relative to the report time.
    pub age_days: f64,
}

/// All files that live directly in one directory.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectorySection {
    /// Path relative to the root, or [`ROOT_LABEL`].
    pub label: String,

    /// Sorted by size, largest first.
    pub files: Vec<FileRecord>,

    pub total_size: u64,
}

/// A file that might be worth deleting.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Path relative to the root.
    pub path: PathBuf,
    pub size: u64,
    pub age_days: f64,
}

/// Aggregated view of a directory tree.
#[derive(Debug, Clone)]
pub struct Report {
    root: PathBuf,
    generated: DateTime<Local>,
    sections: Vec<DirectorySection>,
    candidates: Vec<Candidate>,
}

impl Report {
    /// Walks `root` and gathers the report, skipping any file named `report_name`.
    ///
    /// The skip matches by file name at every depth, not only in the root.
    pub fn collect(root: &Path, report_name: &str, now: SystemTime) -> Result<Self> {
        Self::collect_with(root, report_name, now, |_| {})
    }

    /// Like [`Report::collect`], calling `on_file` for every file visited.
    pub fn collect_with<F>(root: &Path, report_name: &str, now: SystemTime, mut on_file: F) -> Result<Self>
    where
        F: FnMut(&FileEntry),
    {
        let walker = Walker::new(root).sorted(true);
        let files = walker.files().with_context(|| format!("cannot generate report for {}", root.display()))?;

        let mut index: HashMap<PathBuf, usize> = HashMap::new();
        let mut sections: Vec<DirectorySection> = Vec::new();
        let mut candidates = Vec::new();

        for item in files {
            let entry = match item {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("skipping entry: {err}");
                    continue;
                }
            };

            let name = entry.file_name();
            if name == report_name {
                continue;
            }
            on_file(&entry);

            let parent = entry.relative().parent().map(Path::to_path_buf).unwrap_or_default();
            let slot = *index.entry(parent.clone()).or_insert_with(|| {
                sections.push(DirectorySection { label: section_label(&parent), files: Vec::new(), total_size: 0 });
                sections.len() - 1
            });
            let section = &mut sections[slot];

            let record = match fs::metadata(entry.path()) {
                Ok(meta) => {
                    let modified = meta.modified().ok();
                    let age_days = modified.map_or(0.0, |m| age_in_days(now, m));
                    let record = FileRecord { name, size: meta.len(), modified, age_days };

                    if is_candidate(&section.label, &record.name, record.age_days) {
                        candidates.push(Candidate { path: entry.relative().to_path_buf(), size: record.size, age_days: record.age_days });
                    }
                    record
                }
                Err(err) => {
                    debug!(path = %entry.path().display(), "metadata unavailable: {err}");
                    FileRecord { name, size: 0, modified: None, age_days: 0.0 }
                }
            };

            section.total_size += record.size;
            section.files.push(record);
        }

        for section in &mut sections {
            section.files.sort_by(|a, b| b.size.cmp(&a.size));
        }
        sections.sort_by(|a, b| (a.label != ROOT_LABEL, &a.label).cmp(&(b.label != ROOT_LABEL, &b.label)));
        candidates.sort_by(|a, b| b.size.cmp(&a.size));

        let report = Self { root: root.to_path_buf(), generated: DateTime::<Local>::from(now), sections, candidates };
        info!(files = report.total_files(), bytes = report.total_size(), candidates = report.candidates.len(), "report collected");

        Ok(report)
    }

    #[cfg(test)]
    fn from_parts(root: &Path, now: SystemTime, sections: Vec<DirectorySection>, candidates: Vec<Candidate>) -> Self {
        Self { root: root.to_path_buf(), generated: DateTime::<Local>::from(now), sections, candidates }
    }

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[inline]
    pub fn sections(&self) -> &[DirectorySection] {
        &self.sections
    }

    #[inline]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn total_files(&self) -> usize {
        self.sections.iter().map(|s| s.files.len()).sum()
    }

    pub fn total_size(&self) -> u64 {
        self.sections.iter().map(|s| s.total_size).sum()
    }

    /// Combined size of all deletion candidates.
    pub fn potential_savings(&self) -> u64 {
        self.candidates.iter().map(|c| c.size).sum()
    }

    /// Savings as a percentage of the total size; `0.0` for an empty tree.
    #[allow(clippy::cast_precision_loss)]
    pub fn savings_percent(&self) -> f64 {
        let total = self.total_size();
        if total == 0 { 0.0 } else { self.potential_savings() as f64 / total as f64 * 100.0 }
    }

    /// Writes the text layout of the report.
    pub fn render<W: Write>(&self, out: &mut W) -> Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        let thin = "-".repeat(RULE_WIDTH);

        writeln!(out, "File Organization Report - {}", self.generated.format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(out, "{rule}\n")?;
        writeln!(out, "Directory: {}\n", self.root.display())?;

        for section in &self.sections {
            writeln!(out, "\n{} ({} files):", section.label, section.files.len())?;
            writeln!(out, "{thin}")?;

            for file in &section.files {
                let date = file.modified.map_or_else(|| "unknown".to_owned(), |m| DateTime::<Local>::from(m).format("%Y-%m-%d %H:%M").to_string());
                writeln!(out, "  {}", file.name)?;
                writeln!(out, "    Size: {} | Modified: {date} | Age: {:.1} days", format_size(file.size), file.age_days)?;
            }

            writeln!(out, "  Total directory size: {}", format_size(section.total_size))?;
        }

        writeln!(out, "\n{rule}")?;
        writeln!(out, "SUMMARY")?;
        writeln!(out, "{rule}")?;
        writeln!(out, "Total Files: {}", self.total_files())?;
        writeln!(out, "Total Size: {}\n", format_size(self.total_size()))?;

        if !self.candidates.is_empty() {
            writeln!(out, "POTENTIAL DELETION CANDIDATES")?;
            writeln!(out, "{rule}")?;
            writeln!(out, "The following files might be candidates for deletion:\n")?;

            for candidate in &self.candidates {
                writeln!(out, "- {}", candidate.path.display())?;
                writeln!(out, "  Size: {} | Age: {:.1} days", format_size(candidate.size), candidate.age_days)?;
            }

            writeln!(out, "\nPotential space savings: {} ({:.1}% of total)", format_size(self.potential_savings()), self.savings_percent())?;
        }

        Ok(())
    }

    /// Renders the report into a new file at `path`, replacing any existing one.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let file = fs::File::create(path).with_context(|| format!("failed to create report: {}", path.display()))?;
        let mut writer = BufWriter::new(file);

        self.render(&mut writer)?;
        writer.flush().with_context(|| format!("failed to write report: {}", path.display()))?;

        info!(path = %path.display(), "report written");
        Ok(())
    }
}

fn section_label(relative_dir: &Path) -> String {
    if relative_dir.as_os_str().is_empty() { ROOT_LABEL.to_owned() } else { relative_dir.display().to_string() }
}

fn age_in_days(now: SystemTime, modified: SystemTime) -> f64 {
    match now.duration_since(modified) {
        Ok(age) => age.as_secs_f64() / SECONDS_PER_DAY,
        Err(ahead) => -ahead.duration().as_secs_f64() / SECONDS_PER_DAY,
    }
}

/// A file is a candidate when its directory or name mentions a deletion
/// category, or when it is older than [`STALE_AGE_DAYS`].
pub fn is_candidate(label: &str, name: &str, age_days: f64) -> bool {
    let label = label.to_lowercase();
    let name = name.to_lowercase();

    let categorized = DELETION_CATEGORIES.iter().map(|c| c.to_lowercase()).any(|c| label.contains(&c) || name.contains(&c));

    categorized || age_days > STALE_AGE_DAYS
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tempfile::tempdir;

    use super::*;
    use crate::config::DEFAULT_REPORT_NAME;

    fn set_age(path: &Path, now: SystemTime, days: u64) {
        let file = fs::File::options().write(true).open(path).unwrap();
        file.set_modified(now - Duration::from_secs(days * 86_400)).unwrap();
    }

    #[test]
    fn test_is_candidate() {
        assert!(is_candidate("Downloads", "setup.exe", 1.0));
        assert!(is_candidate(ROOT_LABEL, "my_cache.bin", 1.0));
        assert!(is_candidate("docs", "letter.txt", 200.0));
        assert!(!is_candidate("docs", "letter.txt", 10.0));
    }

    #[test]
    fn test_collect_groups_by_directory_and_skips_report() {
        let dir = tempdir().unwrap();
        let now = SystemTime::now();
        fs::create_dir(dir.path().join("music")).unwrap();
        fs::write(dir.path().join("small.txt"), b"ab").unwrap();
        fs::write(dir.path().join("large.txt"), vec![0u8; 100]).unwrap();
        fs::write(dir.path().join("music/song.mp3"), vec![0u8; 10]).unwrap();
        fs::write(dir.path().join(DEFAULT_REPORT_NAME), b"stale report").unwrap();

        let report = Report::collect(dir.path(), DEFAULT_REPORT_NAME, now).unwrap();

        assert_eq!(report.total_files(), 3);
        assert_eq!(report.total_size(), 112);

        let labels: Vec<_> = report.sections().iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec![ROOT_LABEL, "music"]);

        let root_files: Vec<_> = report.sections()[0].files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(root_files, vec!["large.txt", "small.txt"]);
        assert_eq!(report.sections()[0].total_size, 102);
    }

    #[test]
    fn test_collect_flags_candidates() {
        let dir = tempdir().unwrap();
        let now = SystemTime::now();
        fs::create_dir(dir.path().join("Downloads")).unwrap();
        fs::write(dir.path().join("Downloads/installer.exe"), vec![0u8; 50]).unwrap();
        fs::write(dir.path().join("ancient.doc"), vec![0u8; 20]).unwrap();
        fs::write(dir.path().join("fresh.doc"), vec![0u8; 30]).unwrap();
        set_age(&dir.path().join("ancient.doc"), now, 365);

        let report = Report::collect(dir.path(), DEFAULT_REPORT_NAME, now).unwrap();

        let paths: Vec<_> = report.candidates().iter().map(|c| c.path.clone()).collect();
        assert_eq!(paths, vec![PathBuf::from("Downloads/installer.exe"), PathBuf::from("ancient.doc")]);
        assert_eq!(report.potential_savings(), 70);
        assert!((report.savings_percent() - 70.0).abs() < 1e-9);

        let ancient = report.candidates().iter().find(|c| c.path == Path::new("ancient.doc")).unwrap();
        assert!((ancient.age_days - 365.0).abs() < 0.01);
    }

    #[test]
    fn test_render_layout() {
        let dir = tempdir().unwrap();
        let now = SystemTime::now();
        let path = dir.path().join("cache_notes.txt");
        fs::write(&path, vec![0u8; 2048]).unwrap();
        set_age(&path, now, 0);

        let report = Report::collect(dir.path(), DEFAULT_REPORT_NAME, now).unwrap();
        let mut out = Vec::new();
        report.render(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("File Organization Report - "));
        assert!(text.contains(&format!("Directory: {}", dir.path().display())));
        assert!(text.contains("Root Directory (1 files):"));
        assert!(text.contains("  cache_notes.txt\n    Size: 2.0 KB | Modified: "));
        assert!(text.contains("Total Files: 1\nTotal Size: 2.0 KB"));
        assert!(text.contains("- cache_notes.txt\n  Size: 2.0 KB | Age: 0.0 days"));
        assert!(text.contains("Potential space savings: 2.0 KB (100.0% of total)"));
    }

    #[test]
    fn test_render_empty_tree_has_no_candidates() {
        let dir = tempdir().unwrap();
        let report = Report::collect(dir.path(), DEFAULT_REPORT_NAME, SystemTime::now()).unwrap();

        let mut out = Vec::new();
        report.render(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Total Files: 0\nTotal Size: 0 bytes"));
        assert!(!text.contains("POTENTIAL DELETION CANDIDATES"));
        assert!(report.savings_percent().abs() < f64::EPSILON);
    }

    #[test]
    fn test_sections_put_root_first_then_sort_by_label() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("z_big")).unwrap();
        fs::create_dir(dir.path().join("a_small")).unwrap();
        fs::write(dir.path().join("z_big/blob.bin"), vec![0u8; 5000]).unwrap();
        fs::write(dir.path().join("a_small/tiny.bin"), b"x").unwrap();
        fs::write(dir.path().join("top.txt"), b"xy").unwrap();

        let report = Report::collect(dir.path(), DEFAULT_REPORT_NAME, SystemTime::now()).unwrap();

        let sections: Vec<_> = report.sections().iter().map(|s| (s.label.as_str(), s.total_size)).collect();
        assert_eq!(sections, vec![(ROOT_LABEL, 2), ("a_small", 1), ("z_big", 5000)]);
    }

    #[test]
    fn test_collect_skips_report_name_in_subdirectories() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/r.txt"), b"old").unwrap();
        fs::write(dir.path().join("keep.txt"), b"x").unwrap();

        let report = Report::collect(dir.path(), "r.txt", SystemTime::now()).unwrap();
        assert_eq!(report.total_files(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_collect_counts_symlinked_files_at_target_size() {
        use std::os::unix::fs::symlink;

        let dir = tempdir().unwrap();
        let root = dir.path().join("root");
        fs::create_dir_all(&root).unwrap();
        fs::create_dir_all(dir.path().join("outside")).unwrap();
        fs::write(dir.path().join("outside/real.pdf"), vec![0u8; 300]).unwrap();
        fs::write(root.join("plain.txt"), b"x").unwrap();
        symlink(dir.path().join("outside/real.pdf"), root.join("link.pdf")).unwrap();

        let report = Report::collect(&root, DEFAULT_REPORT_NAME, SystemTime::now()).unwrap();
        assert_eq!(report.total_files(), 2);
        assert_eq!(report.total_size(), 301);
    }

    #[test]
    fn test_render_unreadable_metadata() {
        let section = DirectorySection { label: ROOT_LABEL.to_owned(), files: vec![FileRecord { name: "ghost.bin".to_owned(), size: 0, modified: None, age_days: 0.0 }], total_size: 0 };
        let report = Report::from_parts(Path::new("/data"), SystemTime::now(), vec![section], Vec::new());

        let mut out = Vec::new();
        report.render(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("  ghost.bin\n    Size: 0 bytes | Modified: unknown | Age: 0.0 days"));
        assert!(text.contains("Total Files: 1\nTotal Size: 0 bytes"));
    }

    #[test]
    fn test_write_to_creates_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), b"a").unwrap();
        let target = dir.path().join(DEFAULT_REPORT_NAME);

        let report = Report::collect(dir.path(), DEFAULT_REPORT_NAME, SystemTime::now()).unwrap();
        report.write_to(&target).unwrap();

        let text = fs::read_to_string(&target).unwrap();
        assert!(text.contains("SUMMARY"));
    }

    #[test]
    fn test_collect_missing_root_fails() {
        let dir = tempdir().unwrap();
        assert!(Report::collect(&dir.path().join("missing"), DEFAULT_REPORT_NAME, SystemTime::now()).is_err());
    }
}
